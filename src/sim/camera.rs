//! Follow camera framing
//!
//! The camera sits behind and slightly above the orb. When the wanted spot
//! would poke through a wall, the offset is shrunk uniformly so the camera
//! stays inside the room while still looking along the same line.

use glam::Vec3;

use super::state::CameraFrame;
use crate::horizontal_dir;
use crate::tuning::RoomBox;

/// Desired offset from the orb: back along the view direction, fixed height
pub fn desired_offset(camera_forward: Vec3, follow_distance: f32, follow_height: f32) -> Vec3 {
    let mut offset = horizontal_dir(camera_forward) * -follow_distance;
    offset.y = follow_height;
    offset
}

/// Largest uniform scale in [0, 1] that keeps `anchor + offset * scale` inside `room`
///
/// Only axes where the unscaled point leaves the box constrain the result.
pub fn offset_scale(anchor: Vec3, offset: Vec3, room: &RoomBox) -> f32 {
    let wanted = anchor + offset;
    let mut scale = 1.0_f32;
    for axis in 0..3 {
        let axis_scale = if wanted[axis] > room.max[axis] {
            (room.max[axis] - anchor[axis]) / offset[axis]
        } else if wanted[axis] < room.min[axis] {
            (room.min[axis] - anchor[axis]) / offset[axis]
        } else {
            1.0
        };
        scale = scale.min(axis_scale);
    }
    scale
}

/// Frame the orb from behind, clamped to the room
pub fn frame(
    orb: Vec3,
    camera_forward: Vec3,
    room: &RoomBox,
    follow_distance: f32,
    follow_height: f32,
) -> CameraFrame {
    let offset = desired_offset(camera_forward, follow_distance, follow_height);
    let scale = offset_scale(orb, offset, room);
    CameraFrame {
        position: orb + offset * scale,
        target: orb,
    }
}
