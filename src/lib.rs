//! Survive the Dark - a flashlight chase game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, battery/flicker, pursuer AI, camera)
//! - `tuning`: Data-driven game balance
//! - `hud`: Display mappings for the presentation layer
//! - `web`: wasm-bindgen facade for the browser engine (wasm32 only)

pub mod hud;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use hud::BatteryBand;
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Nominal frame rate the host drives ticks at
    pub const FRAME_RATE: f32 = 60.0;

    /// Room dimensions (floor centered at origin)
    pub const ROOM_WIDTH: f32 = 100.0;
    pub const ROOM_HEIGHT: f32 = 50.0;
    pub const ROOM_DEPTH: f32 = 100.0;
    /// Walls are inset by this much on X and Z
    pub const ROOM_WALL_INSET: f32 = 1.0;

    /// Orb defaults
    pub const ORB_START: Vec3 = Vec3::new(0.0, 7.0, 0.0);
    pub const ORB_RADIUS: f32 = 0.5;

    /// Pursuer defaults
    pub const PURSUER_START: Vec3 = Vec3::new(0.0, 5.3, -15.0);
    /// Model's forward axis points away from where it walks
    pub const PURSUER_YAW_CORRECTION: f32 = std::f32::consts::PI;

    /// Battery bounds (percent)
    pub const BATTERY_MAX: f32 = 100.0;
    pub const BATTERY_MIN: f32 = 0.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Project onto the horizontal (XZ) plane and normalize, zero if degenerate
#[inline]
pub fn horizontal_dir(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Yaw (rotation about +Y) that turns an object's +Z axis toward `dir`
#[inline]
pub fn yaw_toward(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-2.5 * PI) - (-0.5 * PI)).abs() < 1e-5);
        assert!((normalize_angle(-PI) - (-PI)).abs() < 1e-6);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_horizontal_dir_drops_vertical() {
        let dir = horizontal_dir(Vec3::new(3.0, -10.0, 4.0));
        assert!((dir - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
        assert_eq!(horizontal_dir(Vec3::Y), Vec3::ZERO);
    }

    #[test]
    fn test_yaw_toward_axes() {
        assert!(yaw_toward(Vec3::Z).abs() < 1e-6);
        assert!((yaw_toward(Vec3::X) - PI / 2.0).abs() < 1e-6);
    }
}
