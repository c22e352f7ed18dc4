//! Per-frame simulation tick
//!
//! Core game loop step. The host calls [`tick`] once per rendered frame and
//! stops calling it once the session reaches [`GamePhase::GameOver`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::camera;
use super::random::RandomSource;
use super::state::{GameEvent, GamePhase, GameState, Pickup};
use crate::consts::*;
use crate::horizontal_dir;

/// Input for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// W held
    pub forward: bool,
    /// S held
    pub backward: bool,
    /// A held
    pub left: bool,
    /// D held
    pub right: bool,
    /// Camera view direction (only the horizontal part is used)
    pub camera_forward: Vec3,
    /// Seconds since session start
    pub elapsed: f32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            camera_forward: Vec3::NEG_Z,
            elapsed: 0.0,
        }
    }
}

impl TickInput {
    /// Camera-relative movement direction from held keys (unnormalized).
    ///
    /// Forward wins over backward and left wins over right when both are held.
    pub fn move_dir(&self) -> Vec3 {
        let forward = horizontal_dir(self.camera_forward);
        let right = forward.cross(Vec3::Y).normalize_or_zero();

        let mut dir = Vec3::ZERO;
        if self.forward {
            dir += forward;
        } else if self.backward {
            dir -= forward;
        }
        if self.left {
            dir -= right;
        } else if self.right {
            dir += right;
        }
        dir
    }
}

/// Advance the session by one frame
pub fn tick<R: RandomSource + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;
    state.time_survived = input.elapsed;

    move_orb(state, input);
    update_light(state, rng);
    update_pickups(state, rng);
    chase(state, input.elapsed, rng);
    check_caught(state);

    let t = &state.tuning;
    state.camera = camera::frame(
        state.orb.pos,
        input.camera_forward,
        &t.room,
        t.follow_distance,
        t.follow_height,
    );
}

/// Step 1: held keys move the orb, then it is clamped into the room
fn move_orb(state: &mut GameState, input: &TickInput) {
    let dir = input.move_dir();
    if dir.length() > 0.0 {
        state.orb.pos += dir.normalize() * state.tuning.orb_speed;
    }
    state.orb.pos = state.tuning.room.clamp(state.orb.pos);
}

/// Step 2: battery drain and flicker episodes decide whether the light is on
fn update_light<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    if state.battery <= BATTERY_MIN {
        state.light_on = false;
        return;
    }

    if state.flicker.can_roll() {
        // Flickers get likelier and longer as the battery drains
        let battery_factor = 1.0 - state.battery / BATTERY_MAX;
        let chance = battery_factor.powi(3).min(state.tuning.flicker_chance_cap);
        if rng.chance(chance) {
            let spread = 1 + (battery_factor * state.tuning.flicker_frames_per_factor).floor() as u32;
            let frames = state.tuning.flicker_min_frames + (rng.unit() * spread as f32).floor() as u32;
            state.flicker.start(frames);
            state.events.push(GameEvent::FlickerStarted { frames });
            log::debug!("Flicker for {} frames at battery {:.1}", frames, state.battery);
            teleport_pursuer(state, rng);
        } else {
            state.flicker.active = false;
        }
    }

    state.light_on = !state.flicker.active;
    state.flicker.step();

    state.drain_battery(state.tuning.battery_drain);
    if state.battery <= BATTERY_MIN {
        state.events.push(GameEvent::BatteryDepleted);
        log::info!("Battery depleted at {:.2}s", state.time_survived);
    }
}

/// Step 2a: on flicker onset the pursuer jumps to a random point on the
/// circle around the orb at its current distance
fn teleport_pursuer<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let dist = state.pursuer.pos.distance(state.orb.pos);
    let angle = rng.unit() * std::f32::consts::TAU;

    let pos = Vec3::new(
        state.orb.pos.x + angle.cos() * dist,
        state.pursuer.pos.y,
        state.orb.pos.z + angle.sin() * dist,
    );
    state.pursuer.pos = state.tuning.room.clamp(pos);
    state.events.push(GameEvent::PursuerTeleported {
        pos: state.pursuer.pos,
    });
}

/// Step 3: spawn battery pickups while the player needs them, collect any in reach
fn update_pickups<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let t = &state.tuning;
    if rng.chance(t.pickup_spawn_chance)
        && state.pickups.len() < t.max_pickups
        && state.battery < t.pickup_spawn_below
    {
        let room = t.room;
        let x = rng.range(room.min.x, room.max.x);
        let z = rng.range(room.min.z, room.max.z);
        let pos = Vec3::new(x, state.orb.pos.y, z);
        let id = state.next_entity_id();
        state.pickups.push(Pickup { id, pos });
        state.events.push(GameEvent::PickupSpawned { id, pos });
        log::debug!("Spawned pickup {} at {}", id, pos);
    }

    let orb = state.orb.pos;
    let radius = state.tuning.pickup_radius;
    let (collected, kept): (Vec<Pickup>, Vec<Pickup>) = state
        .pickups
        .drain(..)
        .partition(|p| p.pos.distance(orb) < radius);
    state.pickups = kept;

    for pickup in collected {
        state.charge_battery(state.tuning.pickup_charge);
        state.events.push(GameEvent::PickupCollected {
            id: pickup.id,
            battery: state.battery,
        });
        log::debug!("Collected pickup {}, battery {:.1}", pickup.id, state.battery);
    }
}

/// Step 4: in the dark, after the grace period, the pursuer closes in
fn chase<R: RandomSource + ?Sized>(state: &mut GameState, elapsed: f32, rng: &mut R) {
    if state.light_on || elapsed <= state.tuning.grace_period {
        return;
    }

    let target = Vec3::new(state.orb.pos.x, state.pursuer.pos.y, state.orb.pos.z);
    let reach = state.tuning.pursuer_speed;
    let step = if target.distance(state.pursuer.pos) > reach {
        reach - rng.unit() * state.tuning.pursuer_jitter
    } else {
        reach
    };
    state.pursuer.advance_toward(target, reach, step);
    state.pursuer.pos = state.tuning.room.clamp(state.pursuer.pos);
}

/// Step 5: caught when the pursuer gets within reach of the orb
fn check_caught(state: &mut GameState) {
    if state.pursuer_distance() <= state.tuning.catch_radius {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            time_survived: state.time_survived,
        });
        log::info!(
            "Game over after {} ticks ({:.2}s survived)",
            state.time_ticks,
            state.time_survived
        );
    }
}
