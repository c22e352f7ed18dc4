//! Game state and core simulation types
//!
//! The whole session lives in one [`GameState`] record owned by the caller
//! and mutated in place by [`super::tick`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::{RoomBox, Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Orb is alive, ticks advance the world
    Playing,
    /// Pursuer caught the orb; terminal
    GameOver,
}

/// Things that happened during the last tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Light forced off for `frames` ticks
    FlickerStarted { frames: u32 },
    /// Pursuer jumped to a new spot around the orb
    PursuerTeleported { pos: Vec3 },
    PickupSpawned { id: u32, pos: Vec3 },
    /// Pickup consumed; `battery` is the level after charging
    PickupCollected { id: u32, battery: f32 },
    /// Battery ran dry this tick
    BatteryDepleted,
    GameOver { time_survived: f32 },
}

/// The player-controlled light
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    pub pos: Vec3,
    pub radius: f32,
}

impl Default for Orb {
    fn default() -> Self {
        Self {
            pos: ORB_START,
            radius: ORB_RADIUS,
        }
    }
}

/// Flicker episode counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flicker {
    /// Light is forced off this tick
    pub active: bool,
    /// Dark ticks left in the current episode; a new roll only happens at 0
    pub frames_remaining: u32,
}

impl Flicker {
    /// Begin an episode of `frames` dark ticks, counting the current one
    pub fn start(&mut self, frames: u32) {
        self.active = true;
        self.frames_remaining = frames;
    }

    /// Consume one dark tick of the running episode
    pub fn step(&mut self) {
        if self.active {
            self.frames_remaining = self.frames_remaining.saturating_sub(1);
        }
    }

    pub fn can_roll(&self) -> bool {
        self.frames_remaining == 0
    }
}

/// The chasing NPC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub pos: Vec3,
    /// Rotation about +Y, radians in [-π, π)
    pub yaw: f32,
}

impl Default for Pursuer {
    fn default() -> Self {
        Self {
            pos: PURSUER_START,
            yaw: crate::normalize_angle(PURSUER_YAW_CORRECTION),
        }
    }
}

impl Pursuer {
    /// Step toward `target` by `step`, snapping onto it when within `reach`.
    ///
    /// Returns the distance actually travelled.
    pub fn advance_toward(&mut self, target: Vec3, reach: f32, step: f32) -> f32 {
        let to_target = target - self.pos;
        let distance = to_target.length();

        let travelled = if distance > reach {
            self.pos += to_target / distance * step;
            step
        } else {
            self.pos = target;
            distance
        };

        let facing = crate::horizontal_dir(to_target);
        if facing != Vec3::ZERO {
            self.yaw = crate::normalize_angle(crate::yaw_toward(facing) + PURSUER_YAW_CORRECTION);
        }
        travelled
    }
}

/// A battery pickup lying on the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec3,
}

/// Camera placement derived each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFrame {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 20.0, 15.0),
            target: Vec3::ZERO,
        }
    }
}

/// Complete session state (deterministic given seed and inputs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Elapsed session seconds at the last tick
    pub time_survived: f32,
    pub orb: Orb,
    /// Percent in [0, 100]
    pub battery: f32,
    pub flicker: Flicker,
    /// Light state emitted by the last tick
    pub light_on: bool,
    pub pursuer: Pursuer,
    /// Live pickups (sorted by id)
    pub pickups: Vec<Pickup>,
    pub camera: CameraFrame,
    /// Events from the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a session with custom tuning, rejecting values the tick cannot honour
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let orb = Orb {
            pos: tuning.room.clamp(ORB_START),
            ..Orb::default()
        };
        let pursuer = Pursuer {
            pos: tuning.room.clamp(PURSUER_START),
            ..Pursuer::default()
        };
        Self {
            seed,
            tuning,
            phase: GamePhase::Playing,
            time_ticks: 0,
            time_survived: 0.0,
            orb,
            battery: BATTERY_MAX,
            flicker: Flicker::default(),
            light_on: true,
            pursuer,
            pickups: Vec::new(),
            camera: CameraFrame::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn room(&self) -> &RoomBox {
        &self.tuning.room
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Distance between orb and pursuer centers
    pub fn pursuer_distance(&self) -> f32 {
        self.orb.pos.distance(self.pursuer.pos)
    }

    /// Add charge, capped at full
    pub fn charge_battery(&mut self, amount: f32) {
        self.battery = (self.battery + amount).min(BATTERY_MAX);
    }

    /// Drain charge, floored at empty
    pub fn drain_battery(&mut self, amount: f32) {
        self.battery = (self.battery - amount).max(BATTERY_MIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.orb.pos, Vec3::new(0.0, 7.0, 0.0));
        assert_eq!(state.pursuer.pos, Vec3::new(0.0, 5.3, -15.0));
        assert_eq!(state.battery, 100.0);
        assert!(state.light_on);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_battery_caps() {
        let mut state = GameState::new(1);
        state.battery = 95.0;
        state.charge_battery(20.0);
        assert_eq!(state.battery, 100.0);

        state.battery = 0.05;
        state.drain_battery(0.1);
        assert_eq!(state.battery, 0.0);
    }

    #[test]
    fn test_flicker_counts_down_then_rolls() {
        let mut flicker = Flicker::default();
        assert!(flicker.can_roll());
        flicker.start(3);
        let mut dark = 0;
        while !flicker.can_roll() {
            flicker.step();
            dark += 1;
        }
        assert_eq!(dark, 3);
        assert!(flicker.active);
    }

    #[test]
    fn test_advance_snaps_when_close() {
        let mut pursuer = Pursuer {
            pos: Vec3::new(0.0, 5.0, 0.0),
            yaw: 0.0,
        };
        let target = Vec3::new(0.3, 5.0, 0.0);
        let moved = pursuer.advance_toward(target, 0.4, 0.35);
        assert_eq!(pursuer.pos, target);
        assert!((moved - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_advance_faces_away_from_target() {
        // Facing +Z toward the target, then flipped
        let mut pursuer = Pursuer {
            pos: Vec3::ZERO,
            yaw: 1.0,
        };
        pursuer.advance_toward(Vec3::new(0.0, 0.0, 10.0), 0.4, 0.4);
        assert!((pursuer.pos.z - 0.4).abs() < 1e-6);
        assert!((pursuer.yaw.abs() - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_with_tuning_rejects_invalid() {
        let tuning = Tuning {
            pursuer_speed: 0.0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::with_tuning(1, tuning),
            Err(TuningError::Invalid(_))
        ));

        let tuning = Tuning {
            follow_distance: 9.0,
            ..Tuning::default()
        };
        let state = GameState::with_tuning(1, tuning).unwrap();
        assert_eq!(state.tuning.follow_distance, 9.0);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
