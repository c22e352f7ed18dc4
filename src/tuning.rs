//! Data-driven game balance
//!
//! Every gameplay constant the tick reads lives here so a session can be
//! rebalanced from a JSON file without recompiling.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Axis-aligned room bounds every entity is clamped into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for RoomBox {
    fn default() -> Self {
        Self {
            min: Vec3::new(
                -ROOM_WIDTH / 2.0 + ROOM_WALL_INSET,
                0.0,
                -ROOM_DEPTH / 2.0 + ROOM_WALL_INSET,
            ),
            max: Vec3::new(
                ROOM_WIDTH / 2.0 - ROOM_WALL_INSET,
                ROOM_HEIGHT,
                ROOM_DEPTH / 2.0 - ROOM_WALL_INSET,
            ),
        }
    }
}

impl RoomBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Clamp a point into the box, per axis
    #[inline]
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Gameplay balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub room: RoomBox,

    // === Orb ===
    /// Distance moved per tick while a key is held
    pub orb_speed: f32,

    // === Battery / flicker ===
    /// Battery drained per tick while it has charge
    pub battery_drain: f32,
    /// Upper bound on the per-tick flicker probability
    pub flicker_chance_cap: f32,
    /// Shortest flicker episode (ticks)
    pub flicker_min_frames: u32,
    /// Extra frames available at an empty battery (scaled by battery factor)
    pub flicker_frames_per_factor: f32,

    // === Pickups ===
    pub pickup_spawn_chance: f32,
    pub max_pickups: usize,
    /// No spawns while the battery is at or above this
    pub pickup_spawn_below: f32,
    /// Collection radius (strict)
    pub pickup_radius: f32,
    pub pickup_charge: f32,

    // === Pursuer ===
    pub pursuer_speed: f32,
    /// Random slowdown subtracted from pursuer speed, in [0, jitter)
    pub pursuer_jitter: f32,
    /// Seconds from session start before the pursuer may move
    pub grace_period: f32,
    /// Catch distance (inclusive)
    pub catch_radius: f32,

    // === Camera ===
    pub follow_distance: f32,
    pub follow_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            room: RoomBox::default(),

            orb_speed: 0.3,

            battery_drain: 0.1,
            flicker_chance_cap: 0.01,
            flicker_min_frames: 2,
            flicker_frames_per_factor: 20.0,

            pickup_spawn_chance: 0.005,
            max_pickups: 3,
            pickup_spawn_below: 80.0,
            pickup_radius: 2.0,
            pickup_charge: 20.0,

            pursuer_speed: 0.40,
            pursuer_jitter: 0.1,
            grace_period: 3.0,
            catch_radius: 2.0,

            follow_distance: 15.0,
            follow_height: 2.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning JSON document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the tick cannot honour
    pub fn validate(&self) -> Result<(), TuningError> {
        let room = &self.room;
        if !room.min.cmple(room.max).all() {
            return Err(TuningError::Invalid(format!(
                "room min {} exceeds max {}",
                room.min, room.max
            )));
        }

        let positive = [
            ("orb_speed", self.orb_speed),
            ("pursuer_speed", self.pursuer_speed),
            ("pickup_radius", self.pickup_radius),
            ("catch_radius", self.catch_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let probabilities = [
            ("flicker_chance_cap", self.flicker_chance_cap),
            ("pickup_spawn_chance", self.pickup_spawn_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Invalid(format!("{name} must be in [0, 1], got {value}")));
            }
        }

        if self.flicker_min_frames < 1 {
            return Err(TuningError::Invalid(
                "flicker_min_frames must be at least 1".to_string(),
            ));
        }

        if !(0.0..self.pursuer_speed).contains(&self.pursuer_jitter) {
            return Err(TuningError::Invalid(format!(
                "pursuer_jitter must be in [0, pursuer_speed), got {}",
                self.pursuer_jitter
            )));
        }

        let non_negative = [
            ("battery_drain", self.battery_drain),
            ("pickup_charge", self.pickup_charge),
            ("grace_period", self.grace_period),
            ("follow_distance", self.follow_distance),
            ("flicker_frames_per_factor", self.flicker_frames_per_factor),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        Ok(())
    }
}
