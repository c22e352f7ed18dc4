//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, driven by the host
//! - Injected RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod camera;
pub mod random;
pub mod state;
pub mod tick;

pub use random::{RandomSource, session_rng};
pub use state::{CameraFrame, Flicker, GameEvent, GamePhase, GameState, Orb, Pickup, Pursuer};
pub use tick::{TickInput, tick};
