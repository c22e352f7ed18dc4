//! HUD display mappings
//!
//! Pure helpers the presentation layer uses to draw the battery bar and the
//! survival timer. Nothing here feeds back into the simulation.

use serde::{Deserialize, Serialize};

/// Battery bar colour band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryBand {
    Green,
    Yellow,
    Red,
}

impl BatteryBand {
    pub fn from_battery(battery: f32) -> Self {
        if battery > 50.0 {
            BatteryBand::Green
        } else if battery > 20.0 {
            BatteryBand::Yellow
        } else {
            BatteryBand::Red
        }
    }

    /// CSS colour for the bar fill
    pub fn css(&self) -> &'static str {
        match self {
            BatteryBand::Green => "#0f0",
            BatteryBand::Yellow => "#ff0",
            BatteryBand::Red => "#f00",
        }
    }
}

/// CSS width of the battery bar
pub fn battery_bar_width(battery: f32) -> String {
    format!("{}%", battery.clamp(0.0, 100.0))
}

pub fn time_survived_label(seconds: f32) -> String {
    format!("Time Survived: {:.2}s", seconds)
}
