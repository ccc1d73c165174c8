//! Controller configuration parameters
//!
//! All tunable parameters for the airlock controller.
//! Values can be supplied by the host as JSON; missing fields take defaults.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirlockConfig {
    // --- Doors ---
    /// Disable doors while a side is open or the chamber is cycling, so
    /// crew cannot re-trigger them by hand.
    pub change_enabled_state: bool,

    // --- Vents ---
    /// Seconds a vent may report (de)pressurizing before it is treated as done
    pub vent_max_wait_secs: u32,
    /// Oxygen fraction at or below which a vent counts as depressurized
    pub oxygen_floor: f32,

    // --- Timing ---
    /// Expected interval between periodic ticks (milliseconds)
    pub tick_interval_ms: u32,
}

impl Default for AirlockConfig {
    fn default() -> Self {
        Self {
            change_enabled_state: false,

            vent_max_wait_secs: 15,
            oxygen_floor: 0.0001,

            tick_interval_ms: 166, // every 10 frames at 60 Hz
        }
    }
}

impl AirlockConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field.  Out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if !(1..=600).contains(&self.vent_max_wait_secs) {
            return Err(ConfigError::ValidationFailed(
                "vent_max_wait_secs must be 1–600",
            ));
        }
        if !(0.0..=0.1).contains(&self.oxygen_floor) {
            return Err(ConfigError::ValidationFailed(
                "oxygen_floor must be 0.0–0.1",
            ));
        }
        if !(16..=5000).contains(&self.tick_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "tick_interval_ms must be 16–5000",
            ));
        }
        Ok(())
    }
}
