//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::motion::{Direction, DEFAULT_MIN_SPEED};

use super::units::StepsPerSec;

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Floor speed; the motor counts as stopped at this rate. Must be > 0.
    #[serde(default = "default_min_speed")]
    pub min_speed: StepsPerSec,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Direction applied by `setup()`.
    #[serde(default)]
    pub initial_direction: Direction,
}

fn default_min_speed() -> StepsPerSec {
    StepsPerSec(DEFAULT_MIN_SPEED)
}

impl MotorConfig {
    /// Create a configuration with default floor speed and polarity.
    pub fn new(name: &str) -> Self {
        Self {
            name: crate::error::short_name(name),
            min_speed: default_min_speed(),
            invert_direction: false,
            initial_direction: Direction::Clockwise,
        }
    }

    /// Longest step period this motor will use, in microseconds.
    pub fn max_step_duration_us(&self) -> u32 {
        self.min_speed.period().value()
    }
}
