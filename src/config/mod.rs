//! Configuration module for stepper-ramp.
//!
//! Provides types for loading and validating motor and sequence configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod motor;
mod sequence;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use sequence::{MotionCommand, SequenceConfig, MAX_COMMANDS};
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Micros, StepsPerSec};
