//! Motion module for stepper-ramp.
//!
//! Provides ramp arithmetic and the step pulse state machine.

mod direction;
pub mod ramp;
mod state;

pub use direction::Direction;
pub use state::{Edge, MotionState, PulsePhase};

/// Floor speed used when none is configured, in steps/s.
pub const DEFAULT_MIN_SPEED: u16 = 100;
