//! Motor module for stepper-ramp.
//!
//! Provides the stepper controller with type-state safety, its hardware
//! collaborators and step counting.

mod builder;
mod clock;
mod driver;
mod pins;
mod position;
pub mod state;

pub use builder::StepperControllerBuilder;
pub use clock::MicrosClock;
#[cfg(feature = "std")]
pub use clock::MonotonicClock;
pub use driver::StepperController;
pub use pins::{AtomicOutputPin, Interlocked};
pub use position::Position;
pub use state::{MotorState, Ready, StateName, Unready};
