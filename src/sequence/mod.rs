//! Sequence module for stepper-ramp.
//!
//! Provides named sequence storage and lookup, and a runner that feeds
//! commands to a controller from the run loop.

mod registry;
mod runner;

pub use registry::{SequenceRegistry, MAX_SEQUENCES};
pub use runner::SequenceRunner;
