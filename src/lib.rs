//! # stepper-ramp
//!
//! Non-blocking step/direction stepper control with linear speed ramps and
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Non-blocking**: `tick()` does O(1) work and never waits; call it from your run loop
//! - **Linear ramps**: reach a target speed within an exact number of steps
//! - **Interruptible**: a new command supersedes the one in flight from the speed already reached
//! - **Wrap-safe timing**: elapsed time uses wrapping `u32` microsecond arithmetic
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR, critical-section guarded step writes
//! - **Type-state safety**: motion commands only exist after `setup()`
//! - **Configuration-driven sequences**: named command lists in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_ramp::{Interlocked, StepperController};
//!
//! let motor = StepperController::new(Interlocked::new(step_pin), dir_pin, clock, 100)?;
//! let mut motor = motor.setup()?;
//!
//! // Reach 1100 steps/s within 10 steps, then keep cruising
//! motor.ramp_to_speed(1100, 10);
//! loop {
//!     motor.tick()?;
//!     // ... other cooperative work
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and the `Instant`-backed clock
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod sequence;

// Re-exports for ergonomic API
pub use config::{validate_config, MotionCommand, MotorConfig, SequenceConfig, SystemConfig};
pub use error::{Error, Result};
pub use motion::{Direction, MotionState, PulsePhase, DEFAULT_MIN_SPEED};
pub use motor::{state, AtomicOutputPin, Interlocked, MicrosClock, StepperController};
pub use sequence::{SequenceRegistry, SequenceRunner};

#[cfg(feature = "std")]
pub use motor::MonotonicClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Unit types
pub use config::units::{Micros, StepsPerSec};
