//! Controller type-state markers.
//!
//! A controller is created `Unready` and only `setup()` turns it into a
//! `Ready` one, so no motion command or tick can run before setup.

/// Created, pins not yet driven, clock not yet sampled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unready;

/// Set up and accepting motion commands.
#[derive(Debug, Clone, Copy)]
pub struct Ready;

/// Trait for controller states.
pub trait MotorState: private::Sealed {}

impl MotorState for Unready {}
impl MotorState for Ready {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Unready {}
    impl Sealed for super::Ready {}
}

/// State name for display/debugging.
pub trait StateName {
    /// Get the state name as a static string.
    fn name() -> &'static str;
}

impl StateName for Unready {
    fn name() -> &'static str {
        "Unready"
    }
}

impl StateName for Ready {
    fn name() -> &'static str {
        "Ready"
    }
}
