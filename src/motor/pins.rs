//! STEP line output with an interrupt-safe write.

use embedded_hal::digital::{ErrorType, OutputPin, PinState};

/// An output line whose level can be changed without being torn by an
/// interrupt handler that shares the same port register.
pub trait AtomicOutputPin: OutputPin {
    /// Drive the line to `state` as one uninterruptible operation.
    fn write_atomic(&mut self, state: PinState) -> Result<(), Self::Error>;
}

/// Wraps any `OutputPin` so its writes run inside a critical section.
///
/// The critical section saves the interrupt-enable state on entry and puts
/// back exactly that state on exit, so a write issued with interrupts
/// already masked leaves them masked.
#[derive(Debug)]
pub struct Interlocked<P> {
    pin: P,
}

impl<P: OutputPin> Interlocked<P> {
    /// Wrap a pin.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Get the wrapped pin back.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> ErrorType for Interlocked<P> {
    type Error = P::Error;
}

impl<P: OutputPin> OutputPin for Interlocked<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }
}

impl<P: OutputPin> AtomicOutputPin for Interlocked<P> {
    fn write_atomic(&mut self, state: PinState) -> Result<(), Self::Error> {
        critical_section::with(|_| self.pin.set_state(state))
    }
}
