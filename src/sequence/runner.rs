//! Non-blocking execution of a command sequence.

use embedded_hal::digital::OutputPin;

use crate::config::SequenceConfig;
use crate::error::Result;
use crate::motor::{AtomicOutputPin, MicrosClock, Ready, StepperController};

/// Feeds a sequence's commands to a controller, one per completed command.
#[derive(Debug, Clone)]
pub struct SequenceRunner<'a> {
    sequence: &'a SequenceConfig,
    next: usize,
}

impl<'a> SequenceRunner<'a> {
    /// Start at the first command.
    pub fn new(sequence: &'a SequenceConfig) -> Self {
        Self { sequence, next: 0 }
    }

    /// All commands have been issued.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.next >= self.sequence.commands.len()
    }

    /// Issue pending commands if the motor is free, then tick it once.
    ///
    /// Commands that complete without stepping (jumps, direction changes,
    /// zero-length moves) are issued back to back in the same call. Returns
    /// `true` once every command has been issued and the last one completed;
    /// the motor then keeps cruising at the final speed on further ticks.
    pub fn poll<STEP, DIR, CLK>(
        &mut self,
        motor: &mut StepperController<STEP, DIR, CLK, Ready>,
    ) -> Result<bool>
    where
        STEP: AtomicOutputPin,
        DIR: OutputPin,
        CLK: MicrosClock,
    {
        while motor.has_reached_target() && !self.is_finished() {
            let command = self.sequence.commands[self.next];
            debug!("sequence step {=usize}: {}", self.next, command);
            self.next += 1;
            motor.apply(command)?;
        }

        let reached = motor.tick()?;
        let done = reached && self.is_finished();
        if done {
            trace!("sequence done at {=u16} steps/s", motor.current_speed());
        }
        Ok(done)
    }

    /// Poll until the sequence completes (blocking).
    pub fn run_to_end<STEP, DIR, CLK>(
        &mut self,
        motor: &mut StepperController<STEP, DIR, CLK, Ready>,
    ) -> Result<()>
    where
        STEP: AtomicOutputPin,
        DIR: OutputPin,
        CLK: MicrosClock,
    {
        while !self.poll(motor)? {}
        Ok(())
    }
}
