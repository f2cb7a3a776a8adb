//! Builder pattern for StepperController.

use core::num::NonZeroU16;

use embedded_hal::digital::OutputPin;

use crate::config::{MotorConfig, SystemConfig};
use crate::error::{short_name, ConfigError, Error, Result};
use crate::motion::{Direction, DEFAULT_MIN_SPEED};

use super::clock::MicrosClock;
use super::driver::StepperController;
use super::pins::AtomicOutputPin;
use super::state::Unready;

/// Builder for creating StepperController instances.
pub struct StepperControllerBuilder<STEP, DIR, CLK>
where
    STEP: AtomicOutputPin,
    DIR: OutputPin,
    CLK: MicrosClock,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    clock: Option<CLK>,
    name: Option<heapless::String<32>>,
    min_speed: u16,
    invert_direction: bool,
    initial_direction: Direction,
}

impl<STEP, DIR, CLK> Default for StepperControllerBuilder<STEP, DIR, CLK>
where
    STEP: AtomicOutputPin,
    DIR: OutputPin,
    CLK: MicrosClock,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, CLK> StepperControllerBuilder<STEP, DIR, CLK>
where
    STEP: AtomicOutputPin,
    DIR: OutputPin,
    CLK: MicrosClock,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            clock: None,
            name: None,
            min_speed: DEFAULT_MIN_SPEED,
            invert_direction: false,
            initial_direction: Direction::Clockwise,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the microsecond clock.
    pub fn clock(mut self, clock: CLK) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the motor name (truncated to 32 chars).
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(short_name(name));
        self
    }

    /// Set the floor speed in steps/s.
    pub fn min_speed(mut self, speed: u16) -> Self {
        self.min_speed = speed;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set the direction applied by `setup()`.
    pub fn initial_direction(mut self, direction: Direction) -> Self {
        self.initial_direction = direction;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.min_speed = config.min_speed.value();
        self.invert_direction = config.invert_direction;
        self.initial_direction = config.initial_direction;
        self
    }

    /// Configure from SystemConfig by motor name.
    ///
    /// The controller takes the configuration key as its name, which is what
    /// sequences refer to.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config
            .motor(motor_name)
            .ok_or_else(|| Error::Config(ConfigError::MotorNotFound(short_name(motor_name))))?;

        Ok(self.from_motor_config(motor_config).name(motor_name))
    }

    /// Build the StepperController.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin or the clock is missing, or the floor speed is zero.
    pub fn build(self) -> Result<StepperController<STEP, DIR, CLK, Unready>> {
        let step_pin = self
            .step_pin
            .ok_or(Error::Config(ConfigError::MissingField("step_pin")))?;

        let dir_pin = self
            .dir_pin
            .ok_or(Error::Config(ConfigError::MissingField("dir_pin")))?;

        let clock = self
            .clock
            .ok_or(Error::Config(ConfigError::MissingField("clock")))?;

        let min_speed = NonZeroU16::new(self.min_speed).ok_or(ConfigError::ZeroMinSpeed)?;

        let name = self.name.unwrap_or_else(|| short_name("motor"));

        Ok(StepperController::from_parts(
            step_pin,
            dir_pin,
            clock,
            min_speed,
            name,
            self.invert_direction,
            self.initial_direction,
        ))
    }
}
