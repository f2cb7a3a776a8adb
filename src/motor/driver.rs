//! Stepper motor controller.
//!
//! Generic over embedded-hal 1.0 pin types and a microsecond clock, with
//! type-state safety around `setup()`.

use core::marker::PhantomData;
use core::num::NonZeroU16;

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::MotionCommand;
use crate::error::{short_name, ConfigError, Error, MotorError, Result, SequenceError};
use crate::motion::{Direction, Edge, MotionState, PulsePhase, DEFAULT_MIN_SPEED};
use crate::sequence::{SequenceRegistry, SequenceRunner};

use super::clock::MicrosClock;
use super::pins::AtomicOutputPin;
use super::position::Position;
use super::state::{MotorState, Ready, StateName, Unready};

const DEFAULT_FLOOR: NonZeroU16 = match NonZeroU16::new(DEFAULT_MIN_SPEED) {
    Some(speed) => speed,
    None => panic!("DEFAULT_MIN_SPEED must be non-zero"),
};

/// Ramped step/direction controller for one motor.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `AtomicOutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `CLK`: Microsecond clock (must implement `MicrosClock`)
/// - `STATE`: Type-state marker (defaults to `Ready`)
pub struct StepperController<STEP, DIR, CLK, STATE = Ready>
where
    STEP: AtomicOutputPin,
    DIR: OutputPin,
    CLK: MicrosClock,
    STATE: MotorState,
{
    /// STEP pin (one pulse per step).
    step_pin: STEP,

    /// DIR pin (high = CW, low = CCW, or inverted).
    dir_pin: DIR,

    /// Time source for pulse timing.
    clock: CLK,

    /// Speeds, ramp and pulse cycle.
    motion: MotionState,

    /// Steps emitted since the origin.
    position: Position,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Direction applied by `setup()`.
    initial_direction: Direction,

    /// Type-state marker.
    _state: PhantomData<STATE>,
}

impl<STEP, DIR, CLK, STATE> StepperController<STEP, DIR, CLK, STATE>
where
    STEP: AtomicOutputPin,
    DIR: OutputPin,
    CLK: MicrosClock,
    STATE: MotorState + StateName,
{
    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Floor speed in steps/s.
    #[inline]
    pub fn min_speed(&self) -> u16 {
        self.motion.min_speed()
    }

    /// Read-only view of the motion state.
    #[inline]
    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    /// Get the current state name.
    #[inline]
    pub fn state_name(&self) -> &'static str {
        STATE::name()
    }

    /// Give back the STEP line, DIR line and clock.
    pub fn release(self) -> (STEP, DIR, CLK) {
        (self.step_pin, self.dir_pin, self.clock)
    }
}

impl<STEP, DIR, CLK> StepperController<STEP, DIR, CLK, Unready>
where
    STEP: AtomicOutputPin,
    DIR: OutputPin,
    CLK: MicrosClock,
{
    /// Create a controller with the given floor speed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroMinSpeed` if `min_speed` is zero.
    pub fn new(step_pin: STEP, dir_pin: DIR, clock: CLK, min_speed: u16) -> Result<Self> {
        let min_speed = NonZeroU16::new(min_speed).ok_or(ConfigError::ZeroMinSpeed)?;
        Ok(Self::from_parts(
            step_pin,
            dir_pin,
            clock,
            min_speed,
            short_name("motor"),
            false,
            Direction::Clockwise,
        ))
    }

    /// Create a controller with the default floor speed of
    /// [`DEFAULT_MIN_SPEED`] steps/s.
    pub fn with_default_min_speed(step_pin: STEP, dir_pin: DIR, clock: CLK) -> Self {
        Self::from_parts(
            step_pin,
            dir_pin,
            clock,
            DEFAULT_FLOOR,
            short_name("motor"),
            false,
            Direction::Clockwise,
        )
    }

    pub(crate) fn from_parts(
        step_pin: STEP,
        dir_pin: DIR,
        clock: CLK,
        min_speed: NonZeroU16,
        name: heapless::String<32>,
        invert_direction: bool,
        initial_direction: Direction,
    ) -> Self {
        let now = clock.now();
        Self {
            step_pin,
            dir_pin,
            clock,
            motion: MotionState::new(min_speed, now),
            position: Position::new(),
            name,
            invert_direction,
            initial_direction,
            _state: PhantomData,
        }
    }

    /// Drive both lines to a known level and reset the motion state.
    ///
    /// STEP goes low, DIR takes the initial direction, and the pulse cycle is
    /// timed from now.
    ///
    /// The initial direction is clockwise by default. Setting another one
    /// through the builder or configuration changes that contract: setup then
    /// leaves the motor counter-clockwise, so code expecting setup to always
    /// select clockwise must keep the default.
    ///
    /// Returns the controller in the `Ready` state.
    ///
    /// # Errors
    ///
    /// Hands the controller back with `MotorError::PinError` if either line
    /// cannot be written.
    pub fn setup(
        mut self,
    ) -> core::result::Result<StepperController<STEP, DIR, CLK, Ready>, (Self, Error)> {
        if self.step_pin.write_atomic(PinState::Low).is_err() {
            return Err((self, Error::Motor(MotorError::PinError)));
        }

        let direction = self.initial_direction;
        if self.dir_pin.set_state(direction.pin_state(self.invert_direction)).is_err() {
            return Err((self, Error::Motor(MotorError::PinError)));
        }

        let now = self.clock.now();
        self.motion.reset(now);
        self.motion.set_direction(direction);

        info!(
            "{=str}: ready, min speed {=u16} steps/s",
            self.name.as_str(),
            self.motion.min_speed()
        );

        Ok(StepperController {
            step_pin: self.step_pin,
            dir_pin: self.dir_pin,
            clock: self.clock,
            motion: self.motion,
            position: self.position,
            name: self.name,
            invert_direction: self.invert_direction,
            initial_direction: self.initial_direction,
            _state: PhantomData,
        })
    }
}

impl<STEP, DIR, CLK> StepperController<STEP, DIR, CLK, Ready>
where
    STEP: AtomicOutputPin,
    DIR: OutputPin,
    CLK: MicrosClock,
{
    /// Drive the DIR line.
    ///
    /// Does not touch step timing. Reversing in the middle of a ramp is
    /// allowed; sequencing it safely is up to the caller.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        self.dir_pin
            .set_state(direction.pin_state(self.invert_direction))
            .map_err(|_| MotorError::PinError)?;
        self.motion.set_direction(direction);
        Ok(())
    }

    /// Ramp linearly from the current speed to `target_speed` within `steps`.
    ///
    /// A target below the floor speed is a request to stop: the ramp ends at
    /// the floor and the motor then idles. Calling this during another
    /// command replaces it, starting from whatever speed was reached.
    ///
    /// `steps` should be at least 1. With zero steps there is nothing to
    /// spread the change over and the speed jumps as with
    /// [`jump_to_speed`](Self::jump_to_speed).
    ///
    /// Only sets parameters; call [`tick`](Self::tick) to move.
    pub fn ramp_to_speed(&mut self, target_speed: u16, steps: u32) {
        if steps == 0 {
            warn!(
                "{=str}: zero-step ramp to {=u16}, jumping",
                self.name.as_str(),
                target_speed
            );
        }
        self.motion.ramp_to_speed(target_speed, steps);
        debug!(
            "{=str}: ramp {=u16} -> {=u16} over {=u32} steps, accel {=i32}",
            self.name.as_str(),
            self.motion.current_speed(),
            self.motion.target_speed(),
            steps,
            self.motion.acceleration()
        );
    }

    /// Same as [`ramp_to_speed`](Self::ramp_to_speed); reads better when speeding up.
    #[inline]
    pub fn accelerate(&mut self, target_speed: u16, steps: u32) {
        self.ramp_to_speed(target_speed, steps);
    }

    /// Same as [`ramp_to_speed`](Self::ramp_to_speed); reads better when slowing down.
    #[inline]
    pub fn decelerate(&mut self, target_speed: u16, steps: u32) {
        self.ramp_to_speed(target_speed, steps);
    }

    /// Run `steps` more steps at the current speed.
    ///
    /// A motor at full stop stays stopped; ramp up first.
    pub fn move_at_current_speed(&mut self, steps: u32) {
        self.motion.move_at_current_speed(steps);
        debug!(
            "{=str}: move {=u32} steps at {=u16}",
            self.name.as_str(),
            steps,
            self.motion.current_speed()
        );
    }

    /// Switch to `speed` from the next step on, with no ramp.
    pub fn jump_to_speed(&mut self, speed: u16) {
        self.motion.jump_to_speed(speed);
        debug!(
            "{=str}: jump to {=u16}",
            self.name.as_str(),
            self.motion.current_speed()
        );
    }

    /// Issue one configured command.
    pub fn apply(&mut self, command: MotionCommand) -> Result<()> {
        match command {
            MotionCommand::Ramp { target_speed, steps } => self.ramp_to_speed(target_speed, steps),
            MotionCommand::Move { steps } => self.move_at_current_speed(steps),
            MotionCommand::Jump { speed } => self.jump_to_speed(speed),
            MotionCommand::Direction(direction) => self.set_direction(direction)?,
        }
        Ok(())
    }

    /// Whether the last command has run all its steps.
    #[inline]
    pub fn has_reached_target(&self) -> bool {
        self.motion.has_reached_target()
    }

    /// Motor is at the floor speed and meant to stay there.
    #[inline]
    pub fn is_full_stop(&self) -> bool {
        self.motion.is_full_stop()
    }

    /// Instantaneous speed in steps/s.
    #[inline]
    pub fn current_speed(&self) -> u16 {
        self.motion.current_speed()
    }

    /// Speed the active command is heading for.
    #[inline]
    pub fn target_speed(&self) -> u16 {
        self.motion.target_speed()
    }

    /// Steps left in the active command.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.motion.steps_remaining()
    }

    /// Fixed-point per-step speed delta (×100).
    #[inline]
    pub fn acceleration(&self) -> i32 {
        self.motion.acceleration()
    }

    /// Direction currently applied.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.motion.direction()
    }

    /// Half of the pulse cycle in progress.
    #[inline]
    pub fn pulse_phase(&self) -> PulsePhase {
        self.motion.pulse_phase()
    }

    /// Steps emitted since the origin, signed by direction.
    #[inline]
    pub fn position(&self) -> i64 {
        self.position.steps()
    }

    /// Overwrite the step count.
    #[inline]
    pub fn set_position(&mut self, steps: i64) {
        self.position.set_steps(steps);
    }

    /// Set the current position as the origin (zero).
    #[inline]
    pub fn set_origin(&mut self) {
        self.position.set_origin();
    }

    /// Advance the pulse cycle by at most one edge. Never waits.
    ///
    /// Call as often as possible; a late call only delays the next edge.
    /// Returns `true` when the last command has run all its steps or the
    /// motor is at full stop. After a command completes, further calls keep
    /// stepping at the reached speed unless that is a full stop.
    pub fn tick(&mut self) -> Result<bool> {
        if self.motion.is_full_stop() {
            self.motion.settle();
            return Ok(true);
        }

        let now = self.clock.now();
        match self.motion.due_edge(now) {
            Some(Edge::Falling) => {
                self.write_step(PinState::Low)?;
                self.motion.complete_falling_edge();
            }
            Some(Edge::Rising) => {
                self.write_step(PinState::High)?;
                self.motion.complete_rising_edge(now);
                self.position.record_step(self.motion.direction());
            }
            None => {}
        }

        Ok(self.motion.has_reached_target())
    }

    /// Tick until the last command completes.
    ///
    /// Blocks the caller; don't use it in a run loop that has other work.
    pub fn run_to_target(&mut self) -> Result<()> {
        while !self.tick()? {}
        Ok(())
    }

    /// Run a named sequence from a registry to completion (blocking).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sequence is not in the registry
    /// - The sequence is written for another motor
    /// - A pin write fails
    pub fn execute(&mut self, sequence_name: &str, registry: &SequenceRegistry) -> Result<()> {
        let sequence = registry.get_or_error(sequence_name)?;

        if sequence.motor.as_str() != self.name.as_str() {
            return Err(Error::Sequence(SequenceError::MotorMismatch {
                expected: sequence.motor.clone(),
                actual: self.name.clone(),
            }));
        }

        SequenceRunner::new(sequence).run_to_end(self)
    }

    fn write_step(&mut self, state: PinState) -> Result<()> {
        self.step_pin
            .write_atomic(state)
            .map_err(|_| Error::Motor(MotorError::PinError))
    }
}
