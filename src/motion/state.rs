//! Motion state and the step pulse state machine.
//!
//! [`MotionState`] is pure bookkeeping: it decides which edge is due and
//! applies the ramp, while the controller owns the pins and the clock.

use core::num::NonZeroU16;

use crate::config::units::{Micros, StepsPerSec};

use super::direction::Direction;
use super::ramp::{next_ramp_speed, ramp_acceleration};

/// Which half of the step pulse cycle is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulsePhase {
    /// STEP is high; waiting for the pulse width to elapse.
    PulseHigh,
    /// STEP is low; waiting for the rest of the period before the next step.
    PulseLowWait,
}

/// Edge due on the STEP line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// End of the active pulse.
    Falling,
    /// Start of the next step.
    Rising,
}

/// Everything a single motor needs to ramp and time its steps.
#[derive(Debug, Clone)]
pub struct MotionState {
    min_speed: u16,
    max_step_duration: Micros,
    current_speed: u16,
    target_speed: u16,
    is_target_full_stop: bool,
    steps_remaining: u32,
    /// Per-step speed delta, ×100.
    acceleration: i32,
    pulse_phase: PulsePhase,
    step_duration: Micros,
    step_pulse_duration: Micros,
    last_step_time: Micros,
    direction: Direction,
}

impl MotionState {
    /// Create a stopped state at the floor speed.
    pub fn new(min_speed: NonZeroU16, now: Micros) -> Self {
        let max_step_duration = StepsPerSec(min_speed.get()).period();
        Self {
            min_speed: min_speed.get(),
            max_step_duration,
            current_speed: min_speed.get(),
            target_speed: min_speed.get(),
            is_target_full_stop: true,
            steps_remaining: 0,
            acceleration: 0,
            pulse_phase: PulsePhase::PulseHigh,
            step_duration: max_step_duration,
            step_pulse_duration: max_step_duration / 2,
            last_step_time: now,
            direction: Direction::Clockwise,
        }
    }

    /// Return to the stopped state, timing the pulse cycle from `now`.
    pub fn reset(&mut self, now: Micros) {
        let min_speed = self.min_speed;
        self.direction = Direction::Clockwise;
        self.pulse_phase = PulsePhase::PulseHigh;
        self.last_step_time = now;
        self.current_speed = min_speed;
        self.step_duration = self.max_step_duration;
        self.step_pulse_duration = self.max_step_duration / 2;
        self.target_speed = min_speed;
        self.steps_remaining = 0;
        self.acceleration = 0;
        self.is_target_full_stop = true;
    }

    /// Floor speed in steps/s.
    #[inline]
    pub fn min_speed(&self) -> u16 {
        self.min_speed
    }

    /// Step period used at the floor speed.
    #[inline]
    pub fn max_step_duration(&self) -> Micros {
        self.max_step_duration
    }

    /// Instantaneous step rate in steps/s.
    #[inline]
    pub fn current_speed(&self) -> u16 {
        self.current_speed
    }

    /// Speed the active command is heading for.
    #[inline]
    pub fn target_speed(&self) -> u16 {
        self.target_speed
    }

    /// Whether the requested target was below the floor speed.
    #[inline]
    pub fn is_target_full_stop(&self) -> bool {
        self.is_target_full_stop
    }

    /// Steps left in the active command.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.steps_remaining
    }

    /// Fixed-point per-step speed delta (×100).
    #[inline]
    pub fn acceleration(&self) -> i32 {
        self.acceleration
    }

    /// Current half of the pulse cycle.
    #[inline]
    pub fn pulse_phase(&self) -> PulsePhase {
        self.pulse_phase
    }

    /// Full period between rising edges.
    #[inline]
    pub fn step_duration(&self) -> Micros {
        self.step_duration
    }

    /// Width of the active pulse.
    #[inline]
    pub fn step_pulse_duration(&self) -> Micros {
        self.step_pulse_duration
    }

    /// Timestamp of the last rising edge.
    #[inline]
    pub fn last_step_time(&self) -> Micros {
        self.last_step_time
    }

    /// Direction applied to the DIR line.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Record the direction applied to the DIR line.
    #[inline]
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Whether the active command has run out of steps.
    #[inline]
    pub fn has_reached_target(&self) -> bool {
        self.steps_remaining == 0
    }

    /// Motor is at the floor speed and meant to stay there.
    #[inline]
    pub fn is_full_stop(&self) -> bool {
        self.current_speed == self.min_speed && self.is_target_full_stop
    }

    /// Ramp linearly from the current speed to `target_speed` within `steps`.
    ///
    /// Supersedes any command in flight. A zero-step ramp cannot spread a
    /// speed change over anything and is executed as [`jump_to_speed`].
    ///
    /// [`jump_to_speed`]: MotionState::jump_to_speed
    pub fn ramp_to_speed(&mut self, target_speed: u16, steps: u32) {
        if steps == 0 {
            self.jump_to_speed(target_speed);
            return;
        }

        self.set_target_speed(target_speed);
        self.steps_remaining = steps;
        self.acceleration = ramp_acceleration(self.current_speed, self.target_speed, steps);
    }

    /// Run `steps` more steps at the current speed.
    pub fn move_at_current_speed(&mut self, steps: u32) {
        self.steps_remaining = steps;
        self.acceleration = 0;
    }

    /// Switch to `speed` on the next step, without a ramp.
    pub fn jump_to_speed(&mut self, speed: u16) {
        self.steps_remaining = 0;
        self.acceleration = 0;
        self.set_target_speed(speed);
        self.set_speed(speed);
    }

    /// Drop any steps left, as when the motor settles into a full stop.
    #[inline]
    pub fn settle(&mut self) {
        self.steps_remaining = 0;
    }

    /// Edge due at `now`, if any.
    pub fn due_edge(&self, now: Micros) -> Option<Edge> {
        let elapsed = now.elapsed_since(self.last_step_time);
        match self.pulse_phase {
            PulsePhase::PulseHigh if elapsed >= self.step_pulse_duration => Some(Edge::Falling),
            PulsePhase::PulseLowWait if elapsed >= self.step_duration => Some(Edge::Rising),
            _ => None,
        }
    }

    /// Record that the active pulse ended.
    #[inline]
    pub fn complete_falling_edge(&mut self) {
        self.pulse_phase = PulsePhase::PulseLowWait;
    }

    /// Record a step started at `now` and advance the ramp.
    ///
    /// Returns `true` if the step belonged to the active command.
    pub fn complete_rising_edge(&mut self, now: Micros) -> bool {
        self.pulse_phase = PulsePhase::PulseHigh;
        self.last_step_time = now;

        if self.has_reached_target() {
            return false;
        }

        self.steps_remaining -= 1;
        if self.acceleration != 0 {
            let speed = next_ramp_speed(
                self.current_speed,
                self.target_speed,
                self.acceleration,
                self.steps_remaining,
            );
            self.set_speed(self.hold_above_floor(speed));
        }
        true
    }

    /// Keep a ramp into full stop off the floor until its last step.
    ///
    /// Reaching the floor early would make [`is_full_stop`] true with steps
    /// still owed, and the idle check would drop them.
    ///
    /// [`is_full_stop`]: MotionState::is_full_stop
    fn hold_above_floor(&self, speed: u16) -> u16 {
        if !self.is_target_full_stop || self.steps_remaining == 0 {
            return speed;
        }
        let floor = self.min_speed.saturating_add(1).min(self.current_speed);
        speed.max(floor)
    }

    fn set_target_speed(&mut self, speed: u16) {
        if speed < self.min_speed {
            self.target_speed = self.min_speed;
            self.is_target_full_stop = true;
        } else {
            self.target_speed = speed;
            self.is_target_full_stop = false;
        }
    }

    fn set_speed(&mut self, speed: u16) {
        if speed == self.current_speed {
            return;
        }

        if speed <= self.min_speed {
            self.current_speed = self.min_speed;
            self.step_duration = self.max_step_duration;
        } else {
            self.current_speed = speed;
            self.step_duration = StepsPerSec(speed).period();
        }

        self.step_pulse_duration = self.step_duration / 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(min_speed: u16) -> MotionState {
        MotionState::new(NonZeroU16::new(min_speed).unwrap(), Micros(0))
    }

    /// Drive one full pulse cycle, returning the time of the rising edge.
    fn advance(state: &mut MotionState, now: &mut u32) -> u32 {
        *now = now.wrapping_add(state.step_pulse_duration().value());
        assert_eq!(state.due_edge(Micros(*now)), Some(Edge::Falling));
        state.complete_falling_edge();

        *now = state.last_step_time().value().wrapping_add(state.step_duration().value());
        assert_eq!(state.due_edge(Micros(*now)), Some(Edge::Rising));
        state.complete_rising_edge(Micros(*now));
        *now
    }

    #[test]
    fn test_new_is_stopped() {
        let s = state(100);
        assert_eq!(s.current_speed(), 100);
        assert_eq!(s.max_step_duration(), Micros(10_000));
        assert_eq!(s.step_pulse_duration(), Micros(5_000));
        assert!(s.has_reached_target());
        assert!(s.is_full_stop());
        assert_eq!(s.pulse_phase(), PulsePhase::PulseHigh);
    }

    #[test]
    fn test_speeds_below_floor_mean_stop() {
        let mut s = state(100);
        s.jump_to_speed(40);
        assert_eq!(s.current_speed(), 100);
        assert_eq!(s.target_speed(), 100);
        assert!(s.is_target_full_stop());

        s.jump_to_speed(500);
        s.ramp_to_speed(0, 20);
        assert_eq!(s.target_speed(), 100);
        assert!(s.is_target_full_stop());
        assert_eq!(s.steps_remaining(), 20);
    }

    #[test]
    fn test_rising_from_rest_scenario() {
        let mut s = state(100);
        s.ramp_to_speed(1100, 10);
        assert_eq!(s.acceleration(), 10_000);
        assert!(!s.has_reached_target());
        assert!(!s.is_full_stop());

        let mut now = 0;
        let mut speeds = [0u16; 10];
        for speed in speeds.iter_mut() {
            advance(&mut s, &mut now);
            *speed = s.current_speed();
        }

        assert_eq!(speeds, [200, 300, 400, 500, 600, 700, 800, 900, 1000, 1100]);
        assert_eq!(s.steps_remaining(), 0);
        assert_eq!(s.step_duration(), Micros(909));
        assert_eq!(s.step_pulse_duration(), Micros(454));
    }

    #[test]
    fn test_deceleration_to_stop() {
        let mut s = state(100);
        s.jump_to_speed(1100);
        s.ramp_to_speed(0, 10);
        assert_eq!(s.acceleration(), -10_000);

        let mut now = 0;
        let mut last = s.current_speed();
        for _ in 0..10 {
            advance(&mut s, &mut now);
            assert!(s.current_speed() <= last);
            last = s.current_speed();
        }

        assert_eq!(s.current_speed(), 100);
        assert!(s.is_full_stop());
        assert_eq!(s.step_duration(), Micros(10_000));
    }

    #[test]
    fn test_shallow_stop_ramp_stays_off_floor_until_last_step() {
        let mut s = state(100);
        s.jump_to_speed(150);
        s.ramp_to_speed(0, 100);
        assert_eq!(s.acceleration(), -50);

        let mut now = 0;
        for _ in 0..99 {
            advance(&mut s, &mut now);
            assert!(!s.is_full_stop());
            assert!(s.current_speed() > 100);
        }
        assert_eq!(s.steps_remaining(), 1);

        advance(&mut s, &mut now);
        assert_eq!(s.steps_remaining(), 0);
        assert!(s.is_full_stop());
    }

    #[test]
    fn test_no_op_before_pulse_width() {
        let mut s = state(100);
        s.ramp_to_speed(1100, 10);
        let before = s.clone();

        assert_eq!(s.due_edge(Micros(4_999)), None);
        assert_eq!(s.pulse_phase(), before.pulse_phase());
        assert_eq!(s.last_step_time(), before.last_step_time());
        assert_eq!(s.steps_remaining(), before.steps_remaining());
    }

    #[test]
    fn test_low_phase_waits_for_full_period() {
        let mut s = state(100);
        s.move_at_current_speed(3);
        assert_eq!(s.due_edge(Micros(5_000)), Some(Edge::Falling));
        s.complete_falling_edge();
        assert_eq!(s.due_edge(Micros(9_999)), None);
        assert_eq!(s.due_edge(Micros(10_000)), Some(Edge::Rising));
    }

    #[test]
    fn test_overwrite_starts_from_reached_speed() {
        let mut s = state(100);
        s.ramp_to_speed(1100, 10);

        let mut now = 0;
        for _ in 0..4 {
            advance(&mut s, &mut now);
        }
        assert_eq!(s.current_speed(), 500);

        s.ramp_to_speed(100, 4);
        assert_eq!(s.steps_remaining(), 4);
        assert_eq!(s.acceleration(), -10_000);

        advance(&mut s, &mut now);
        assert_eq!(s.current_speed(), 400);
    }

    #[test]
    fn test_move_keeps_speed() {
        let mut s = state(100);
        s.jump_to_speed(750);
        s.move_at_current_speed(5);

        let mut now = 0;
        for _ in 0..5 {
            advance(&mut s, &mut now);
            assert_eq!(s.current_speed(), 750);
        }
        assert!(s.has_reached_target());
    }

    #[test]
    fn test_jump_scenario() {
        let mut s = state(100);
        s.ramp_to_speed(1100, 10);
        s.jump_to_speed(500);
        assert_eq!(s.current_speed(), 500);
        assert_eq!(s.target_speed(), 500);
        assert_eq!(s.steps_remaining(), 0);
        assert_eq!(s.acceleration(), 0);
        assert_eq!(s.step_duration(), Micros(2_000));
    }

    #[test]
    fn test_zero_step_ramp_jumps() {
        let mut s = state(100);
        s.ramp_to_speed(800, 0);
        assert_eq!(s.current_speed(), 800);
        assert_eq!(s.target_speed(), 800);
        assert!(s.has_reached_target());
        assert!(!s.is_target_full_stop());

        s.ramp_to_speed(0, 0);
        assert!(s.is_full_stop());
    }

    #[test]
    fn test_cruise_after_target_does_not_count() {
        let mut s = state(100);
        s.jump_to_speed(400);
        let mut now = 0;
        advance(&mut s, &mut now);
        assert_eq!(s.steps_remaining(), 0);
        assert_eq!(s.current_speed(), 400);
    }

    #[test]
    fn test_edges_across_clock_wrap() {
        let start = u32::MAX - 2_000;
        let mut s = MotionState::new(NonZeroU16::new(100).unwrap(), Micros(start));
        s.move_at_current_speed(2);

        assert_eq!(s.due_edge(Micros(u32::MAX)), None);
        let after_wrap = start.wrapping_add(5_000);
        assert!(after_wrap < start);
        assert_eq!(s.due_edge(Micros(after_wrap)), Some(Edge::Falling));

        let mut now = start;
        let rise = advance(&mut s, &mut now);
        assert_eq!(rise, start.wrapping_add(10_000));
        assert_eq!(s.steps_remaining(), 1);
    }

    #[test]
    fn test_reset_restores_stop() {
        let mut s = state(250);
        s.set_direction(Direction::CounterClockwise);
        s.ramp_to_speed(1000, 3);
        s.reset(Micros(42));
        assert_eq!(s.current_speed(), 250);
        assert_eq!(s.last_step_time(), Micros(42));
        assert_eq!(s.direction(), Direction::Clockwise);
        assert!(s.is_full_stop());
        assert_eq!(s.step_duration(), Micros(4_000));
    }
}
