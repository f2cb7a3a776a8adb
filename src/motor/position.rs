//! Open-loop step counting.

use crate::motion::Direction;

/// Signed count of steps emitted since the origin.
///
/// Stepper motors are open loop: this is the number of pulses sent, not a
/// measured shaft position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    steps: i64,
}

impl Position {
    /// Create a counter at the origin.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count.
    #[inline]
    pub fn steps(&self) -> i64 {
        self.steps
    }

    /// Overwrite the count.
    #[inline]
    pub fn set_steps(&mut self, steps: i64) {
        self.steps = steps;
    }

    /// Count one step in `direction`.
    #[inline]
    pub fn record_step(&mut self, direction: Direction) {
        self.steps = self.steps.wrapping_add(direction.sign());
    }

    /// Set current position as the new origin.
    #[inline]
    pub fn set_origin(&mut self) {
        self.steps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_both_ways() {
        let mut pos = Position::new();
        for _ in 0..5 {
            pos.record_step(Direction::Clockwise);
        }
        pos.record_step(Direction::CounterClockwise);
        assert_eq!(pos.steps(), 4);

        pos.set_origin();
        pos.record_step(Direction::CounterClockwise);
        assert_eq!(pos.steps(), -1);
    }
}
