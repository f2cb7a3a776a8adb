//! Rotation direction and its mapping onto the DIR line.

use embedded_hal::digital::PinState;
use serde::Deserialize;

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Clockwise (DIR high unless inverted).
    #[default]
    Clockwise,
    /// Counter-clockwise (DIR low unless inverted).
    CounterClockwise,
}

impl Direction {
    /// Get the sign multiplier applied to the step counter.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Level to drive on the DIR line.
    #[inline]
    pub fn pin_state(self, invert: bool) -> PinState {
        let high = matches!(self, Direction::Clockwise) != invert;
        PinState::from(high)
    }
}
