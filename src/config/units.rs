//! Unit types for step rates and durations.
//!
//! Keeps steps/second and microseconds apart so a period is never mistaken
//! for a rate.

use core::ops::Div;

use serde::Deserialize;

/// Microseconds in one second.
pub const MICROS_PER_SEC: u32 = 1_000_000;

/// Step rate in steps per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct StepsPerSec(pub u16);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Time between two consecutive steps at this rate.
    ///
    /// A zero rate has no finite period; it maps to `Micros::MAX`.
    #[inline]
    pub const fn period(self) -> Micros {
        if self.0 == 0 {
            Micros::MAX
        } else {
            Micros(MICROS_PER_SEC / self.0 as u32)
        }
    }
}

impl From<u16> for StepsPerSec {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Duration or timestamp in microseconds.
///
/// Timestamps come from a wrapping 32-bit counter, so they must only be
/// compared through [`Micros::elapsed_since`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Micros(pub u32);

impl Micros {
    /// Largest representable duration.
    pub const MAX: Self = Self(u32::MAX);

    /// Create a new Micros value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, correct across counter overflow.
    #[inline]
    pub const fn elapsed_since(self, earlier: Micros) -> Micros {
        Micros(self.0.wrapping_sub(earlier.0))
    }
}

impl Div<u32> for Micros {
    type Output = Self;

    fn div(self, rhs: u32) -> Self::Output {
        Self(self.0 / rhs)
    }
}
