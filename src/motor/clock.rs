//! Microsecond time source.

use crate::config::units::Micros;

/// A free-running microsecond counter.
///
/// The counter is expected to wrap at `u32::MAX`; the controller only ever
/// looks at differences between readings, so wrapping is harmless as long as
/// `tick()` runs at least once per wrap period (about 71 minutes).
pub trait MicrosClock {
    /// Current counter value.
    fn now(&self) -> Micros;
}

impl<F> MicrosClock for F
where
    F: Fn() -> u32,
{
    fn now(&self) -> Micros {
        Micros(self())
    }
}

/// A monotonically non-decreasing clock backed by the operating system.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Start a clock reading zero now.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl MicrosClock for MonotonicClock {
    fn now(&self) -> Micros {
        // Truncation is the wrap
        Micros(self.origin.elapsed().as_micros() as u32)
    }
}
