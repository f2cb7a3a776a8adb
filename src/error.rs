//! Error types for stepper-ramp.
//!
//! Provides unified error handling across configuration, motor control and sequences.
//! Out-of-range speeds are never errors: they are clamped to the controller's floor.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-ramp operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
    /// Sequence lookup or execution error
    Sequence(SequenceError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Minimum speed is zero (it is used as a divisor)
    ZeroMinSpeed,
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// A required builder field was not provided
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Writing a STEP or DIR line failed
    PinError,
}

/// Sequence-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceError {
    /// No sequence registered under that name
    NotFound(heapless::String<32>),
    /// Sequence references a motor missing from the configuration
    MotorNotFound {
        /// Sequence name
        sequence: heapless::String<32>,
        /// Referenced motor name
        motor: heapless::String<32>,
    },
    /// Sequence was requested for a different motor
    MotorMismatch {
        /// Motor the sequence is written for
        expected: heapless::String<32>,
        /// Motor that tried to run it
        actual: heapless::String<32>,
    },
    /// Sequence has no commands
    Empty(heapless::String<32>),
    /// Registry cannot hold more sequences
    RegistryFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Sequence(e) => write!(f, "Sequence error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::ZeroMinSpeed => write!(f, "Minimum speed must be at least 1 step/s"),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::NotFound(name) => write!(f, "Sequence '{}' not found", name),
            SequenceError::MotorNotFound { sequence, motor } => {
                write!(f, "Sequence '{}' references unknown motor '{}'", sequence, motor)
            }
            SequenceError::MotorMismatch { expected, actual } => {
                write!(f, "Sequence is for motor '{}', not '{}'", expected, actual)
            }
            SequenceError::Empty(name) => write!(f, "Sequence '{}' has no commands", name),
            SequenceError::RegistryFull => write!(f, "Sequence registry is full"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<SequenceError> for Error {
    fn from(e: SequenceError) -> Self {
        Error::Sequence(e)
    }
}

/// Truncating conversion into a bounded name, used when building error payloads.
pub(crate) fn short_name<const N: usize>(name: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
