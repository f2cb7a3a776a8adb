//! Configuration validation.

use crate::error::{short_name, ConfigError, Error, Result, SequenceError};

use super::sequence::MotionCommand;
use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Every motor has a non-zero minimum speed
/// - Sequences reference existing motors
/// - Sequences contain at least one command
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (name, motor) in config.motors.iter() {
        validate_motor(name.as_str(), motor)?;
    }

    for (name, seq) in config.sequences.iter() {
        validate_sequence(name.as_str(), seq, config)?;
    }

    Ok(())
}

fn validate_motor(name: &str, config: &super::MotorConfig) -> Result<()> {
    // Used as a divisor for the longest step period
    if config.min_speed.value() == 0 {
        warn!("motor {=str}: min_speed is zero", name);
        return Err(Error::Config(ConfigError::ZeroMinSpeed));
    }

    Ok(())
}

fn validate_sequence(name: &str, seq: &super::SequenceConfig, config: &SystemConfig) -> Result<()> {
    if config.motor(seq.motor.as_str()).is_none() {
        warn!("sequence {=str}: unknown motor", name);
        return Err(Error::Sequence(SequenceError::MotorNotFound {
            sequence: short_name(name),
            motor: seq.motor.clone(),
        }));
    }

    if seq.commands.is_empty() {
        return Err(Error::Sequence(SequenceError::Empty(short_name(name))));
    }

    for command in seq.commands.iter() {
        if let MotionCommand::Ramp { steps: 0, .. } = command {
            // Accepted: a zero-length ramp is executed as a jump
            debug!("sequence {=str}: zero-step ramp runs as a jump", name);
        }
    }

    Ok(())
}
