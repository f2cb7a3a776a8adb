//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{short_name, ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_ramp::load_config;
///
/// let config = load_config("motors.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(short_name(&e.to_string()))))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(short_name(e.message()))))?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotionCommand;
    use crate::motion::Direction;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[motors.feeder]
name = "Feeder"
"#;

        let config = parse_config(toml).unwrap();
        let motor = config.motor("feeder").unwrap();
        assert_eq!(motor.min_speed.value(), 100);
    }

    #[test]
    fn test_parse_with_sequence() {
        let toml = r#"
[motors.feeder]
name = "Feeder"
min_speed = 50

[sequences.prime]
motor = "feeder"
commands = [
  { ramp = { target_speed = 1100, steps = 10 } },
  { direction = "counter_clockwise" },
  { move = { steps = 400 } },
  { jump = { speed = 300 } },
]
"#;

        let config = parse_config(toml).unwrap();
        let seq = config.sequence("prime").unwrap();
        assert_eq!(seq.commands.len(), 4);
        assert_eq!(
            seq.commands[0],
            MotionCommand::Ramp { target_speed: 1100, steps: 10 }
        );
        assert_eq!(
            seq.commands[1],
            MotionCommand::Direction(Direction::CounterClockwise)
        );
    }

    #[test]
    fn test_zero_min_speed_rejected() {
        let toml = r#"
[motors.feeder]
name = "Feeder"
min_speed = 0
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ZeroMinSpeed))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/motors.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
    }
}
