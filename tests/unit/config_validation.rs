//! Unit tests for configuration validation.

use stepper_ramp::config::{parse_config, validate_config, SystemConfig};
use stepper_ramp::error::{ConfigError, Error, SequenceError};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[motors.spool]
name = "Spool"
min_speed = 100

[sequences.wind]
motor = "spool"
commands = [{ ramp = { target_speed = 900, steps = 30 } }]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a sequence referencing a non-existent motor.
#[test]
fn test_sequence_invalid_motor_reference() {
    let toml_str = r#"
[motors.spool]
name = "Spool"

[sequences.bad_ref]
motor = "nonexistent_motor"
commands = [{ move = { steps = 10 } }]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Sequence(SequenceError::MotorNotFound { .. }))
    ));
}

/// Test validation fails for a zero minimum speed.
#[test]
fn test_zero_min_speed() {
    let toml_str = r#"
[motors.spool]
name = "Spool"
min_speed = 0
"#;

    let result = parse_config(toml_str);
    assert!(matches!(result, Err(Error::Config(ConfigError::ZeroMinSpeed))));
}

/// Test validation fails for a sequence without commands.
#[test]
fn test_empty_sequence() {
    let toml_str = r#"
[motors.spool]
name = "Spool"

[sequences.nothing]
motor = "spool"
commands = []
"#;

    let result = parse_config(toml_str);
    assert!(matches!(result, Err(Error::Sequence(SequenceError::Empty(_)))));
}

/// Test that a zero-step ramp is accepted (it runs as a jump).
#[test]
fn test_zero_step_ramp_allowed() {
    let toml_str = r#"
[motors.spool]
name = "Spool"

[sequences.snap]
motor = "spool"
commands = [{ ramp = { target_speed = 700, steps = 0 } }]
"#;

    assert!(parse_config(toml_str).is_ok());
}

/// Test that malformed TOML is reported as a parse error.
#[test]
fn test_malformed_toml() {
    let result = parse_config("[motors.spool\nname = ");
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}
