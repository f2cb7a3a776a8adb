//! Unit tests for TOML configuration parsing.

use stepper_ramp::config::{load_config, MotionCommand, SystemConfig};
use stepper_ramp::Direction;

/// Test parsing a motor configuration with every field set.
#[test]
fn test_parse_motor_config() {
    let toml_str = r#"
[motors.spool]
name = "Spool"
min_speed = 40
invert_direction = true
initial_direction = "counter_clockwise"
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let motor = config.motor("spool").expect("Motor not found");

    assert_eq!(motor.name.as_str(), "Spool");
    assert_eq!(motor.min_speed.value(), 40);
    assert_eq!(motor.max_step_duration_us(), 25_000);
    assert!(motor.invert_direction);
    assert_eq!(motor.initial_direction, Direction::CounterClockwise);
}

/// Test that omitted motor fields take their defaults.
#[test]
fn test_motor_defaults() {
    let toml_str = r#"
[motors.spool]
name = "Spool"
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let motor = config.motor("spool").unwrap();

    assert_eq!(motor.min_speed.value(), 100);
    assert!(!motor.invert_direction);
    assert_eq!(motor.initial_direction, Direction::Clockwise);
    assert_eq!(config.sequence_names().count(), 0);
}

/// Test parsing every command kind in a sequence.
#[test]
fn test_parse_sequence_commands() {
    let toml_str = r#"
[motors.spool]
name = "Spool"

[sequences.wind]
motor = "spool"
commands = [
  { ramp = { target_speed = 2000, steps = 150 } },
  { move = { steps = 1000 } },
  { jump = { speed = 500 } },
  { direction = "clockwise" },
  { ramp = { target_speed = 0, steps = 80 } },
]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let seq = config.sequence("wind").expect("Sequence not found");

    assert_eq!(seq.motor.as_str(), "spool");
    assert_eq!(
        seq.commands.as_slice(),
        &[
            MotionCommand::Ramp { target_speed: 2000, steps: 150 },
            MotionCommand::Move { steps: 1000 },
            MotionCommand::Jump { speed: 500 },
            MotionCommand::Direction(Direction::Clockwise),
            MotionCommand::Ramp { target_speed: 0, steps: 80 },
        ]
    );
    assert_eq!(config.sequence_names().collect::<Vec<_>>(), ["wind"]);
}

/// Test that an unknown command kind is a parse error.
#[test]
fn test_unknown_command_rejected() {
    let toml_str = r#"
[motors.spool]
name = "Spool"

[sequences.bad]
motor = "spool"
commands = [{ teleport = { steps = 3 } }]
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test loading a configuration file from disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("stepper_ramp_load_config_test.toml");
    std::fs::write(
        &path,
        r#"
[motors.spool]
name = "Spool"
min_speed = 120
"#,
    )
    .expect("Failed to write temp config");

    let config = load_config(&path).expect("Failed to load config");
    assert_eq!(config.motor("spool").unwrap().min_speed.value(), 120);

    let _ = std::fs::remove_file(&path);
}
