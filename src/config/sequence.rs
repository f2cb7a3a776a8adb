//! Sequence configuration from TOML.

use heapless::{String, Vec};
use serde::Deserialize;

use crate::motion::Direction;

/// Maximum number of commands in one sequence.
pub const MAX_COMMANDS: usize = 32;

/// One motion command, as issued to a controller.
///
/// In TOML each command is an inline table keyed by its kind:
///
/// ```toml
/// commands = [
///   { ramp = { target_speed = 1100, steps = 10 } },
///   { move = { steps = 400 } },
///   { jump = { speed = 300 } },
///   { direction = "counter_clockwise" },
/// ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum MotionCommand {
    /// Ramp linearly to `target_speed` within `steps` steps.
    Ramp {
        /// Speed to reach in steps/s (below the floor means "stop").
        target_speed: u16,
        /// Steps over which the ramp is spread.
        steps: u32,
    },
    /// Keep the current speed for `steps` steps.
    Move {
        /// Number of steps.
        steps: u32,
    },
    /// Switch to `speed` immediately.
    Jump {
        /// New speed in steps/s.
        speed: u16,
    },
    /// Change the direction line.
    Direction(Direction),
}

/// A named command sequence from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SequenceConfig {
    /// Target motor name (must match a motor in config).
    pub motor: String<32>,

    /// Commands in execution order.
    pub commands: Vec<MotionCommand, MAX_COMMANDS>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(commands: &[MotionCommand]) -> SequenceConfig {
        SequenceConfig {
            motor: String::try_from("feeder").unwrap(),
            commands: Vec::from_slice(commands).unwrap(),
        }
    }

    #[test]
    fn test_command_order_kept() {
        let seq = sequence(&[
            MotionCommand::Ramp { target_speed: 1100, steps: 10 },
            MotionCommand::Direction(Direction::CounterClockwise),
            MotionCommand::Move { steps: 40 },
        ]);
        assert_eq!(seq.commands.len(), 3);
        assert_eq!(seq.commands[1], MotionCommand::Direction(Direction::CounterClockwise));
    }
}
