//! Ramp demo.
//!
//! Builds a controller from TOML configuration and runs a named sequence,
//! then ramps by hand from a cooperative run loop that also does other work.
//!
//! Console pins stand in for real hardware; timing uses the OS clock.

use stepper_ramp::{
    config::parse_config,
    motor::{MonotonicClock, StepperControllerBuilder},
    Interlocked, SequenceRegistry,
};

const CONFIG: &str = r#"
[motors.feeder]
name = "Feeder"
min_speed = 100

[sequences.prime]
motor = "feeder"
commands = [
  { ramp = { target_speed = 2000, steps = 40 } },
  { move = { steps = 200 } },
  { direction = "counter_clockwise" },
  { ramp = { target_speed = 0, steps = 40 } },
]
"#;

/// Output pin that counts rising edges.
struct ConsolePin {
    label: &'static str,
    high: bool,
    rising_edges: u32,
}

impl ConsolePin {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            high: false,
            rising_edges: 0,
        }
    }
}

impl embedded_hal::digital::ErrorType for ConsolePin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for ConsolePin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.rising_edges += 1;
        }
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }
}

fn main() {
    println!("=== Ramp Demo ===\n");

    let config = parse_config(CONFIG).expect("Invalid configuration");
    let registry = SequenceRegistry::from_config(&config);

    let motor = StepperControllerBuilder::new()
        .from_config(&config, "feeder")
        .expect("Motor not configured")
        .step_pin(Interlocked::new(ConsolePin::new("STEP")))
        .dir_pin(ConsolePin::new("DIR"))
        .clock(MonotonicClock::new())
        .build()
        .expect("Failed to build motor");

    println!("Motor created: {} ({})", motor.name(), motor.state_name());

    let mut motor = match motor.setup() {
        Ok(m) => m,
        Err((_, e)) => panic!("Setup failed: {e}"),
    };

    println!("Running sequence 'prime'...");
    motor.execute("prime", &registry).expect("Sequence failed");
    println!(
        "  done: {} steps/s, position {} steps, full stop: {}",
        motor.current_speed(),
        motor.position(),
        motor.is_full_stop()
    );

    println!("\nRamping to 1500 steps/s over 100 steps from the run loop...");
    motor.ramp_to_speed(1500, 100);
    let mut loop_iterations: u64 = 0;
    while !motor.tick().expect("Pin error") {
        // Other cooperative work would go here
        loop_iterations += 1;
    }
    println!(
        "  reached {} steps/s after {} loop iterations",
        motor.current_speed(),
        loop_iterations
    );

    println!("Stopping within 100 steps...");
    motor.decelerate(0, 100);
    motor.run_to_target().expect("Pin error");

    let (step, dir, _clock) = motor.release();
    let step = step.into_inner();
    println!(
        "  stopped; {} pulses on {}, {} high: {}",
        step.rising_edges, step.label, dir.label, dir.high
    );

    println!("\n=== Demo Complete ===");
}
