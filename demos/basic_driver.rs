//! Basic driver example.
//!
//! Builds a driver on printing pins, runs a few moves and reports position.
//! Swap the pins and delay for your HAL's types to drive real hardware.

use uln2003_stepper::{CoilPattern, Degrees, StepperDriver};

/// Std delay provider for demonstration.
struct SleepDelay;

impl embedded_hal::delay::DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        // In real code, this would use hardware timer
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Output pin that remembers its level.
struct DemoPin {
    state: bool,
}

impl DemoPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::OutputPin for DemoPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for DemoPin {
    type Error = core::convert::Infallible;
}

fn main() {
    println!("=== ULN2003 Driver Example ===\n");

    let mut motor = StepperDriver::new(
        DemoPin::new(),
        DemoPin::new(),
        DemoPin::new(),
        DemoPin::new(),
        SleepDelay,
        CoilPattern::DEFAULT,
    )
    .expect("default pattern is valid");
    motor.set_delay_ms(1);

    println!("Drive mode: {:?}", motor.drive_mode());
    println!("Steps per revolution: {}", motor.steps_per_revolution());

    motor.rotate_deg(Degrees(90.0)).expect("pins are infallible");
    println!(
        "After rotate_deg(90): {} steps ({:.2} degrees), coils {}",
        motor.position_steps().value(),
        motor.position_deg().value(),
        motor.pattern()
    );

    motor.move_to_steps(0).expect("pins are infallible");
    println!("Back home: {} steps", motor.position_steps().value());

    motor.release().expect("pins are infallible");
    let (pins, _) = motor.free();
    let levels: Vec<bool> = pins.iter().map(|p| p.state).collect();
    println!("Released, pin levels: {:?}", levels);
}
