//! Builder pattern for StepperDriver.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{validate_steps_per_revolution, MotorConfig, SystemConfig};
use crate::error::{ConfigError, Error, Result};

use super::driver::{
    StepperDriver, DEFAULT_DELAY_MS, DEFAULT_INVERT_ROTATION, DEFAULT_STEPS_PER_REVOLUTION,
};
use super::pattern::CoilPattern;

/// Builder for creating StepperDriver instances.
pub struct StepperDriverBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pins: [Option<P>; 4],
    delay: Option<D>,
    initial_pattern: CoilPattern,
    steps_per_revolution: f32,
    delay_ms: u32,
    invert_rotation: bool,
}

impl<P, D> Default for StepperDriverBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, D> StepperDriverBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pins: [None, None, None, None],
            delay: None,
            initial_pattern: CoilPattern::DEFAULT,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            delay_ms: DEFAULT_DELAY_MS,
            invert_rotation: DEFAULT_INVERT_ROTATION,
        }
    }

    /// Set the IN1 pin.
    pub fn in1(mut self, pin: P) -> Self {
        self.pins[0] = Some(pin);
        self
    }

    /// Set the IN2 pin.
    pub fn in2(mut self, pin: P) -> Self {
        self.pins[1] = Some(pin);
        self
    }

    /// Set the IN3 pin.
    pub fn in3(mut self, pin: P) -> Self {
        self.pins[2] = Some(pin);
        self
    }

    /// Set the IN4 pin.
    pub fn in4(mut self, pin: P) -> Self {
        self.pins[3] = Some(pin);
        self
    }

    /// Set all four pins, ordered `in1..in4`.
    pub fn pins(mut self, pins: [P; 4]) -> Self {
        self.pins = pins.map(Some);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the coils energized before the first step.
    pub fn initial_pattern(mut self, pattern: CoilPattern) -> Self {
        self.initial_pattern = pattern;
        self
    }

    /// Set steps per output revolution.
    pub fn steps_per_revolution(mut self, steps: f32) -> Self {
        self.steps_per_revolution = steps;
        self
    }

    /// Set delay after each coil write in milliseconds.
    pub fn delay_ms(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }

    /// Set direction inversion.
    pub fn invert_rotation(mut self, invert: bool) -> Self {
        self.invert_rotation = invert;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.initial_pattern = config.initial_pattern;
        self.steps_per_revolution = config.steps_per_revolution;
        self.delay_ms = config.delay_ms;
        self.invert_rotation = config.invert_rotation;
        self
    }

    /// Configure from SystemConfig by motor name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config.motor(motor_name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(
                heapless::String::try_from(motor_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_motor_config(motor_config))
    }

    /// Build the StepperDriver.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin or the delay is missing, if steps per
    /// revolution is not finite and positive, or if the initial pattern is
    /// not a valid drive sequence.
    pub fn build(self) -> Result<StepperDriver<P, D>> {
        validate_steps_per_revolution(self.steps_per_revolution)?;

        let [in1, in2, in3, in4] = self.pins;
        let in1 = in1.ok_or(ConfigError::MissingField("in1"))?;
        let in2 = in2.ok_or(ConfigError::MissingField("in2"))?;
        let in3 = in3.ok_or(ConfigError::MissingField("in3"))?;
        let in4 = in4.ok_or(ConfigError::MissingField("in4"))?;
        let delay = self.delay.ok_or(ConfigError::MissingField("delay"))?;

        let mut driver = StepperDriver::new(in1, in2, in3, in4, delay, self.initial_pattern)?;
        driver.set_steps_per_revolution(self.steps_per_revolution);
        driver.set_delay_ms(self.delay_ms);
        driver.set_invert_rotation(self.invert_rotation);
        Ok(driver)
    }
}
