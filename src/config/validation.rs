//! Configuration validation.

use crate::error::{ConfigError, DriverError, Error, Result};

use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks every motor:
/// - Steps per revolution is finite and positive
/// - Initial pattern is a wave or full-step pattern
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, motor) in config.motors.iter() {
        validate_motor(motor)?;
    }

    Ok(())
}

/// Validate a single motor configuration.
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    validate_steps_per_revolution(config.steps_per_revolution)?;

    if config.drive_mode().is_none() {
        return Err(Error::Driver(DriverError::InvalidDriveSequence(
            config.initial_pattern,
        )));
    }

    Ok(())
}

/// Steps per revolution must be finite and positive.
pub(crate) fn validate_steps_per_revolution(spr: f32) -> Result<()> {
    if !spr.is_finite() || spr <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(spr)));
    }
    Ok(())
}
