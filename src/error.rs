//! Error types for uln2003-stepper.
//!
//! Provides unified error handling across configuration and driver operations.

use core::fmt;

use crate::motor::CoilPattern;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all uln2003-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Driver construction or pin error
    Driver(DriverError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// A required builder field was never set
    MissingField(&'static str),
    /// Steps per revolution must be finite and > 0
    InvalidStepsPerRevolution(f32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Initial coil pattern is neither a wave nor a full-step pattern
    InvalidDriveSequence(CoilPattern),
    /// Writing a coil output failed
    PinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Driver(e) => write!(f, "Driver error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::InvalidDriveSequence(pattern) => write!(
                f,
                "Unsupported drive sequence {}. Must be a wave or full step pattern",
                pattern
            ),
            DriverError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}
