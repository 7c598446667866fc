//! Configuration module for uln2003-stepper.
//!
//! Provides types for loading and validating motor configurations from TOML
//! files (with `std` feature) or pre-parsed data.

mod motor;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use system::{SystemConfig, MAX_MOTORS};
pub use validation::{validate_config, validate_motor};
pub(crate) use validation::validate_steps_per_revolution;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Steps};
