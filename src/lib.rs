//! # uln2003-stepper
//!
//! Driver for four-coil unipolar stepper motors (28BYJ-48 on a ULN2003 board)
//! with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Wave and full-step drive**: Chosen by the initial coil pattern
//! - **embedded-hal 1.0**: Uses `OutputPin` for the four coils, `DelayNs` for settle time
//! - **no_std compatible**: Core library works without standard library
//! - **Position tracking**: Step counter with a resettable home
//! - **Configuration-driven**: Optionally describe motors in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use uln2003_stepper::{CoilPattern, Degrees, StepperDriver};
//!
//! let mut motor = StepperDriver::new(in1, in2, in3, in4, delay, CoilPattern::DEFAULT)?;
//!
//! // Half a turn, then back to where we started
//! motor.rotate_deg(Degrees(180.0))?;
//! motor.move_to_steps(0)?;
//!
//! // Let the coils cool down
//! motor.release()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorConfig, SystemConfig};
pub use error::{ConfigError, DriverError, Error, Result};
pub use motor::{CoilPattern, Direction, DriveMode, StepperDriver, StepperDriverBuilder};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, Steps};
