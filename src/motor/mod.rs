//! Motor module for uln2003-stepper.
//!
//! Provides the coil-pattern stepper driver and position tracking.

mod builder;
mod driver;
mod pattern;
mod position;

pub use builder::StepperDriverBuilder;
pub use driver::{
    StepperDriver, DEFAULT_DELAY_MS, DEFAULT_INVERT_ROTATION, DEFAULT_STEPS_PER_REVOLUTION,
};
pub use pattern::{CoilPattern, Direction, DriveMode};
pub use position::Position;
