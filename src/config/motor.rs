//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::motor::{
    CoilPattern, DriveMode, DEFAULT_DELAY_MS, DEFAULT_INVERT_ROTATION, DEFAULT_STEPS_PER_REVOLUTION,
};

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Coils energized before the first step, e.g. `[1, 1, 0, 0]`.
    #[serde(default = "default_initial_pattern")]
    pub initial_pattern: CoilPattern,

    /// Steps per output revolution (2048 for a 28BYJ-48).
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: f32,

    /// Delay after each coil write in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u32,

    /// Flip requested directions to match coil wiring.
    #[serde(default = "default_invert_rotation")]
    pub invert_rotation: bool,
}

fn default_initial_pattern() -> CoilPattern {
    CoilPattern::DEFAULT
}

fn default_steps_per_revolution() -> f32 {
    DEFAULT_STEPS_PER_REVOLUTION
}

fn default_delay_ms() -> u32 {
    DEFAULT_DELAY_MS
}

fn default_invert_rotation() -> bool {
    DEFAULT_INVERT_ROTATION
}

impl MotorConfig {
    /// Create a configuration with default timing and pattern.
    pub fn new(name: String<32>) -> Self {
        Self {
            name,
            initial_pattern: default_initial_pattern(),
            steps_per_revolution: default_steps_per_revolution(),
            delay_ms: default_delay_ms(),
            invert_rotation: default_invert_rotation(),
        }
    }

    /// Drive mode implied by the initial pattern, if it is a valid one.
    pub fn drive_mode(&self) -> Option<DriveMode> {
        DriveMode::classify(self.initial_pattern)
    }

    /// Calculate steps per degree of output rotation.
    pub fn steps_per_degree(&self) -> f32 {
        self.steps_per_revolution / 360.0
    }
}
