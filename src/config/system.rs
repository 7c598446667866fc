//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::motor::MotorConfig;

/// Maximum number of motors in one configuration.
pub const MAX_MOTORS: usize = 8;

/// Root configuration structure from TOML.
///
/// Each motor entry describes one independent driver.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named motor configurations.
    pub motors: FnvIndexMap<String<32>, MotorConfig, MAX_MOTORS>,
}

impl SystemConfig {
    /// Get a motor configuration by name.
    pub fn motor(&self, name: &str) -> Option<&MotorConfig> {
        self.motors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all motor names.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            motors: FnvIndexMap::new(),
        }
    }
}
