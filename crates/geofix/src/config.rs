//! Simulation configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pause between coordinates, in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 1500;

/// Default program used to reach `simctl`
pub const DEFAULT_XCRUN: &str = "xcrun";

/// Default Android debug bridge program
pub const DEFAULT_ADB: &str = "adb";

/// Configuration for a location sequencer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Pause after each coordinate's broadcast step
    pub delay: Duration,
    /// Program that fronts `simctl` (normally `xcrun`)
    pub xcrun: String,
    /// Android debug bridge program
    pub adb: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            xcrun: DEFAULT_XCRUN.to_string(),
            adb: DEFAULT_ADB.to_string(),
        }
    }
}

impl SimulationConfig {
    /// Create a builder
    #[must_use]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }
}

/// Builder for `SimulationConfig`
#[derive(Debug, Clone, Default)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    /// Set the inter-coordinate delay
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Set the inter-coordinate delay in milliseconds
    #[must_use]
    pub const fn delay_ms(self, ms: u64) -> Self {
        self.delay(Duration::from_millis(ms))
    }

    /// Set the `xcrun` program
    #[must_use]
    pub fn xcrun(mut self, program: impl Into<String>) -> Self {
        self.config.xcrun = program.into();
        self
    }

    /// Set the `adb` program
    #[must_use]
    pub fn adb(mut self, program: impl Into<String>) -> Self {
        self.config.adb = program.into();
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> SimulationConfig {
        self.config
    }
}
