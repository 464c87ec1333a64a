//! Configuration for nestkv
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for a nestkv database instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Pre-allocation hint for the committed store's map (number of entries).
    /// Zero means no preallocation.
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the pre-allocation hint for the committed store
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
