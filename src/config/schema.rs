//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;
use crate::config::validation::validate_breaker;
use crate::resilience::BreakerConfig;

/// Root configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Trip and recovery settings.
    pub breaker: BreakerSection,

    /// Counter store selection.
    pub storage: StorageConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Breaker options. Both are required.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BreakerSection {
    /// Failure count at or above which the breaker trips.
    pub failure_threshold: Option<u64>,

    /// Cooldown after the last failure before a probe is let through.
    pub interval_to_half_open_secs: Option<u64>,
}

impl BreakerSection {
    /// Build the breaker's configuration value, rejecting missing options.
    pub fn to_breaker_config(&self) -> Result<BreakerConfig, ConfigError> {
        validate_breaker(self).map_err(ConfigError::Validation)?;
        BreakerConfig::new(
            self.failure_threshold.unwrap_or_default(),
            Duration::from_secs(self.interval_to_half_open_secs.unwrap_or_default()),
        )
    }
}

/// Available counter store backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process map, optionally snapshotted to a JSON file.
    #[default]
    Memory,
}

/// Counter store configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Snapshot file for the memory backend.
    pub snapshot_path: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
