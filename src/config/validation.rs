//! Configuration validation.
//!
//! Serde handles syntax; this module checks required options and value
//! ranges. Validation is a pure function returning every error found.

use thiserror::Error;

use crate::config::schema::{BreakerSection, GateConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingOption(&'static str),

    #[error("failure_threshold must be a positive integer")]
    ZeroThreshold,

    #[error("storage.snapshot_path must not be empty")]
    EmptySnapshotPath,

    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

/// Validate a whole configuration file.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = match validate_breaker(&config.breaker) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    if let Some(path) = &config.storage.snapshot_path {
        if path.trim().is_empty() {
            errors.push(ValidationError::EmptySnapshotPath);
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate only the breaker options.
pub fn validate_breaker(section: &BreakerSection) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match section.failure_threshold {
        None => errors.push(ValidationError::MissingOption("failure_threshold")),
        Some(0) => errors.push(ValidationError::ZeroThreshold),
        Some(_) => {}
    }
    if section.interval_to_half_open_secs.is_none() {
        errors.push(ValidationError::MissingOption("interval_to_half_open_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
