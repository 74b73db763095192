//! Breaker configuration value and builder.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{ConfigError, ValidationError};
use crate::resilience::circuit_breaker::Breaker;
use crate::resilience::clock::{Clock, SystemClock};
use crate::resilience::events::EventListener;
use crate::storage::CounterStore;

/// Validated, immutable trip settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerConfig {
    failure_threshold: u64,
    interval_to_half_open: Duration,
}

impl BreakerConfig {
    /// Reject a zero threshold; every other value is accepted.
    pub fn new(
        failure_threshold: u64,
        interval_to_half_open: Duration,
    ) -> Result<Self, ConfigError> {
        if failure_threshold == 0 {
            return Err(ConfigError::Validation(vec![ValidationError::ZeroThreshold]));
        }
        Ok(Self {
            failure_threshold,
            interval_to_half_open,
        })
    }

    pub fn failure_threshold(&self) -> u64 {
        self.failure_threshold
    }

    pub fn interval_to_half_open(&self) -> Duration {
        self.interval_to_half_open
    }
}

/// Assembles a [`Breaker`], failing if a required option is missing.
///
/// Required: `failure_threshold`, `interval_to_half_open`, `store`.
/// Optional: `clock` (defaults to [`SystemClock`]) and any number of
/// listeners.
#[derive(Default)]
pub struct BreakerBuilder {
    failure_threshold: Option<u64>,
    interval_to_half_open: Option<Duration>,
    store: Option<Arc<dyn CounterStore>>,
    clock: Option<Arc<dyn Clock>>,
    listeners: Vec<Arc<dyn EventListener>>,
}

impl BreakerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure_threshold(mut self, threshold: u64) -> Self {
        self.failure_threshold = Some(threshold);
        self
    }

    pub fn interval_to_half_open(mut self, interval: Duration) -> Self {
        self.interval_to_half_open = Some(interval);
        self
    }

    /// Take both trip settings from an already validated config.
    pub fn config(self, config: BreakerConfig) -> Self {
        self.failure_threshold(config.failure_threshold)
            .interval_to_half_open(config.interval_to_half_open)
    }

    pub fn store(mut self, store: Arc<dyn CounterStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Register a listener for trip, calm-down, probe and storage-error events.
    pub fn subscribe(mut self, listener: impl EventListener + 'static) -> Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    pub fn build(self) -> Result<Breaker, ConfigError> {
        let mut missing = Vec::new();
        if self.failure_threshold.is_none() {
            missing.push(ValidationError::MissingOption("failure_threshold"));
        }
        if self.interval_to_half_open.is_none() {
            missing.push(ValidationError::MissingOption("interval_to_half_open"));
        }
        if self.store.is_none() {
            missing.push(ValidationError::MissingOption("store"));
        }

        let (Some(threshold), Some(interval), Some(store)) =
            (self.failure_threshold, self.interval_to_half_open, self.store)
        else {
            return Err(ConfigError::Validation(missing));
        };

        let config = BreakerConfig::new(threshold, interval)?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        Ok(Breaker::from_parts(config, store, clock, self.listeners))
    }
}
