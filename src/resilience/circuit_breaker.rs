//! Failure-count circuit breaker for dependency protection.
//!
//! # States (per dependency key)
//! - Closed: failure count below threshold, calls pass through
//! - Tripped, cooling: count at/above threshold, cooldown not yet elapsed
//! - Tripped, probing: cooldown elapsed, one probe window open
//!
//! # State Transitions
//! ```text
//! Closed → Tripped:   record_failure pushes count to >= threshold
//! Cooling → Probing:  is_available observes now - last_failure > interval
//! Probing → Cooling:  probe fails (record_failure refreshes last_failure)
//!                     or the probe window is consumed by the grant itself
//! Tripped → Closed:   record_success drains count to exactly 0
//! ```
//!
//! # Design Decisions
//! - All state lives in the store; the breaker only holds its config
//! - Transitions are observed lazily on calls, there is no background timer
//! - `status` only changes on edges, so repeated failures while tripped
//!   never rewrite it
//! - Store errors are returned unchanged; nothing is retried or rolled back
//! - Read-compare-write steps are not transactional. Concurrent callers may
//!   cross an edge redundantly (status writes are idempotent) and may each
//!   be granted a probe

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::observability::metrics;
use crate::resilience::clock::{elapsed_between, Clock, SystemClock};
use crate::resilience::config::{BreakerBuilder, BreakerConfig};
use crate::resilience::events::{BreakerEvent, EventListener};
use crate::storage::{CounterStore, KeyState, Status, StorageError};

/// Outcome of [`Breaker::call`] when the guarded call did not succeed.
#[derive(Debug, Error)]
pub enum CallError<E> {
    /// The breaker refused the call; the future was never polled.
    #[error("Dependency {0} is unavailable")]
    Rejected(String),

    /// The store failed while checking or recording.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The guarded call itself failed (and was recorded as a failure).
    #[error("Guarded call failed: {0}")]
    Inner(E),
}

/// Decides per call whether a dependency may be used, from failure counts
/// kept in a shared [`CounterStore`].
pub struct Breaker {
    config: BreakerConfig,
    store: Arc<dyn CounterStore>,
    clock: Arc<dyn Clock>,
    listeners: Vec<Arc<dyn EventListener>>,
}

impl fmt::Debug for Breaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Breaker")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Breaker {
    /// Create a breaker on the system clock with no listeners.
    pub fn new(config: BreakerConfig, store: Arc<dyn CounterStore>) -> Self {
        Self::from_parts(config, store, Arc::new(SystemClock), Vec::new())
    }

    pub fn builder() -> BreakerBuilder {
        BreakerBuilder::new()
    }

    pub(crate) fn from_parts(
        config: BreakerConfig,
        store: Arc<dyn CounterStore>,
        clock: Arc<dyn Clock>,
        listeners: Vec<Arc<dyn EventListener>>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
            listeners,
        }
    }

    pub fn config(&self) -> &BreakerConfig {
        &self.config
    }

    /// Record a failed call to `key`.
    ///
    /// Returns `Status::Tripped` only on the call that trips the breaker;
    /// every other call, including failures while already tripped, returns
    /// `Status::CalmedDown`.
    pub async fn record_failure(&self, key: &str) -> Result<Status, StorageError> {
        let result = self.try_record_failure(key).await;
        self.surface(Some(key), result)
    }

    /// Record a successful call to `key`.
    ///
    /// Clears a tripped status only when the count drains to exactly zero.
    pub async fn record_success(&self, key: &str) -> Result<(), StorageError> {
        let result = self.try_record_success(key).await;
        self.surface(Some(key), result)
    }

    /// Whether a call to `key` may be attempted now.
    ///
    /// True when closed, or when the cooldown since the last failure has
    /// elapsed, in which case this call is granted a probe: the count is
    /// pinned to the threshold and the cooldown restarts from now.
    pub async fn is_available(&self, key: &str) -> Result<bool, StorageError> {
        let result = self.try_is_available(key).await;
        self.surface(Some(key), result)
    }

    /// Clear the state of every key. Administrative use only.
    pub async fn reset(&self) -> Result<(), StorageError> {
        let result = self.store.reset().await;
        if result.is_ok() {
            tracing::info!("Breaker state reset for all keys");
        }
        self.surface(None, result)
    }

    /// Read the stored state of `key` without changing it.
    pub async fn state(&self, key: &str) -> Result<KeyState, StorageError> {
        let result = self.try_state(key).await;
        self.surface(Some(key), result)
    }

    /// Run `call` if `key` is available and record its outcome.
    ///
    /// A store error while recording takes precedence over the call's own
    /// error.
    pub async fn call<F, T, E>(&self, key: &str, call: F) -> Result<T, CallError<E>>
    where
        F: Future<Output = Result<T, E>>,
    {
        if !self.is_available(key).await? {
            return Err(CallError::Rejected(key.to_owned()));
        }

        match call.await {
            Ok(value) => {
                self.record_success(key).await?;
                Ok(value)
            }
            Err(e) => {
                self.record_failure(key).await?;
                Err(CallError::Inner(e))
            }
        }
    }

    async fn try_state(&self, key: &str) -> Result<KeyState, StorageError> {
        Ok(KeyState {
            failure_count: self.store.get_failure_count(key).await?,
            last_failure_time: self.store.get_last_failure_time(key).await?,
            status: self.store.get_status(key).await?,
        })
    }

    async fn try_record_failure(&self, key: &str) -> Result<Status, StorageError> {
        self.store.set_last_failure_time(key, self.clock.now()).await?;
        self.store.increment_failure_count(key).await?;
        metrics::record_failure(key);

        let count = self.store.get_failure_count(key).await?;
        if count >= self.config.failure_threshold()
            && self.store.get_status(key).await? == Status::CalmedDown
        {
            self.store.set_status(key, Status::Tripped).await?;
            tracing::warn!(
                key,
                failure_count = count,
                threshold = self.config.failure_threshold(),
                "Circuit tripped"
            );
            metrics::record_trip(key);
            self.notify(BreakerEvent::Tripped { key: key.to_owned() });
            return Ok(Status::Tripped);
        }

        tracing::debug!(key, failure_count = count, "Failure recorded");
        Ok(Status::CalmedDown)
    }

    async fn try_record_success(&self, key: &str) -> Result<(), StorageError> {
        self.store.decrement_failure_count(key).await?;
        metrics::record_success(key);

        let count = self.store.get_failure_count(key).await?;
        if count == 0 && self.store.get_status(key).await? == Status::Tripped {
            self.store.set_status(key, Status::CalmedDown).await?;
            tracing::info!(key, "Circuit calmed down");
            metrics::record_recovery(key);
            self.notify(BreakerEvent::CalmedDown { key: key.to_owned() });
            return Ok(());
        }

        tracing::debug!(key, failure_count = count, "Success recorded");
        Ok(())
    }

    async fn try_is_available(&self, key: &str) -> Result<bool, StorageError> {
        if self.is_closed(key).await? || self.is_half_open(key).await? {
            return Ok(true);
        }
        tracing::debug!(key, "Call rejected, circuit tripped");
        metrics::record_rejection(key);
        Ok(false)
    }

    async fn is_closed(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.store.get_failure_count(key).await? < self.config.failure_threshold())
    }

    async fn is_half_open(&self, key: &str) -> Result<bool, StorageError> {
        // Unreachable with a consistent store: a count at threshold implies
        // a recorded failure.
        let Some(last_failure) = self.store.get_last_failure_time(key).await? else {
            return Ok(false);
        };

        let now = self.clock.now();
        let elapsed = elapsed_between(last_failure, now);
        if elapsed <= self.config.interval_to_half_open() {
            return Ok(false);
        }

        self.store
            .set_failure_count(key, self.config.failure_threshold())
            .await?;
        self.store.set_last_failure_time(key, now).await?;
        tracing::info!(
            key,
            ?elapsed,
            "Cooldown elapsed, probe granted"
        );
        metrics::record_probe(key);
        self.notify(BreakerEvent::ProbeGranted { key: key.to_owned() });
        Ok(true)
    }

    /// Log, count and announce a store error before handing it back.
    fn surface<T>(
        &self,
        key: Option<&str>,
        result: Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        if let Err(e) = &result {
            tracing::error!(key = key.unwrap_or("*"), error = %e, "Breaker storage operation failed");
            metrics::record_storage_error(key.unwrap_or("*"));
            self.notify(BreakerEvent::StorageError {
                key: key.map(str::to_owned),
                message: e.to_string(),
            });
        }
        result
    }

    fn notify(&self, event: BreakerEvent) {
        for listener in &self.listeners {
            listener.on_event(&event);
        }
    }
}
