//! Shared stores and fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use circuit_gate::resilience::{Breaker, ManualClock};
use circuit_gate::storage::{CounterStore, MemoryStore, Status, StorageError};

/// Store operations, for fault selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Increment,
    Decrement,
    SetCount,
    GetCount,
    SetLastFailure,
    GetLastFailure,
    SetStatus,
    GetStatus,
    Reset,
}

/// A memory store that counts status writes.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    status_writes: AtomicUsize,
}

impl RecordingStore {
    pub fn status_writes(&self) -> usize {
        self.status_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterStore for RecordingStore {
    async fn increment_failure_count(&self, key: &str) -> Result<(), StorageError> {
        self.inner.increment_failure_count(key).await
    }

    async fn decrement_failure_count(&self, key: &str) -> Result<(), StorageError> {
        self.inner.decrement_failure_count(key).await
    }

    async fn set_failure_count(&self, key: &str, value: u64) -> Result<(), StorageError> {
        self.inner.set_failure_count(key, value).await
    }

    async fn get_failure_count(&self, key: &str) -> Result<u64, StorageError> {
        self.inner.get_failure_count(key).await
    }

    async fn set_last_failure_time(&self, key: &str, at: SystemTime) -> Result<(), StorageError> {
        self.inner.set_last_failure_time(key, at).await
    }

    async fn get_last_failure_time(&self, key: &str) -> Result<Option<SystemTime>, StorageError> {
        self.inner.get_last_failure_time(key).await
    }

    async fn set_status(&self, key: &str, status: Status) -> Result<(), StorageError> {
        self.status_writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_status(key, status).await
    }

    async fn get_status(&self, key: &str) -> Result<Status, StorageError> {
        self.inner.get_status(key).await
    }

    async fn reset(&self) -> Result<(), StorageError> {
        self.inner.reset().await
    }
}

/// Kinds of backend fault a remote store can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Unavailable,
    Timeout(Duration),
    Backend,
}

/// A memory store whose selected operations fail with an injected fault.
#[derive(Debug, Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    failing: Mutex<HashMap<Op, Fault>>,
}

impl FaultyStore {
    /// Make `op` fail with `StorageError::Unavailable`.
    pub fn fail(&self, op: Op) {
        self.fail_with(op, Fault::Unavailable);
    }

    pub fn fail_with(&self, op: Op, fault: Fault) {
        self.failing.lock().unwrap().insert(op, fault);
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    fn check(&self, op: Op) -> Result<(), StorageError> {
        match self.failing.lock().unwrap().get(&op) {
            None => Ok(()),
            Some(Fault::Unavailable) => Err(StorageError::Unavailable(format!("{op:?} injected"))),
            Some(Fault::Timeout(after)) => Err(StorageError::Timeout(*after)),
            Some(Fault::Backend) => Err(StorageError::Backend(format!("{op:?} rejected"))),
        }
    }
}

#[async_trait]
impl CounterStore for FaultyStore {
    async fn increment_failure_count(&self, key: &str) -> Result<(), StorageError> {
        self.check(Op::Increment)?;
        self.inner.increment_failure_count(key).await
    }

    async fn decrement_failure_count(&self, key: &str) -> Result<(), StorageError> {
        self.check(Op::Decrement)?;
        self.inner.decrement_failure_count(key).await
    }

    async fn set_failure_count(&self, key: &str, value: u64) -> Result<(), StorageError> {
        self.check(Op::SetCount)?;
        self.inner.set_failure_count(key, value).await
    }

    async fn get_failure_count(&self, key: &str) -> Result<u64, StorageError> {
        self.check(Op::GetCount)?;
        self.inner.get_failure_count(key).await
    }

    async fn set_last_failure_time(&self, key: &str, at: SystemTime) -> Result<(), StorageError> {
        self.check(Op::SetLastFailure)?;
        self.inner.set_last_failure_time(key, at).await
    }

    async fn get_last_failure_time(&self, key: &str) -> Result<Option<SystemTime>, StorageError> {
        self.check(Op::GetLastFailure)?;
        self.inner.get_last_failure_time(key).await
    }

    async fn set_status(&self, key: &str, status: Status) -> Result<(), StorageError> {
        self.check(Op::SetStatus)?;
        self.inner.set_status(key, status).await
    }

    async fn get_status(&self, key: &str) -> Result<Status, StorageError> {
        self.check(Op::GetStatus)?;
        self.inner.get_status(key).await
    }

    async fn reset(&self) -> Result<(), StorageError> {
        self.check(Op::Reset)?;
        self.inner.reset().await
    }
}

/// A fixed starting point so timestamps are comparable across assertions.
pub fn epoch() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

/// Build a breaker over `store` on a manual clock.
pub fn breaker_on(
    store: Arc<dyn CounterStore>,
    threshold: u64,
    interval: Duration,
) -> (Breaker, ManualClock) {
    let clock = ManualClock::new(epoch());
    let breaker = Breaker::builder()
        .failure_threshold(threshold)
        .interval_to_half_open(interval)
        .store(store)
        .clock(Arc::new(clock.clone()))
        .build()
        .unwrap();
    (breaker, clock)
}
