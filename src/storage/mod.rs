//! Counter storage subsystem.
//!
//! # Data Flow
//! ```text
//! Breaker operation (record_failure / record_success / is_available)
//!     → CounterStore (trait, per-key primitives)
//!     → backend (memory.rs: DashMap shared by every caller in the process)
//!
//! Optional persistence:
//!     MemoryStore::load_from_file  → JSON snapshot → per-key records
//!     MemoryStore::save_to_file    ← per-key records
//! ```
//!
//! # Design Decisions
//! - Increment and decrement are atomic per key; this is part of the
//!   contract, not an implementation detail
//! - Decrement clamps at zero in every backend
//! - Unseen keys read as `KeyState::default()` (count 0, no failure, calmed down)
//! - Every operation is fallible; errors are returned, never retried here

pub mod memory;
pub mod state;

use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use state::{KeyState, Status};

/// Errors raised by a counter store backend.
///
/// `MemoryStore` only produces `Serialization` and `Io` (snapshot files).
/// `Unavailable`, `Timeout` and `Backend` are for network-backed stores; the
/// breaker hands all of them back to its caller untouched.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be reached.
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    /// Backend did not answer in time.
    #[error("Storage operation timed out after {0:?}")]
    Timeout(Duration),

    /// Stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local I/O failure (snapshot files).
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend-reported fault.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Per-key counter and status primitives a breaker relies on.
///
/// Implementations must make `increment_failure_count` and
/// `decrement_failure_count` atomic with respect to concurrent callers,
/// including callers in other processes when the backend is shared.
/// Reads of unseen keys return the defaults of [`KeyState`].
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Add 1 to the key's failure counter, creating it at 1 if absent.
    async fn increment_failure_count(&self, key: &str) -> Result<(), StorageError>;

    /// Subtract 1 from the key's failure counter, never going below 0.
    async fn decrement_failure_count(&self, key: &str) -> Result<(), StorageError>;

    async fn set_failure_count(&self, key: &str, value: u64) -> Result<(), StorageError>;

    /// Current failure count, 0 if the key was never written.
    async fn get_failure_count(&self, key: &str) -> Result<u64, StorageError>;

    async fn set_last_failure_time(&self, key: &str, at: SystemTime) -> Result<(), StorageError>;

    async fn get_last_failure_time(&self, key: &str) -> Result<Option<SystemTime>, StorageError>;

    async fn set_status(&self, key: &str, status: Status) -> Result<(), StorageError>;

    /// Last decided status, `Status::CalmedDown` if the key was never written.
    async fn get_status(&self, key: &str) -> Result<Status, StorageError>;

    /// Drop the state of every key.
    async fn reset(&self) -> Result<(), StorageError>;
}
