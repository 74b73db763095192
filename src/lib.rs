//! Failure-count circuit breaker backed by a shared counter store.
//!
//! A [`Breaker`] answers "may I call this dependency now?" and records call
//! outcomes. Its per-key state lives in a [`CounterStore`], so one store can
//! be shared by many breakers, tasks or processes.

pub mod admin;
pub mod config;
pub mod error;
pub mod observability;
pub mod resilience;
pub mod storage;

pub use config::GateConfig;
pub use error::{Error, Result};
pub use resilience::{Breaker, BreakerBuilder, BreakerConfig, BreakerEvent, CallError};
pub use storage::{CounterStore, KeyState, MemoryStore, Status, StorageError};
