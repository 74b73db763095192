//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Caller, before the guarded call:
//!     → circuit_breaker.rs is_available(key)
//!         → closed? count < threshold
//!         → half-open? cooldown elapsed → pin count, restart cooldown
//! Caller, after the guarded call:
//!     → record_success(key) / record_failure(key)
//!         → store counters (storage/)
//!         → on edges: log, metrics, events.rs listeners
//! ```
//!
//! # Design Decisions
//! - Per-key state, never global
//! - Configuration is an explicit value passed in (config.rs), no singleton
//! - Time comes from clock.rs so cooldowns are testable
//! - No retries or backoff here; callers pick their own fallback

pub mod circuit_breaker;
pub mod clock;
pub mod config;
pub mod events;

pub use circuit_breaker::{Breaker, CallError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BreakerBuilder, BreakerConfig};
pub use events::{BreakerEvent, EventListener};
