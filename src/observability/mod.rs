//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Breaker operations produce:
//!     → tracing events (structured fields: key, failure_count, threshold)
//!     → metrics.rs (per-key counters)
//!
//! Binaries install:
//!     → logging.rs (subscriber, level from config or RUST_LOG)
//!     → a metrics recorder of their choice (none by default)
//! ```
//!
//! # Design Decisions
//! - Transition edges log at warn/info, routine records at debug
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
