//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (required options, value ranges)
//!     → GateConfig (validated, immutable)
//!     → BreakerSection::to_breaker_config → BreakerConfig for the breaker
//! ```
//!
//! # Design Decisions
//! - Breaker options have no defaults; a missing one is a fatal setup error
//! - Everything else has defaults to allow minimal configs
//! - Validation reports every problem at once, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BreakerSection, GateConfig, ObservabilityConfig, StorageBackend, StorageConfig};
pub use validation::ValidationError;
