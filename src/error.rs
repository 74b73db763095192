//! Crate-level error type for binaries and embedding applications.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum Error {
    /// Setup failed: bad or missing configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Breaker state could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, Error>;
