//! Command dispatch for `gate-cli`.

use std::path::Path;
use std::sync::Arc;

use clap::Subcommand;
use serde_json::{json, Map, Value};

use crate::config::GateConfig;
use crate::error::Result;
use crate::resilience::{Breaker, Clock};
use crate::storage::{MemoryStore, StorageError};

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum AdminCommand {
    /// Show stored state for one key, or for every known key
    Status { key: Option<String> },
    /// Ask whether a dependency may be called (may grant a probe)
    Check { key: String },
    /// Record a failed call
    Fail { key: String },
    /// Record a successful call
    Succeed { key: String },
    /// Clear the state of every key
    Reset,
}

/// Run one command against the snapshot at `snapshot` and persist the result.
pub async fn run_command(
    config: &GateConfig,
    snapshot: &Path,
    command: AdminCommand,
    clock: Arc<dyn Clock>,
) -> Result<Value> {
    let store = MemoryStore::load_from_file(snapshot)?;
    let breaker = Breaker::builder()
        .config(config.breaker.to_breaker_config()?)
        .store(Arc::new(store.clone()))
        .clock(clock)
        .build()?;

    let output = match command {
        AdminCommand::Status { key: Some(key) } => {
            json!({ "key": key, "state": breaker.state(&key).await? })
        }
        AdminCommand::Status { key: None } => {
            let mut all = Map::new();
            for key in store.keys() {
                let state = breaker.state(&key).await?;
                all.insert(key, serde_json::to_value(state).map_err(StorageError::from)?);
            }
            Value::Object(all)
        }
        AdminCommand::Check { key } => {
            let available = breaker.is_available(&key).await?;
            json!({ "key": key, "available": available })
        }
        AdminCommand::Fail { key } => {
            let status = breaker.record_failure(&key).await?;
            json!({ "key": key, "status": status })
        }
        AdminCommand::Succeed { key } => {
            breaker.record_success(&key).await?;
            json!({ "key": key, "state": breaker.state(&key).await? })
        }
        AdminCommand::Reset => {
            breaker.reset().await?;
            json!({ "reset": true })
        }
    };

    store.save_to_file()?;
    Ok(output)
}
