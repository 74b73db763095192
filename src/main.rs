//! circuit-gate demo runner.
//!
//! Loads a configuration file, then drives one dependency through a full
//! breaker cycle on a simulated clock:
//!
//! ```text
//! closed ──failures──▶ tripped ──cooldown──▶ probe ──successes──▶ closed
//! ```
//!
//! Every transition shows up in the logs; the final store is written to the
//! configured snapshot file, if any.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use clap::Parser;

use circuit_gate::config::{load_config, GateConfig, StorageBackend};
use circuit_gate::observability::logging::init_logging;
use circuit_gate::resilience::{Breaker, BreakerEvent, ManualClock};
use circuit_gate::storage::MemoryStore;

#[derive(Parser)]
#[command(name = "circuit-gate")]
#[command(about = "Simulate a failure-count circuit breaker cycle", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "circuit-gate.toml")]
    config: PathBuf,

    /// Dependency key to simulate.
    #[arg(short, long, default_value = "upstream")]
    key: String,
}

#[tokio::main]
async fn main() -> circuit_gate::Result<()> {
    let args = Args::parse();
    let config: GateConfig = load_config(&args.config)?;
    init_logging(&config.observability);

    let breaker_config = config.breaker.to_breaker_config()?;
    tracing::info!(
        failure_threshold = breaker_config.failure_threshold(),
        interval_to_half_open_secs = breaker_config.interval_to_half_open().as_secs(),
        "Configuration loaded"
    );

    let store = match config.storage.backend {
        StorageBackend::Memory => match &config.storage.snapshot_path {
            Some(path) => MemoryStore::load_from_file(path)?,
            None => MemoryStore::new(),
        },
    };

    let clock = ManualClock::new(SystemTime::now());
    let breaker = Breaker::builder()
        .config(breaker_config)
        .store(Arc::new(store.clone()))
        .clock(Arc::new(clock.clone()))
        .subscribe(|event: &BreakerEvent| tracing::info!(%event, "Breaker event"))
        .build()?;

    let key = args.key.as_str();
    let threshold = breaker_config.failure_threshold();

    for attempt in 1..=threshold {
        let status = breaker.record_failure(key).await?;
        tracing::info!(attempt, %status, "Simulated failure");
    }
    tracing::info!(available = breaker.is_available(key).await?, "After failures");

    clock.advance(breaker_config.interval_to_half_open() + Duration::from_secs(1));
    tracing::info!(available = breaker.is_available(key).await?, "After cooldown");

    for attempt in 1..=threshold {
        breaker.record_success(key).await?;
        let state = breaker.state(key).await?;
        tracing::info!(attempt, failure_count = state.failure_count, status = %state.status, "Simulated success");
    }
    tracing::info!(available = breaker.is_available(key).await?, "After recovery");

    store.save_to_file()?;
    tracing::info!("Simulation complete");
    Ok(())
}
