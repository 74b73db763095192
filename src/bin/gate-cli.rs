use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use circuit_gate::admin::{run_command, AdminCommand};
use circuit_gate::config::{load_config, ObservabilityConfig};
use circuit_gate::observability::logging::init_logging;
use circuit_gate::resilience::SystemClock;

#[derive(Parser)]
#[command(name = "gate-cli")]
#[command(about = "Inspect and drive circuit breaker state kept in a snapshot file", long_about = None)]
struct Cli {
    /// TOML configuration providing the breaker options.
    #[arg(short, long, default_value = "circuit-gate.toml")]
    config: PathBuf,

    /// Snapshot file; overrides storage.snapshot_path from the config.
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: AdminCommand,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    init_logging(&ObservabilityConfig {
        log_level: "warn".to_string(),
        ..config.observability.clone()
    });

    let snapshot = cli
        .snapshot
        .or_else(|| config.storage.snapshot_path.as_ref().map(PathBuf::from))
        .ok_or("no snapshot file: pass --snapshot or set storage.snapshot_path")?;

    let output = run_command(&config, &snapshot, cli.command, Arc::new(SystemClock)).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
