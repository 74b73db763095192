//! Administrative commands over a snapshot-backed store.
//!
//! # Data Flow
//! ```text
//! gate-cli arguments
//!     → AdminCommand (clap subcommand)
//!     → commands.rs run_command
//!         → MemoryStore::load_from_file(snapshot)
//!         → Breaker operation
//!         → MemoryStore::save_to_file(snapshot)
//!     → serde_json::Value printed on stdout
//! ```
//!
//! # Design Decisions
//! - Every command saves the snapshot, since `check` may grant a probe
//! - Results are plain JSON; logs never share stdout with them

pub mod commands;

pub use commands::{run_command, AdminCommand};
