//! Per-key breaker state as kept by a store.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Last decided disposition of a dependency.
///
/// Changes only on transition edges (trip, calm down), never on reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    CalmedDown,
    Tripped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::CalmedDown => write!(f, "CALMED_DOWN"),
            Status::Tripped => write!(f, "TRIPPED"),
        }
    }
}

/// Everything a store tracks for one dependency key.
///
/// `Default` is the state of a key that was never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    /// Failures recorded minus successes recorded, floored at zero.
    pub failure_count: u64,
    /// Time of the last recorded failure or granted probe.
    pub last_failure_time: Option<SystemTime>,
    pub status: Status,
}
