//! Breaker event notifications.
//!
//! Listeners are called synchronously on the task performing the breaker
//! operation, after the store writes for that edge have succeeded. They
//! observe; they cannot veto or swallow anything.

use std::fmt;

/// Something noteworthy that happened to a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakerEvent {
    /// A failure pushed the count to the threshold while calmed down.
    Tripped { key: String },
    /// Successes drained the count to zero while tripped.
    CalmedDown { key: String },
    /// The cooldown elapsed and a probe call was let through.
    ProbeGranted { key: String },
    /// A store operation failed. `key` is `None` for the global reset.
    StorageError { key: Option<String>, message: String },
}

impl fmt::Display for BreakerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakerEvent::Tripped { key } => write!(f, "{key}: tripped"),
            BreakerEvent::CalmedDown { key } => write!(f, "{key}: calmed down"),
            BreakerEvent::ProbeGranted { key } => write!(f, "{key}: probe granted"),
            BreakerEvent::StorageError { key: Some(key), message } => {
                write!(f, "{key}: storage error: {message}")
            }
            BreakerEvent::StorageError { key: None, message } => {
                write!(f, "storage error: {message}")
            }
        }
    }
}

/// Receives breaker events. Implemented for any `Fn(&BreakerEvent)`.
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &BreakerEvent);
}

impl<F> EventListener for F
where
    F: Fn(&BreakerEvent) + Send + Sync,
{
    fn on_event(&self, event: &BreakerEvent) {
        self(event)
    }
}
