//! Error type shared across RosterClaw crates.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Everything that can go wrong during a scheduling run.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Unresolvable configuration: unknown group type, missing scheduler
    /// identity, bad config file. Aborts a run before any occurrence work.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Occurrence/attendance store failure.
    #[error("Store error: {0}")]
    Store(String),

    /// Raised while invoking the assignment capability or committing a
    /// chunk. Stops the remaining chunks; committed chunks stand.
    #[error("Assignment error: {0}")]
    Assignment(String),

    /// Raised during the attendance confirmation sweep.
    #[error("Confirmation error: {0}")]
    Confirmation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
