//! # RosterClaw Core
//!
//! Shared foundation for the RosterClaw auto-scheduler: configuration,
//! the crate-wide error type, the group/occurrence domain model, and the
//! traits external collaborators implement (catalog reads, occurrence
//! storage, the assignment engine).

pub mod config;
pub mod error;
pub mod model;
pub mod traits;

pub use config::{AutoscheduleConfig, RosterConfig};
pub use error::{Result, RosterError};
pub use model::{
    Attendance, Group, GroupLocation, GroupType, Occurrence, OccurrenceKey, Rsvp, RunSummary,
    Schedule,
};
pub use traits::{AssignmentEngine, Catalog, OccurrenceStore};
