//! # RosterClaw Scheduler
//!
//! Recurring-occurrence auto-scheduler: materializes calendar occurrences
//! for every eligible group/location/schedule combination over a forward
//! window, hands them to an external assignment engine in bounded batches,
//! and promotes ambiguous attendance to confirmed.
//!
//! ## Architecture
//! ```text
//! AutoScheduler::run()
//!   ├── eligibility: group type → active, non-archived, scheduling-enabled groups
//!   ├── matcher: ordered (location, group) pairings + distinct active schedules
//!   ├── window + recurrence: weekly anchor dates → concrete occurrence dates
//!   ├── materialize: get-or-add one occurrence per (date, group, location, schedule)
//!   ├── assign: chunked hand-off to the assignment engine, commit per chunk
//!   └── confirm: promote requested-but-ambiguous RSVPs, commit once
//! ```
//!
//! The pipeline flows strictly forward. Each run is one synchronous batch
//! job; concurrent runs over overlapping windows stay correct because the
//! store's keyed get-or-add never duplicates an occurrence.

pub mod assign;
pub mod confirm;
pub mod eligibility;
pub mod engine;
pub mod matcher;
pub mod materialize;
pub mod persistence;
pub mod recurrence;
pub mod webhook;
pub mod window;

pub use engine::{AutoScheduler, spawn_autoschedule};
pub use persistence::{CatalogSeed, SchedulerDb};
pub use rosterclaw_core::model::RunSummary;
pub use webhook::WebhookAssigner;
