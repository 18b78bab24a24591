//! Domain model — groups, schedules, occurrences, attendance.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// A group from the external catalog. Read-only to the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub group_type_id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_archived: bool,
    /// Root groups (no parent) are never auto-scheduled.
    pub parent_group_id: Option<i64>,
    /// Per-group opt-out, independent of the type-level flag.
    pub disable_scheduling: bool,
}

impl Group {
    /// Whether the group itself allows scheduling. The type-level flag is
    /// checked separately by the eligibility resolver.
    pub fn is_schedulable(&self) -> bool {
        self.is_active
            && !self.is_archived
            && self.parent_group_id.is_some()
            && !self.disable_scheduling
    }
}

/// A group type. Scheduling must be enabled here before any group of the
/// type can be auto-scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupType {
    pub id: i64,
    pub name: String,
    pub is_scheduling_enabled: bool,
}

/// A (group, location) pairing with display order and bound schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupLocation {
    pub id: i64,
    pub group_id: i64,
    pub location_id: i64,
    pub location_name: String,
    /// Explicit ordering; tie-break precedence during assignment.
    pub display_order: i64,
    /// Schedules bound to this location, in binding order.
    pub schedule_ids: Vec<i64>,
}

/// A recurring schedule: every `interval_weeks` weeks on a fixed weekday
/// and start time, phased from `anchor`. Immutable to the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub name: String,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    /// 1 = weekly, 2 = biweekly, …
    pub interval_weeks: u32,
    /// First date the schedule is in effect; phase reference when
    /// `interval_weeks > 1`.
    pub anchor: NaiveDate,
    pub is_active: bool,
}

/// The identity of one occurrence. The store enforces at most one row per
/// key, which is what makes materialization idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccurrenceKey {
    pub date: NaiveDate,
    pub group_id: i64,
    pub location_id: i64,
    pub schedule_id: i64,
}

/// One concrete instance of a recurring scheduled activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occurrence {
    pub id: i64,
    pub date: NaiveDate,
    pub group_id: i64,
    pub location_id: i64,
    pub schedule_id: i64,
}

impl Occurrence {
    pub fn key(&self) -> OccurrenceKey {
        OccurrenceKey {
            date: self.date,
            group_id: self.group_id,
            location_id: self.location_id,
            schedule_id: self.schedule_id,
        }
    }
}

/// RSVP state of one attendance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rsvp {
    Yes,
    No,
    Maybe,
    Unknown,
}

impl Rsvp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rsvp::Yes => "yes",
            Rsvp::No => "no",
            Rsvp::Maybe => "maybe",
            Rsvp::Unknown => "unknown",
        }
    }

    /// Parse a stored RSVP value; anything unrecognized reads as Unknown.
    pub fn parse(s: &str) -> Self {
        match s {
            "yes" => Rsvp::Yes,
            "no" => Rsvp::No,
            "maybe" => Rsvp::Maybe,
            _ => Rsvp::Unknown,
        }
    }
}

/// A person's participation record against one occurrence. Created by the
/// assignment engine; only the confirmation sweep mutates it here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub occurrence_id: i64,
    pub person_id: i64,
    pub rsvp: Rsvp,
    pub requested_to_attend: bool,
    /// None until the occurrence happens.
    pub did_attend: Option<bool>,
}

impl Attendance {
    /// Eligibility rule for the auto-confirmation sweep: requested, not
    /// already attended, and the RSVP is still ambiguous.
    pub fn auto_confirm_eligible(&self) -> bool {
        self.requested_to_attend
            && self.did_attend != Some(true)
            && matches!(self.rsvp, Rsvp::Maybe | Rsvp::Unknown)
    }
}

/// Summary of one scheduling run — the subsystem's produced output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub group_type_id: i64,
    /// Occurrence ids touched by materialization, new and pre-existing.
    pub occurrences_touched: usize,
    /// Attendance requests reported by the assignment engine.
    pub occurrences_assigned: u64,
    pub chunks_processed: usize,
    pub attendances_confirmed: usize,
    /// Stage errors in the order they were recorded. Empty = clean run.
    pub errors: Vec<String>,
}

impl RunSummary {
    pub fn new(group_type_id: i64, started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            group_type_id,
            occurrences_touched: 0,
            occurrences_assigned: 0,
            chunks_processed: 0,
            attendances_confirmed: 0,
            errors: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} type {}: {} occurrences, {} assigned, {} chunks, {} confirmed, {} error(s)",
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.group_type_id,
            self.occurrences_touched,
            self.occurrences_assigned,
            self.chunks_processed,
            self.attendances_confirmed,
            self.errors.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group {
            id: 1,
            group_type_id: 10,
            name: "Ushers".into(),
            is_active: true,
            is_archived: false,
            parent_group_id: Some(99),
            disable_scheduling: false,
        }
    }

    #[test]
    fn test_schedulable_group() {
        assert!(group().is_schedulable());
    }

    #[test]
    fn test_inactive_not_schedulable() {
        let mut g = group();
        g.is_active = false;
        assert!(!g.is_schedulable());
    }

    #[test]
    fn test_archived_not_schedulable() {
        let mut g = group();
        g.is_archived = true;
        assert!(!g.is_schedulable());
    }

    #[test]
    fn test_parentless_not_schedulable() {
        let mut g = group();
        g.parent_group_id = None;
        assert!(!g.is_schedulable());
    }

    #[test]
    fn test_opted_out_not_schedulable() {
        let mut g = group();
        g.disable_scheduling = true;
        assert!(!g.is_schedulable());
    }

    fn attendance(rsvp: Rsvp, requested: bool, did_attend: Option<bool>) -> Attendance {
        Attendance {
            id: 1,
            occurrence_id: 1,
            person_id: 42,
            rsvp,
            requested_to_attend: requested,
            did_attend,
        }
    }

    #[test]
    fn test_ambiguous_requested_is_eligible() {
        assert!(attendance(Rsvp::Maybe, true, None).auto_confirm_eligible());
        assert!(attendance(Rsvp::Unknown, true, None).auto_confirm_eligible());
        // "did not attend" does not block confirmation, only "did attend".
        assert!(attendance(Rsvp::Maybe, true, Some(false)).auto_confirm_eligible());
    }

    #[test]
    fn test_confirmed_or_declined_not_eligible() {
        assert!(!attendance(Rsvp::Yes, true, None).auto_confirm_eligible());
        assert!(!attendance(Rsvp::No, true, None).auto_confirm_eligible());
    }

    #[test]
    fn test_unrequested_or_attended_not_eligible() {
        assert!(!attendance(Rsvp::Maybe, false, None).auto_confirm_eligible());
        assert!(!attendance(Rsvp::Maybe, true, Some(true)).auto_confirm_eligible());
    }

    #[test]
    fn test_rsvp_roundtrip() {
        for rsvp in [Rsvp::Yes, Rsvp::No, Rsvp::Maybe, Rsvp::Unknown] {
            assert_eq!(Rsvp::parse(rsvp.as_str()), rsvp);
        }
        assert_eq!(Rsvp::parse("garbage"), Rsvp::Unknown);
    }
}
