//! Collaborator traits — the seams between the scheduler and the hosting
//! system: catalog reads, occurrence storage, and the assignment engine.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    Attendance, Group, GroupLocation, GroupType, Occurrence, OccurrenceKey, Rsvp, RunSummary,
    Schedule,
};

/// Read-only access to the group catalog.
pub trait Catalog {
    fn group_type(&self, id: i64) -> Result<Option<GroupType>>;

    /// All groups of a type, unfiltered; eligibility is the resolver's job.
    fn groups_of_type(&self, group_type_id: i64) -> Result<Vec<Group>>;

    /// Group-locations of the given groups, in catalog order.
    fn locations_for_groups(&self, group_ids: &[i64]) -> Result<Vec<GroupLocation>>;

    fn schedule(&self, id: i64) -> Result<Option<Schedule>>;

    /// Resolve a boolean group attribute. `None` = attribute missing or not
    /// interpretable as a boolean; the caller treats that as a filter miss,
    /// not an error.
    fn group_bool_attribute(&self, group_id: i64, key: &str) -> Result<Option<bool>>;
}

/// The occurrence/attendance store plus its unit-of-work boundary.
pub trait OccurrenceStore {
    /// Idempotent create-or-fetch keyed by (date, group, location,
    /// schedule). Calling twice with the same key returns the same record
    /// and never creates a second row, including across concurrent runs.
    fn get_or_add_occurrence(&mut self, key: &OccurrenceKey) -> Result<Occurrence>;

    /// Attendance rows for one occurrence.
    fn attendances_for(&self, occurrence_id: i64) -> Result<Vec<Attendance>>;

    /// Record one attendance row (the assignment side of the seam).
    fn add_attendance(
        &mut self,
        occurrence_id: i64,
        person_id: i64,
        rsvp: Rsvp,
        requested_to_attend: bool,
    ) -> Result<i64>;

    /// Promote one attendance entry to a confirmed RSVP.
    fn confirm_attendance(&mut self, attendance_id: i64) -> Result<()>;

    /// Commit pending work. Called once per assignment chunk and once after
    /// the confirmation sweep.
    fn commit(&mut self) -> Result<()>;

    /// Discard pending work after a failed stage so a later commit cannot
    /// pick it up.
    fn rollback(&mut self) -> Result<()>;

    /// Append one run summary to the run history.
    fn record_run(&mut self, run: &RunSummary) -> Result<()>;
}

/// The external auto-assignment capability. Attendee selection happens on
/// the far side of this trait and is not the scheduler's concern.
#[async_trait]
pub trait AssignmentEngine {
    /// Assign people to the given occurrences, acting as
    /// `scheduler_person_id`. Returns the number of attendance requests
    /// created.
    async fn auto_assign(&mut self, occurrence_ids: &[i64], scheduler_person_id: i64)
    -> Result<u64>;
}
