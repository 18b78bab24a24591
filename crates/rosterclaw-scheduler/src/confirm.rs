//! Attendance confirmation sweep — promote requested-but-ambiguous RSVPs
//! on the occurrences a run materialized.

use rosterclaw_core::error::{Result, RosterError};
use rosterclaw_core::traits::OccurrenceStore;

/// Outcome of the confirmation sweep.
#[derive(Debug, Default)]
pub struct SweepOutcome {
    pub examined: usize,
    pub confirmed: usize,
    /// Set when the sweep stopped early. Promotions made before the error
    /// are rolled back; the single commit happens only after a full sweep.
    pub error: Option<RosterError>,
}

/// Sweep every materialized occurrence, independent of how assignment
/// ended: promote each attendance entry that is requested, not attended,
/// and still ambiguous (Maybe/Unknown), then commit once. Runs inside its
/// own failure boundary — an error here never undoes assignment work.
pub fn sweep_confirmations<S: OccurrenceStore>(
    store: &mut S,
    occurrence_ids: &[i64],
) -> SweepOutcome {
    let mut outcome = SweepOutcome::default();
    let result: Result<()> = (|| {
        for &occurrence_id in occurrence_ids {
            for attendance in store.attendances_for(occurrence_id)? {
                outcome.examined += 1;
                if !attendance.auto_confirm_eligible() {
                    continue;
                }
                store.confirm_attendance(attendance.id)?;
                outcome.confirmed += 1;
            }
        }
        store.commit()
    })();

    if let Err(e) = result {
        tracing::warn!("⚠️ Confirmation sweep stopped: {e}");
        let _ = store.rollback();
        outcome.confirmed = 0;
        outcome.error = Some(match e {
            RosterError::Confirmation(_) => e,
            other => RosterError::Confirmation(other.to_string()),
        });
    } else if outcome.confirmed > 0 {
        tracing::info!(
            "✅ Confirmed {} of {} attendance entries",
            outcome.confirmed,
            outcome.examined
        );
    }
    outcome
}
