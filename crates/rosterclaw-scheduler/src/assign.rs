//! Batched hand-off to the external assignment engine.

use rosterclaw_core::error::RosterError;
use rosterclaw_core::traits::{AssignmentEngine, OccurrenceStore};

/// Outcome of the batched assignment phase.
#[derive(Debug, Default)]
pub struct AssignOutcome {
    /// Occurrence ids considered, attempted or not.
    pub considered: usize,
    pub chunks_processed: usize,
    pub assigned: u64,
    /// Set when the chunk loop stopped early.
    pub error: Option<RosterError>,
}

/// Submit `occurrence_ids` to the assignment engine in order-preserving
/// chunks of at most `chunk_size`, committing after each chunk.
///
/// One failure boundary wraps the whole loop: the first failed call or
/// commit stops it. Chunks already committed stand — there is no
/// cross-chunk rollback — and remaining chunks are not attempted.
/// Re-running the schedule is the recovery path.
pub async fn assign_in_chunks<S, A>(
    store: &mut S,
    assigner: &mut A,
    occurrence_ids: &[i64],
    scheduler_person_id: i64,
    chunk_size: usize,
) -> AssignOutcome
where
    S: OccurrenceStore,
    A: AssignmentEngine + ?Sized,
{
    let mut outcome = AssignOutcome {
        considered: occurrence_ids.len(),
        ..Default::default()
    };
    for chunk in occurrence_ids.chunks(chunk_size.max(1)) {
        let result = match assigner.auto_assign(chunk, scheduler_person_id).await {
            Ok(assigned) => store.commit().map(|()| assigned),
            Err(e) => Err(e),
        };
        match result {
            Ok(assigned) => {
                outcome.chunks_processed += 1;
                outcome.assigned += assigned;
                tracing::debug!(
                    "✅ Assignment chunk {} committed ({} occurrences, {} assigned)",
                    outcome.chunks_processed,
                    chunk.len(),
                    assigned
                );
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Assignment stopped at chunk {}: {e}",
                    outcome.chunks_processed + 1
                );
                let _ = store.rollback();
                outcome.error = Some(match e {
                    RosterError::Assignment(_) => e,
                    other => RosterError::Assignment(other.to_string()),
                });
                break;
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::SchedulerDb;
    use async_trait::async_trait;
    use rosterclaw_core::error::Result;

    /// Records the chunk sizes it receives; optionally fails on one call.
    struct StubAssigner {
        chunks: Vec<usize>,
        fail_on_call: Option<usize>,
    }

    impl StubAssigner {
        fn new() -> Self {
            Self {
                chunks: Vec::new(),
                fail_on_call: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                chunks: Vec::new(),
                fail_on_call: Some(call),
            }
        }
    }

    #[async_trait]
    impl AssignmentEngine for StubAssigner {
        async fn auto_assign(
            &mut self,
            occurrence_ids: &[i64],
            _scheduler_person_id: i64,
        ) -> Result<u64> {
            if self.fail_on_call == Some(self.chunks.len() + 1) {
                return Err(RosterError::Assignment("engine unavailable".into()));
            }
            self.chunks.push(occurrence_ids.len());
            Ok(occurrence_ids.len() as u64)
        }
    }

    #[tokio::test]
    async fn test_chunk_sizes_and_order() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let mut assigner = StubAssigner::new();
        let ids: Vec<i64> = (0..25_000).collect();

        let outcome = assign_in_chunks(&mut db, &mut assigner, &ids, 7, 10_000).await;
        assert_eq!(assigner.chunks, [10_000, 10_000, 5_000]);
        assert_eq!(outcome.considered, 25_000);
        assert_eq!(outcome.chunks_processed, 3);
        assert_eq!(outcome.assigned, 25_000);
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_stops_remaining_chunks() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let mut assigner = StubAssigner::failing_on(2);
        let ids: Vec<i64> = (0..25_000).collect();

        let outcome = assign_in_chunks(&mut db, &mut assigner, &ids, 7, 10_000).await;
        // Chunk 1 stands, chunk 2 failed, chunk 3 never attempted.
        assert_eq!(assigner.chunks, [10_000]);
        assert_eq!(outcome.chunks_processed, 1);
        assert_eq!(outcome.assigned, 10_000);
        assert!(matches!(outcome.error, Some(RosterError::Assignment(_))));
    }

    #[tokio::test]
    async fn test_empty_list_is_a_no_op() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let mut assigner = StubAssigner::new();

        let outcome = assign_in_chunks(&mut db, &mut assigner, &[], 7, 10_000).await;
        assert_eq!(outcome.considered, 0);
        assert_eq!(outcome.chunks_processed, 0);
        assert!(assigner.chunks.is_empty());
    }
}
