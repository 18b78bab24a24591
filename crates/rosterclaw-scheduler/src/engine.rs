//! The auto-scheduling engine — sequences eligibility, matching,
//! materialization, batched assignment, and the confirmation sweep, and
//! reports one summary per run.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use rosterclaw_core::config::AutoscheduleConfig;
use rosterclaw_core::error::RosterError;
use rosterclaw_core::model::RunSummary;
use rosterclaw_core::traits::{AssignmentEngine, Catalog, OccurrenceStore};

use crate::{assign, confirm, eligibility, matcher, materialize, window};

/// The auto-scheduler. Owns the store and the assignment engine for the
/// duration of a run; the configuration is resolved up front and never
/// consulted by name afterwards.
pub struct AutoScheduler<S, A>
where
    S: Catalog + OccurrenceStore,
    A: AssignmentEngine,
{
    store: S,
    assigner: A,
    config: AutoscheduleConfig,
}

impl<S, A> AutoScheduler<S, A>
where
    S: Catalog + OccurrenceStore,
    A: AssignmentEngine,
{
    pub fn new(store: S, assigner: A, config: AutoscheduleConfig) -> Self {
        Self {
            store,
            assigner,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// One scheduling pass over the configured window, starting now.
    pub async fn run(&mut self) -> RunSummary {
        self.run_at(Utc::now()).await
    }

    /// One scheduling pass with an explicit reference time. Never raises
    /// past its own scope: every stage error lands in the summary and the
    /// caller decides whether partial success counts as failure.
    pub async fn run_at(&mut self, now: DateTime<Utc>) -> RunSummary {
        let mut summary = RunSummary::new(self.config.group_type_id, now);

        // Configuration failures abort before any occurrence work.
        if self.config.scheduler_person_id <= 0 {
            let e = RosterError::Config("No scheduler identity configured".into());
            summary.errors.push(e.to_string());
            return self.finish(summary);
        }
        let groups = match eligibility::eligible_groups(
            &self.store,
            self.config.group_type_id,
            self.config.attribute_key.as_deref(),
        ) {
            Ok(groups) => groups,
            Err(e) => {
                summary.errors.push(e.to_string());
                return self.finish(summary);
            }
        };
        tracing::info!(
            "📅 Auto-schedule run: {} eligible group(s) of type {}, {} week(s) out",
            groups.len(),
            self.config.group_type_id,
            self.config.weeks_out
        );

        let matched = match matcher::match_schedule_locations(&self.store, &groups) {
            Ok(matched) => matched,
            Err(e) => {
                summary.errors.push(e.to_string());
                return self.finish(summary);
            }
        };

        let anchors = window::anchor_dates(self.config.weeks_out, now);
        let occurrence_ids = match materialize::materialize(&mut self.store, &anchors, &matched) {
            Ok(ids) => ids,
            Err(e) => {
                summary.errors.push(e.to_string());
                return self.finish(summary);
            }
        };
        summary.occurrences_touched = occurrence_ids.len();

        let assigned = assign::assign_in_chunks(
            &mut self.store,
            &mut self.assigner,
            &occurrence_ids,
            self.config.scheduler_person_id,
            self.config.chunk_size,
        )
        .await;
        summary.chunks_processed = assigned.chunks_processed;
        summary.occurrences_assigned = assigned.assigned;
        if let Some(e) = assigned.error {
            summary.errors.push(e.to_string());
        }

        // The sweep runs over the materialized set no matter how the
        // assignment phase ended.
        let swept = confirm::sweep_confirmations(&mut self.store, &occurrence_ids);
        summary.attendances_confirmed = swept.confirmed;
        if let Some(e) = swept.error {
            summary.errors.push(e.to_string());
        }

        self.finish(summary)
    }

    fn finish(&mut self, summary: RunSummary) -> RunSummary {
        if summary.succeeded() {
            tracing::info!("✅ Auto-schedule run complete: {summary}");
        } else {
            tracing::warn!(
                "⚠️ Auto-schedule run finished with {} error(s): {summary}",
                summary.errors.len()
            );
            for error in &summary.errors {
                tracing::warn!("   {error}");
            }
        }
        if let Err(e) = self.store.record_run(&summary) {
            tracing::warn!("⚠️ Failed to record run history: {e}");
        }
        summary
    }
}

/// Run the auto-scheduler on a fixed interval as a long-lived daemon loop.
pub async fn spawn_autoschedule<S, A>(
    scheduler: Arc<Mutex<AutoScheduler<S, A>>>,
    interval_secs: u64,
) where
    S: Catalog + OccurrenceStore + Send,
    A: AssignmentEngine + Send,
{
    tracing::info!("⏰ Auto-scheduler started (every {interval_secs}s)");
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
    loop {
        interval.tick().await;
        let mut scheduler = scheduler.lock().await;
        scheduler.run().await;
    }
}
