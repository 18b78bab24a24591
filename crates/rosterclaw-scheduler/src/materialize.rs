//! Occurrence materialization — one idempotent get-or-add per
//! (date, group, location, schedule) key inside the run's window.

use chrono::{Duration, NaiveDate, NaiveTime};

use rosterclaw_core::error::Result;
use rosterclaw_core::model::OccurrenceKey;
use rosterclaw_core::traits::OccurrenceStore;

use crate::matcher::MatchedSet;
use crate::recurrence;

/// Materialize occurrences for every anchor date in `window` against the
/// matched schedules and group-locations. Returns every occurrence id
/// touched, newly created and pre-existing alike. Safe to re-run over the
/// same window: the store's keyed get-or-add never duplicates.
pub fn materialize<S: OccurrenceStore>(
    store: &mut S,
    window: &[NaiveDate],
    matched: &MatchedSet,
) -> Result<Vec<i64>> {
    let mut occurrence_ids = Vec::new();
    for &anchor in window {
        // Lookback window [anchor - 6, anchor] — the whole calendar week.
        let window_start = anchor - Duration::days(6);
        for schedule in &matched.schedules {
            let after = window_start.and_time(NaiveTime::MIN);
            let Some(start) = recurrence::next_start_on_or_after(schedule, after) else {
                continue;
            };
            let date = start.date();
            if date > anchor {
                // No start inside this week; the schedule sits this anchor out.
                continue;
            }
            for gl in &matched.group_locations {
                if !gl.schedule_ids.contains(&schedule.id) {
                    continue;
                }
                let key = OccurrenceKey {
                    date,
                    group_id: gl.group_id,
                    location_id: gl.location_id,
                    schedule_id: schedule.id,
                };
                occurrence_ids.push(store.get_or_add_occurrence(&key)?.id);
            }
        }
    }
    tracing::debug!(
        "📅 Materialized {} occurrences across {} anchor dates",
        occurrence_ids.len(),
        window.len()
    );
    Ok(occurrence_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchedSet;
    use crate::persistence::SchedulerDb;
    use crate::window;
    use chrono::{TimeZone, Utc, Weekday};
    use rosterclaw_core::model::{GroupLocation, Schedule};

    fn schedule(id: i64, interval_weeks: u32) -> Schedule {
        Schedule {
            id,
            name: format!("Schedule {id}"),
            weekday: Weekday::Sun,
            start_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            interval_weeks,
            anchor: NaiveDate::from_ymd_opt(2026, 1, 4).unwrap(),
            is_active: true,
        }
    }

    fn location(id: i64, group_id: i64, schedule_ids: &[i64]) -> GroupLocation {
        GroupLocation {
            id,
            group_id,
            location_id: id,
            location_name: format!("Location {id}"),
            display_order: 0,
            schedule_ids: schedule_ids.to_vec(),
        }
    }

    fn two_week_window() -> Vec<NaiveDate> {
        // Tuesday 2026-02-24 → anchors 2026-03-01 and 2026-03-08.
        window::anchor_dates(2, Utc.with_ymd_and_hms(2026, 2, 24, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_one_occurrence_per_week() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let matched = MatchedSet {
            group_locations: vec![location(1, 5, &[1])],
            schedules: vec![schedule(1, 1)],
        };
        let ids = materialize(&mut db, &two_week_window(), &matched).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(db.occurrence_count().unwrap(), 2);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let matched = MatchedSet {
            group_locations: vec![location(1, 5, &[1])],
            schedules: vec![schedule(1, 1)],
        };
        let first = materialize(&mut db, &two_week_window(), &matched).unwrap();
        let second = materialize(&mut db, &two_week_window(), &matched).unwrap();
        assert_eq!(first, second);
        assert_eq!(db.occurrence_count().unwrap(), 2);
    }

    #[test]
    fn test_biweekly_sits_out_off_weeks() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let matched = MatchedSet {
            group_locations: vec![location(1, 5, &[1])],
            schedules: vec![schedule(1, 2)],
        };
        // On-phase Sundays: Mar 1 yes (8 weeks after Jan 4), Mar 8 no.
        let ids = materialize(&mut db, &two_week_window(), &matched).unwrap();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_unbound_location_is_skipped() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let matched = MatchedSet {
            group_locations: vec![location(1, 5, &[1]), location(2, 5, &[])],
            schedules: vec![schedule(1, 1)],
        };
        let ids = materialize(&mut db, &two_week_window(), &matched).unwrap();
        assert_eq!(ids.len(), 2);
    }
}
