//! Next-start computation for recurring schedules.
//!
//! Schedules repeat every `interval_weeks` weeks on a fixed weekday and
//! start time, phased from their anchor date. The scheduler only ever asks
//! one question: "first start on or after X".

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use rosterclaw_core::model::Schedule;

/// First start of `schedule` at or after `after`. `None` when the schedule
/// is inactive or its rule is unusable.
pub fn next_start_on_or_after(schedule: &Schedule, after: NaiveDateTime) -> Option<NaiveDateTime> {
    if !schedule.is_active {
        return None;
    }
    if schedule.interval_weeks == 0 {
        tracing::warn!(
            "Schedule '{}' has interval_weeks = 0, skipping",
            schedule.name
        );
        return None;
    }

    // Earliest date on the right weekday that is not before `after`.
    let mut date = next_weekday_on_or_after(after.date(), schedule.weekday);
    if date == after.date() && schedule.start_time < after.time() {
        date += Duration::weeks(1);
    }

    // First real occurrence date: the schedule's weekday on or after its
    // anchor. Also the phase reference for multi-week intervals.
    let first = next_weekday_on_or_after(schedule.anchor, schedule.weekday);
    if date < first {
        return Some(first.and_time(schedule.start_time));
    }
    let weeks_since = (date - first).num_days() / 7;
    let off_phase = weeks_since % i64::from(schedule.interval_weeks);
    if off_phase != 0 {
        date += Duration::weeks(i64::from(schedule.interval_weeks) - off_phase);
    }
    Some(date.and_time(schedule.start_time))
}

/// Earliest date on `weekday` that is on or after `date`.
fn next_weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let days_ahead = (weekday.num_days_from_monday() + 7 - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(i64::from(days_ahead))
}
