//! Schedule/location matching — the ordered pairings a run materializes.

use rosterclaw_core::error::Result;
use rosterclaw_core::model::{Group, GroupLocation, Schedule};
use rosterclaw_core::traits::Catalog;

/// The group-locations of the eligible groups plus the distinct active
/// schedules bound to them.
pub struct MatchedSet {
    /// Ordered by display order, then location name. The order is the
    /// tie-break precedence when occurrences compete for the same person
    /// during assignment, so it must be preserved downstream.
    pub group_locations: Vec<GroupLocation>,
    /// Distinct active schedules, first-seen order.
    pub schedules: Vec<Schedule>,
}

pub fn match_schedule_locations<C: Catalog>(catalog: &C, groups: &[Group]) -> Result<MatchedSet> {
    let group_ids: Vec<i64> = groups.iter().map(|g| g.id).collect();
    let mut group_locations = catalog.locations_for_groups(&group_ids)?;
    group_locations.sort_by(|a, b| {
        (a.display_order, a.location_name.as_str()).cmp(&(b.display_order, b.location_name.as_str()))
    });

    let mut schedules: Vec<Schedule> = Vec::new();
    for gl in &group_locations {
        for &sid in &gl.schedule_ids {
            if schedules.iter().any(|s| s.id == sid) {
                continue;
            }
            if let Some(schedule) = catalog.schedule(sid)?
                && schedule.is_active
            {
                schedules.push(schedule);
            }
        }
    }

    tracing::debug!(
        "Matched {} group-locations and {} active schedules across {} groups",
        group_locations.len(),
        schedules.len(),
        groups.len()
    );
    Ok(MatchedSet {
        group_locations,
        schedules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::SchedulerDb;
    use chrono::{NaiveDate, NaiveTime, Weekday};
    use rosterclaw_core::model::{Group, GroupLocation, Schedule};

    fn group(id: i64) -> Group {
        Group {
            id,
            group_type_id: 10,
            name: format!("Group {id}"),
            is_active: true,
            is_archived: false,
            parent_group_id: Some(1),
            disable_scheduling: false,
        }
    }

    fn schedule(id: i64, active: bool) -> Schedule {
        Schedule {
            id,
            name: format!("Schedule {id}"),
            weekday: Weekday::Sun,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            interval_weeks: 1,
            anchor: NaiveDate::from_ymd_opt(2026, 1, 4).unwrap(),
            is_active: active,
        }
    }

    fn location(id: i64, group_id: i64, name: &str, order: i64, schedule_ids: &[i64]) -> GroupLocation {
        GroupLocation {
            id,
            group_id,
            location_id: id,
            location_name: name.into(),
            display_order: order,
            schedule_ids: schedule_ids.to_vec(),
        }
    }

    #[test]
    fn test_order_by_display_order_then_name() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        db.insert_schedule(&schedule(1, true)).unwrap();
        db.insert_group_location(&location(1, 5, "Balcony", 2, &[1])).unwrap();
        db.insert_group_location(&location(2, 5, "Annex", 2, &[1])).unwrap();
        db.insert_group_location(&location(3, 5, "Lobby", 1, &[1])).unwrap();

        let matched = match_schedule_locations(&db, &[group(5)]).unwrap();
        let names: Vec<&str> = matched
            .group_locations
            .iter()
            .map(|gl| gl.location_name.as_str())
            .collect();
        assert_eq!(names, ["Lobby", "Annex", "Balcony"]);
    }

    #[test]
    fn test_schedules_distinct_and_active_only() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        db.insert_schedule(&schedule(1, true)).unwrap();
        db.insert_schedule(&schedule(2, false)).unwrap();
        db.insert_group_location(&location(1, 5, "Lobby", 0, &[1, 2])).unwrap();
        db.insert_group_location(&location(2, 6, "Annex", 1, &[1])).unwrap();

        let matched = match_schedule_locations(&db, &[group(5), group(6)]).unwrap();
        assert_eq!(matched.schedules.len(), 1);
        assert_eq!(matched.schedules[0].id, 1);
    }

    #[test]
    fn test_only_requested_groups_contribute() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        db.insert_schedule(&schedule(1, true)).unwrap();
        db.insert_group_location(&location(1, 5, "Lobby", 0, &[1])).unwrap();
        db.insert_group_location(&location(2, 99, "Elsewhere", 0, &[1])).unwrap();

        let matched = match_schedule_locations(&db, &[group(5)]).unwrap();
        assert_eq!(matched.group_locations.len(), 1);
        assert_eq!(matched.group_locations[0].group_id, 5);
    }
}
