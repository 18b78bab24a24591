//! Weekly date window — the anchor dates one scheduling run covers.
//!
//! An anchor is the end-of-week boundary (Sunday); the materializer then
//! looks back over `[anchor - 6, anchor]`, i.e. Monday through Sunday.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

/// End-of-week boundary: the next Sunday on or after `date` (today when
/// `date` is already a Sunday).
pub fn week_anchor(date: NaiveDate) -> NaiveDate {
    let days_ahead = (Weekday::Sun.num_days_from_monday() + 7
        - date.weekday().num_days_from_monday())
        % 7;
    date + Duration::days(i64::from(days_ahead))
}

/// The `weeks_out` weekly anchor dates starting at the current week's
/// boundary, each 7 days after the previous. Pure function of its inputs;
/// `weeks_out == 0` is a valid no-op window.
pub fn anchor_dates(weeks_out: u32, now: DateTime<Utc>) -> Vec<NaiveDate> {
    let start = week_anchor(now.date_naive());
    (0..weeks_out)
        .map(|w| start + Duration::weeks(i64::from(w)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_three_weeks_same_weekday() {
        // A Tuesday.
        let now = Utc.with_ymd_and_hms(2026, 2, 24, 10, 0, 0).unwrap();
        let dates = anchor_dates(3, now);
        assert_eq!(dates.len(), 3);
        for date in &dates {
            assert_eq!(date.weekday(), Weekday::Sun);
        }
        assert_eq!(dates[1] - dates[0], Duration::weeks(1));
        assert_eq!(dates[2] - dates[1], Duration::weeks(1));
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn test_sunday_anchors_today() {
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(week_anchor(sunday), sunday);
    }

    #[test]
    fn test_monday_anchors_six_days_out() {
        let monday = NaiveDate::from_ymd_opt(2026, 2, 23).unwrap();
        assert_eq!(
            week_anchor(monday),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_zero_weeks_is_empty() {
        let now = Utc.with_ymd_and_hms(2026, 2, 24, 10, 0, 0).unwrap();
        assert!(anchor_dates(0, now).is_empty());
    }
}
