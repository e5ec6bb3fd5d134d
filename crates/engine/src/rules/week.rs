//! Seven-day check-in strip

use chrono::{Datelike, Duration, Local, NaiveDate};
use flowva_core::WeekDayView;
use std::collections::HashSet;

/// Weekday letters, Monday first (index = days from Monday)
pub const WEEKDAY_LABELS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

/// Number of days shown in the strip
pub const WEEK_LEN: i64 = 7;

/// Today's date in the viewer's local timezone
///
/// Read the clock once per render and pass the result down, so every
/// entry of a strip agrees on what "today" is.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Build the strip for `today - 6 ..= today`, oldest first
///
/// A day counts as checked in only when its `YYYY-MM-DD` string is in
/// `checked_in_dates` verbatim.
pub fn compute_week_view(today: NaiveDate, checked_in_dates: &HashSet<String>) -> Vec<WeekDayView> {
    (0..WEEK_LEN)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let key = date.format("%Y-%m-%d").to_string();
            WeekDayView {
                label: WEEKDAY_LABELS[date.weekday().num_days_from_monday() as usize],
                date,
                is_today: offset == 0,
                is_checked_in: checked_in_dates.contains(&key),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowva_core::DayMarker;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn set(dates: &[&str]) -> HashSet<String> {
        dates.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_spans_last_seven_days() {
        let today = date("2024-03-01"); // crosses a leap-day month boundary
        let week = compute_week_view(today, &HashSet::new());

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date("2024-02-24"));
        assert_eq!(week[6].date, today);
        for pair in week.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn test_exactly_one_today_at_the_end() {
        let week = compute_week_view(date("2024-11-06"), &HashSet::new());
        let todays: Vec<_> = week.iter().filter(|d| d.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert!(week[6].is_today);
    }

    #[test]
    fn test_sunday_maps_to_last_label() {
        // 2024-11-10 is a Sunday
        let week = compute_week_view(date("2024-11-10"), &HashSet::new());
        assert_eq!(week[6].label, "S");
        assert_eq!(week[6].date.weekday().num_days_from_monday(), 6);
        assert_eq!(
            week.iter().map(|d| d.label).collect::<Vec<_>>(),
            vec!["M", "T", "W", "T", "F", "S", "S"]
        );
    }

    #[test]
    fn test_labels_for_every_starting_weekday() {
        // 2024-11-04 is a Monday; walk today through a whole week
        let monday = date("2024-11-04");
        for shift in 0..7 {
            let today = monday + Duration::days(shift);
            let week = compute_week_view(today, &HashSet::new());
            for (i, day) in week.iter().enumerate() {
                // oldest entry is today-6, i.e. weekday index (shift + 1 + i) mod 7
                let expected = WEEKDAY_LABELS[((shift + 1 + i as i64) % 7) as usize];
                assert_eq!(day.label, expected, "today={} entry={}", today, i);
            }
            assert_eq!(
                week[6].label,
                WEEKDAY_LABELS[today.weekday().num_days_from_monday() as usize]
            );
        }
    }

    #[test]
    fn test_checked_in_requires_exact_match() {
        let today = date("2024-11-06");
        let checked = set(&["2024-11-05", "2024-11-06", "2024-10-01"]);
        let week = compute_week_view(today, &checked);

        let flagged: Vec<String> = week
            .iter()
            .filter(|d| d.is_checked_in)
            .map(|d| d.date_string())
            .collect();
        assert_eq!(flagged, vec!["2024-11-05", "2024-11-06"]);
        // one day off is not a match
        assert!(!week[4].is_checked_in);
    }

    #[test]
    fn test_non_canonical_strings_do_not_match() {
        let week = compute_week_view(date("2024-11-06"), &set(&["2024-11-6", "2024/11/06"]));
        assert!(week.iter().all(|d| !d.is_checked_in));
    }

    #[test]
    fn test_markers() {
        let week = compute_week_view(date("2024-11-06"), &set(&["2024-11-04"]));
        assert_eq!(week[4].marker(), DayMarker::Checked);
        assert_eq!(week[5].marker(), DayMarker::Idle);
        assert_eq!(week[6].marker(), DayMarker::Today);

        let checked_today = compute_week_view(date("2024-11-06"), &set(&["2024-11-06"]));
        assert_eq!(checked_today[6].marker(), DayMarker::Checked);
    }

    #[test]
    fn test_deterministic() {
        let today = date("2025-01-01");
        let checked = set(&["2024-12-31"]);
        assert_eq!(compute_week_view(today, &checked), compute_week_view(today, &checked));
    }
}
