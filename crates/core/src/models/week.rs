//! Derived week strip for the streak card

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the 7-day check-in strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDayView {
    /// Single-letter weekday, Monday first
    pub label: &'static str,
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_checked_in: bool,
}

/// How a day is drawn; a checked-in day wins over the today ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMarker {
    Checked,
    Today,
    Idle,
}

impl WeekDayView {
    pub fn marker(&self) -> DayMarker {
        if self.is_checked_in {
            DayMarker::Checked
        } else if self.is_today {
            DayMarker::Today
        } else {
            DayMarker::Idle
        }
    }

    /// `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
