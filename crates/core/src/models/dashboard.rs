//! Dashboard snapshot models for the `get_user_dashboard_data` RPC

use crate::types::Points;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Points shown when the backend snapshot omits them
pub const FALLBACK_TOTAL_POINTS: u64 = 5;
/// Streak shown when the backend snapshot omits it
pub const FALLBACK_STREAK: u32 = 1;

/// Raw response from `rpc/get_user_dashboard_data`
///
/// The backend nests points and streak under `rewards_data`; older
/// deployments return them flat. Both shapes are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub rewards_data: Option<RewardsData>,
    #[serde(default)]
    pub total_points: Option<u64>,
    #[serde(default)]
    pub current_streak: Option<u32>,
    #[serde(default)]
    pub can_check_in_today: Option<bool>,
    /// Null when the user has never checked in
    #[serde(default)]
    pub check_in_week: Option<Vec<CheckInDay>>,
}

/// Points and streak block of the dashboard snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewardsData {
    #[serde(default)]
    pub total_points: Option<u64>,
    #[serde(default)]
    pub current_streak: Option<u32>,
}

/// One checked-in day within the last week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInDay {
    /// `YYYY-MM-DD`
    pub date: String,
}

impl DashboardResponse {
    /// Resolve the wire shape into the cached view-state snapshot
    pub fn into_state(self) -> UserRewardsState {
        let nested = self.rewards_data.unwrap_or_default();
        UserRewardsState {
            total_points: Points(
                nested
                    .total_points
                    .or(self.total_points)
                    .unwrap_or(FALLBACK_TOTAL_POINTS),
            ),
            current_streak: nested
                .current_streak
                .or(self.current_streak)
                .unwrap_or(FALLBACK_STREAK),
            can_check_in_today: self.can_check_in_today.unwrap_or(true),
            check_in_week: self.check_in_week.unwrap_or_default(),
        }
    }
}

/// Client-side copy of the user's rewards state
///
/// Replaced wholesale on every fetch. `current_streak` is owned by the
/// backend and is never derived from `check_in_week`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRewardsState {
    pub total_points: Points,
    pub current_streak: u32,
    pub can_check_in_today: bool,
    pub check_in_week: Vec<CheckInDay>,
}

impl UserRewardsState {
    /// Date strings of the checked-in days, for week-view lookups
    pub fn checked_in_dates(&self) -> HashSet<String> {
        self.check_in_week.iter().map(|d| d.date.clone()).collect()
    }

    /// "1 day" / "4 days"
    pub fn streak_label(&self) -> String {
        if self.current_streak == 1 {
            "1 day".to_string()
        } else {
            format!("{} days", self.current_streak)
        }
    }
}
