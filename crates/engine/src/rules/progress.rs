//! Progress bars: gift-card threshold and levels

use crate::rules::catalog::GIFT_CARD_COST;
use flowva_core::Points;
use serde::Serialize;

/// Points per level
pub const POINTS_PER_LEVEL: u64 = 1000;

/// Percent of the way to the first gift card, clamped to 100
pub fn gift_card_progress(total: Points) -> f64 {
    let pct = total.as_u64() as f64 * 100.0 / GIFT_CARD_COST as f64;
    pct.min(100.0)
}

/// Level reached and progress within it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub current_level: u64,
    pub points_in_current_level: u64,
    pub progress_percentage: f64,
    pub points_to_next_level: u64,
    pub next_level: u64,
}

impl LevelProgress {
    pub fn from_points(total: Points) -> Self {
        let total = total.as_u64();
        let current_level = total / POINTS_PER_LEVEL + 1;
        let points_in_current_level = total % POINTS_PER_LEVEL;
        Self {
            current_level,
            points_in_current_level,
            progress_percentage: points_in_current_level as f64 * 100.0 / POINTS_PER_LEVEL as f64,
            points_to_next_level: POINTS_PER_LEVEL - points_in_current_level,
            next_level: current_level + 1,
        }
    }
}
