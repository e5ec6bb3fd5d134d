//! Referral models for the `user_rewards` and `referrals` tables

use crate::types::Points;
use serde::{Deserialize, Serialize};

/// Row from `user_rewards` (only the referral code is consumed)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRewardsRow {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub total_points: Option<u64>,
    #[serde(default)]
    pub current_streak: Option<u32>,
}

/// Row from `referrals`; only the count is used
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralRow {
    #[serde(default)]
    pub id: serde_json::Value, // Can be number or uuid string
    #[serde(default)]
    pub referrer_id: Option<String>,
    #[serde(default)]
    pub referred_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Referral panel data, derived on every load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralSummary {
    pub referral_code: String,
    pub referral_count: u64,
    pub points_earned: Points,
}
