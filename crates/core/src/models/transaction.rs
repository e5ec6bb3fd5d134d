//! Points ledger rows from the `points_transactions` table

use serde::{Deserialize, Serialize};

/// One credit or debit on the user's points balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsTransaction {
    #[serde(default)]
    pub id: serde_json::Value, // Can be number or uuid string
    #[serde(default)]
    pub user_id: Option<String>,
    /// Negative for redemptions
    pub points: i64,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PointsTransaction {
    /// "+5" / "-5000"
    pub fn signed_points(&self) -> String {
        if self.points >= 0 {
            format!("+{}", self.points)
        } else {
            self.points.to_string()
        }
    }
}
