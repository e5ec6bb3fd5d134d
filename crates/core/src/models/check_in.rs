//! Check-in models for the `handle_daily_checkin` RPC

use serde::{Deserialize, Serialize};

/// Points credited when the backend omits `points_earned`
pub const DEFAULT_CHECK_IN_POINTS: u32 = 5;

/// Response from `rpc/handle_daily_checkin`
///
/// A business-rule rejection (already checked in today) still arrives as
/// a successful RPC, with `success = false` and a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckInResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub points_earned: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a successful check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOutcome {
    pub points_earned: u32,
}

impl CheckInOutcome {
    /// "+5 pts"
    pub fn badge(&self) -> String {
        format!("+{} pts", self.points_earned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_payload() {
        let json = r#"{"success": false, "message": "Already checked in"}"#;
        let resp: CheckInResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.points_earned, None);
        assert_eq!(resp.message.as_deref(), Some("Already checked in"));
    }

    #[test]
    fn test_badge() {
        assert_eq!(CheckInOutcome { points_earned: 5 }.badge(), "+5 pts");
    }
}
