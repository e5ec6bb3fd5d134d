//! Reward catalog models for the redemption view

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of reward, drives the card artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
    Money,
    Gift,
    Book,
}

/// Lock state of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardStatus {
    Locked,
    Unlocked,
    ComingSoon,
}

/// A redeemable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Point cost; `None` for entries without a price yet
    pub cost: Option<u32>,
    #[serde(rename = "type")]
    pub reward_type: RewardType,
    pub status: RewardStatus,
}

impl Reward {
    /// Text of the card's action button
    pub fn action_label(&self) -> &'static str {
        match self.status {
            RewardStatus::ComingSoon => "Coming Soon",
            RewardStatus::Unlocked => "Redeem",
            RewardStatus::Locked => "Locked",
        }
    }

    /// "5000 pts", or "0" when unpriced
    pub fn cost_label(&self) -> String {
        match self.cost {
            Some(cost) if cost > 0 => format!("{} pts", cost),
            _ => "0".to_string(),
        }
    }
}

/// Tabs of the redemption view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardTab {
    #[default]
    All,
    Unlocked,
    Locked,
    Coming,
}

impl RewardTab {
    pub const ALL: [RewardTab; 4] = [
        RewardTab::All,
        RewardTab::Unlocked,
        RewardTab::Locked,
        RewardTab::Coming,
    ];

    /// Whether a reward belongs on this tab
    pub fn matches(&self, reward: &Reward) -> bool {
        match self {
            RewardTab::All => true,
            RewardTab::Unlocked => reward.status == RewardStatus::Unlocked,
            RewardTab::Locked => reward.status == RewardStatus::Locked,
            RewardTab::Coming => reward.status == RewardStatus::ComingSoon,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RewardTab::All => "All Rewards",
            RewardTab::Unlocked => "Unlocked",
            RewardTab::Locked => "Locked",
            RewardTab::Coming => "Coming Soon",
        }
    }
}

impl fmt::Display for RewardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RewardTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(RewardTab::All),
            "unlocked" => Ok(RewardTab::Unlocked),
            "locked" => Ok(RewardTab::Locked),
            "coming" | "coming_soon" => Ok(RewardTab::Coming),
            other => Err(format!("unknown reward tab: {}", other)),
        }
    }
}

/// Per-tab totals over the full catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TabCounts {
    pub all: usize,
    pub unlocked: usize,
    pub locked: usize,
    pub coming: usize,
}

impl TabCounts {
    pub fn get(&self, tab: RewardTab) -> usize {
        match tab {
            RewardTab::All => self.all,
            RewardTab::Unlocked => self.unlocked,
            RewardTab::Locked => self.locked,
            RewardTab::Coming => self.coming,
        }
    }
}
