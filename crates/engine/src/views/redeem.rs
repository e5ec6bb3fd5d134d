//! Redeem tab strip over the reward catalog

use crate::rules::{default_catalog, filter_rewards, tab_counts};
use flowva_core::{Reward, RewardTab, TabCounts};

/// Shown when the active tab has no rewards
pub const EMPTY_TAB_MESSAGE: &str = "No rewards found in this category.";

pub struct RedeemPanel {
    catalog: Vec<Reward>,
    active: RewardTab,
}

impl RedeemPanel {
    pub fn new(catalog: Vec<Reward>) -> Self {
        Self {
            catalog,
            active: RewardTab::All,
        }
    }

    pub fn active_tab(&self) -> RewardTab {
        self.active
    }

    pub fn select_tab(&mut self, tab: RewardTab) {
        self.active = tab;
    }

    pub fn visible(&self) -> Vec<&Reward> {
        filter_rewards(&self.catalog, self.active)
    }

    /// Per-tab counts over the whole catalog; independent of the active tab
    pub fn counts(&self) -> TabCounts {
        tab_counts(&self.catalog)
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.visible().is_empty().then_some(EMPTY_TAB_MESSAGE)
    }
}

impl Default for RedeemPanel {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}
