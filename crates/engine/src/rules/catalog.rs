//! Reward catalog and tab filtering

use flowva_core::{Reward, RewardStatus, RewardTab, RewardType, TabCounts};

/// Cost of the entry-level gift cards
pub const GIFT_CARD_COST: u32 = 5000;

fn entry(
    id: u32,
    title: &str,
    description: &str,
    cost: Option<u32>,
    reward_type: RewardType,
    status: RewardStatus,
) -> Reward {
    Reward {
        id,
        title: title.to_string(),
        description: description.to_string(),
        cost,
        reward_type,
        status,
    }
}

/// The built-in redemption catalog
///
/// Static configuration: lock state is not synced with the backend's
/// `rewards` table.
pub fn default_catalog() -> Vec<Reward> {
    use RewardStatus::*;
    use RewardType::*;

    vec![
        entry(1, "$5 Bank Transfer",
            "The $5 equivalent will be transferred to your bank account.",
            Some(GIFT_CARD_COST), Money, Locked),
        entry(2, "$5 PayPal International",
            "Receive a $5 PayPal balance transfer directly to your PayPal account email.",
            Some(GIFT_CARD_COST), Money, Locked),
        entry(3, "$5 Virtual Visa Card",
            "Use your $5 prepaid card to shop anywhere Visa is accepted online.",
            Some(GIFT_CARD_COST), Gift, Locked),
        entry(4, "$5 Apple Gift Card",
            "Redeem this $5 Apple Gift Card for apps, games, music, movies, and more on the App Store and iTunes.",
            Some(GIFT_CARD_COST), Gift, Locked),
        entry(5, "$5 Google Play Card",
            "Use this $5 Google Play Gift Card to purchase apps, games, movies, books, and more on the Google Play Store.",
            Some(GIFT_CARD_COST), Gift, Locked),
        entry(6, "$5 Amazon Gift Card",
            "Get a $5 digital card to spend on your favorite tools or platforms.",
            Some(GIFT_CARD_COST), Gift, Locked),
        entry(7, "$10 Amazon Gift Card",
            "Get a $10 digital card to spend on your favorite tools or platforms.",
            Some(10_000), Gift, Locked),
        entry(8, "Free Udemy Course", "Coming Soon!", None, Book, ComingSoon),
    ]
}

/// Entries shown on `tab`, in catalog order
pub fn filter_rewards(catalog: &[Reward], tab: RewardTab) -> Vec<&Reward> {
    catalog.iter().filter(|r| tab.matches(r)).collect()
}

/// Totals per tab over the whole catalog
pub fn tab_counts(catalog: &[Reward]) -> TabCounts {
    let count = |tab: RewardTab| catalog.iter().filter(|r| tab.matches(r)).count();
    TabCounts {
        all: catalog.len(),
        unlocked: count(RewardTab::Unlocked),
        locked: count(RewardTab::Locked),
        coming: count(RewardTab::Coming),
    }
}
