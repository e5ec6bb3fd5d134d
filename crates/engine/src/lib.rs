//! Flowva Engine - Rewards rules, actions, session tracking and view controllers

pub mod actions;
pub mod rules;
pub mod session;
pub mod views;

#[cfg(test)]
mod testing;

pub use actions::{
    load_recent_transactions, load_referral_summary, perform_check_in, SharePlatform,
    POINTS_PER_REFERRAL,
};
pub use session::SessionProvider;
pub use views::{DashboardController, LoadState, RedeemPanel, ReferralPanel, ViewScope};
