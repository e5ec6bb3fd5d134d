//! Backend-facing actions with their error folding

pub mod check_in;
pub mod ledger;
pub mod referral;

pub use check_in::perform_check_in;
pub use ledger::load_recent_transactions;
pub use referral::{
    load_referral_summary, referral_link, share_message, share_url, summarize, SharePlatform,
    POINTS_PER_REFERRAL,
};
