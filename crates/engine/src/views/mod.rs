//! Controllers behind the dashboard, referral and redeem views

pub mod dashboard;
pub mod redeem;
pub mod referrals;
pub mod scope;

pub use dashboard::DashboardController;
pub use redeem::RedeemPanel;
pub use referrals::ReferralPanel;
pub use scope::ViewScope;

use flowva_core::Error;

/// Render state of a panel; replaced wholesale on each load
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(Error),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}
