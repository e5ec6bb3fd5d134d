//! Contracts of the remote services the client consumes
//!
//! The engine is written against these traits so that views can be driven
//! by the HTTP clients in `flowva-networking` or by test doubles.

use crate::errors::Result;
use crate::models::{
    AuthEvent, CheckInResponse, DashboardResponse, PointsTransaction, ReferralRow, Session,
    UserRewardsRow,
};
use crate::types::UserId;
use async_trait::async_trait;

/// Stored procedures and tables of the rewards backend
#[async_trait]
pub trait RewardsBackend: Send + Sync {
    /// Consolidated snapshot: points, streak, week markers, eligibility
    async fn get_user_dashboard(&self, user_id: &UserId) -> Result<DashboardResponse>;

    /// Claim today's check-in. Rejections arrive inside the payload.
    async fn check_in(&self, user_id: &UserId) -> Result<CheckInResponse>;

    /// The user's `user_rewards` row, if one exists
    async fn get_user_rewards(&self, user_id: &UserId) -> Result<Option<UserRewardsRow>>;

    /// Referrals where the user is the referrer
    async fn get_user_referrals(&self, user_id: &UserId) -> Result<Vec<ReferralRow>>;

    /// Most recent ledger rows, newest first
    async fn get_points_transactions(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<PointsTransaction>>;
}

/// Listener invoked for every identity change
pub type AuthCallback = Box<dyn Fn(AuthEvent) + Send + Sync + 'static>;

/// Handle returned by [`IdentityProvider::on_auth_change`]
///
/// The listener is released when the handle is dropped or
/// [`unsubscribe`](AuthSubscription::unsubscribe) is called.
pub struct AuthSubscription {
    release: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl AuthSubscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Release the listener now
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// External identity provider (sign-in itself is out of scope)
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Session currently held, if any
    async fn get_current_session(&self) -> Result<Option<Session>>;

    /// Register a listener for sign-in / refresh / sign-out events
    fn on_auth_change(&self, callback: AuthCallback) -> AuthSubscription;

    /// End the session with the provider
    async fn sign_out(&self) -> Result<()>;
}
