//! Referral card: code, count, points and share links

use crate::actions::{load_referral_summary, referral_link, share_url, SharePlatform};
use crate::session::SessionProvider;
use crate::views::{LoadState, ViewScope};
use flowva_core::{Error, ReferralSummary, RewardsBackend};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shown instead of the card when no user is signed in
pub const SIGNED_OUT_MESSAGE: &str = "Please log in to view referrals";

pub struct ReferralPanel {
    backend: Arc<dyn RewardsBackend>,
    session: Arc<SessionProvider>,
    site_origin: String,
    scope: ViewScope,
    state: LoadState<ReferralSummary>,
}

impl ReferralPanel {
    pub fn new(
        backend: Arc<dyn RewardsBackend>,
        session: Arc<SessionProvider>,
        site_origin: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            session,
            site_origin: site_origin.into(),
            scope: ViewScope::new(),
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> &LoadState<ReferralSummary> {
        &self.state
    }

    pub async fn load(&mut self) {
        let user_id = self.session.user_id();
        self.state = LoadState::Loading;

        let loaded = self
            .scope
            .run(load_referral_summary(self.backend.as_ref(), user_id.as_ref()))
            .await;

        match loaded {
            Some(Ok(summary)) => self.state = LoadState::Ready(summary),
            Some(Err(e)) => {
                warn!("Referral panel failed: {}", e);
                self.state = LoadState::Failed(e);
            }
            None => debug!("Referral view torn down; discarding response"),
        }
    }

    /// Message for the failed state
    pub fn error_message(&self) -> Option<String> {
        match self.state.error()? {
            Error::NotAuthenticated => Some(SIGNED_OUT_MESSAGE.to_string()),
            other => Some(other.message()),
        }
    }

    pub fn link(&self) -> Option<String> {
        let summary = self.state.ready()?;
        referral_link(&self.site_origin, &summary.referral_code)
    }

    pub fn share_url(&self, platform: SharePlatform) -> Option<String> {
        self.link().map(|link| share_url(platform, &link))
    }

    pub fn teardown(&self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{backend_error, referral_rows, MockBackend, MockIdentity};
    use flowva_core::Points;

    async fn panel(identity: MockIdentity) -> (Arc<MockBackend>, ReferralPanel) {
        let backend = Arc::new(MockBackend::new());
        let session = Arc::new(SessionProvider::new(Arc::new(identity)));
        session.init().await;
        let panel = ReferralPanel::new(backend.clone(), session, "https://app.flowvahub.com");
        (backend, panel)
    }

    #[tokio::test]
    async fn test_ready_with_link() {
        let (backend, mut panel) = panel(MockIdentity::signed_in("u1")).await;
        backend.set_referrals(Ok(referral_rows(3)));

        panel.load().await;

        let summary = panel.state().ready().unwrap();
        assert_eq!(summary.points_earned, Points(75));
        assert_eq!(
            panel.link().as_deref(),
            Some("https://app.flowvahub.com/signup?ref=FLOW42")
        );
        assert!(panel
            .share_url(SharePlatform::Linkedin)
            .unwrap()
            .starts_with("https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2F"));
    }

    #[tokio::test]
    async fn test_signed_out_message() {
        let (backend, mut panel) = panel(MockIdentity::signed_out()).await;
        panel.load().await;
        assert_eq!(panel.error_message().as_deref(), Some(SIGNED_OUT_MESSAGE));
        assert_eq!(panel.link(), None);
        assert_eq!(backend.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_shows_backend_message() {
        let (backend, mut panel) = panel(MockIdentity::signed_in("u1")).await;
        backend.set_referrals(Err(backend_error("relation does not exist")));
        panel.load().await;
        assert_eq!(
            panel.error_message().as_deref(),
            Some("relation does not exist")
        );
    }
}
