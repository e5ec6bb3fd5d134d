//! Dashboard: points balance, streak, week strip and daily check-in

use crate::actions::{load_recent_transactions, perform_check_in};
use crate::rules::{compute_week_view, gift_card_progress, LevelProgress};
use crate::session::SessionProvider;
use crate::views::{LoadState, ViewScope};
use chrono::NaiveDate;
use flowva_core::{
    CheckInOutcome, Error, PointsTransaction, Result, RewardsBackend, UserRewardsState,
    WeekDayView,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shown on the check-in button when no user is signed in
pub const SIGN_IN_TO_CLAIM_MESSAGE: &str = "Please sign in to claim points!";

pub struct DashboardController {
    backend: Arc<dyn RewardsBackend>,
    session: Arc<SessionProvider>,
    scope: ViewScope,
    state: LoadState<UserRewardsState>,
    claiming: bool,
    notice: Option<CheckInOutcome>,
    check_in_error: Option<String>,
}

impl DashboardController {
    pub fn new(backend: Arc<dyn RewardsBackend>, session: Arc<SessionProvider>) -> Self {
        Self {
            backend,
            session,
            scope: ViewScope::new(),
            state: LoadState::Loading,
            claiming: false,
            notice: None,
            check_in_error: None,
        }
    }

    pub fn state(&self) -> &LoadState<UserRewardsState> {
        &self.state
    }

    /// True while a check-in request is outstanding
    pub fn is_claiming(&self) -> bool {
        self.claiming
    }

    /// Pending success notice; stays until acknowledged
    pub fn notice(&self) -> Option<&CheckInOutcome> {
        self.notice.as_ref()
    }

    /// Inline message from the last failed check-in
    pub fn check_in_error(&self) -> Option<&str> {
        self.check_in_error.as_deref()
    }

    /// Fetch the dashboard snapshot and replace the cached state
    ///
    /// Results arriving after [`teardown`](Self::teardown) are dropped.
    pub async fn load(&mut self) {
        let Some(user_id) = self.session.user_id() else {
            self.state = LoadState::Failed(Error::NotAuthenticated);
            return;
        };

        if self.scope.is_cancelled() {
            debug!("Dashboard view torn down; skipping load");
            return;
        }

        self.state = LoadState::Loading;
        let fetched = self
            .scope
            .run(self.backend.get_user_dashboard(&user_id))
            .await;

        match fetched {
            Some(Ok(response)) => {
                let state = response.into_state();
                debug!(
                    "Dashboard loaded: {} points, streak {}",
                    state.total_points, state.current_streak
                );
                self.state = LoadState::Ready(state);
            }
            Some(Err(e)) => {
                warn!("Dashboard load failed: {}", e);
                self.state = LoadState::Failed(Error::LoadError(e.message()));
            }
            None => debug!("Dashboard view torn down; discarding response"),
        }
    }

    /// Claim today's points, then refresh the snapshot once
    ///
    /// The claim itself is not cancellable: once sent it is awaited so the
    /// outcome is known. Only the follow-up reload is scoped to the view.
    pub async fn check_in(&mut self) -> Result<CheckInOutcome> {
        let user_id = self.session.user_id();
        self.claiming = true;
        self.check_in_error = None;

        let result = perform_check_in(self.backend.as_ref(), user_id.as_ref()).await;
        self.claiming = false;

        match result {
            Ok(outcome) => {
                self.load().await;
                self.notice = Some(outcome);
                info!("Check-in notice: {}", outcome.badge());
                Ok(outcome)
            }
            Err(e) => {
                self.check_in_error = Some(match &e {
                    Error::NotAuthenticated => SIGN_IN_TO_CLAIM_MESSAGE.to_string(),
                    other => other.message(),
                });
                Err(e)
            }
        }
    }

    /// Dismiss the success notice
    pub fn acknowledge_notice(&mut self) {
        self.notice = None;
    }

    /// Seven-day strip ending at `today`
    pub fn week_view(&self, today: NaiveDate) -> Vec<WeekDayView> {
        let dates = self
            .state
            .ready()
            .map(UserRewardsState::checked_in_dates)
            .unwrap_or_else(HashSet::new);
        compute_week_view(today, &dates)
    }

    pub fn gift_card_progress(&self) -> f64 {
        self.state
            .ready()
            .map(|s| gift_card_progress(s.total_points))
            .unwrap_or(0.0)
    }

    pub fn level_progress(&self) -> Option<LevelProgress> {
        self.state
            .ready()
            .map(|s| LevelProgress::from_points(s.total_points))
    }

    /// Recent ledger rows; empty if the view was torn down mid-fetch
    pub async fn load_history(&self, limit: u32) -> Result<Vec<PointsTransaction>> {
        let user_id = self.session.user_id();
        self.scope
            .run(load_recent_transactions(
                self.backend.as_ref(),
                user_id.as_ref(),
                limit,
            ))
            .await
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    /// Cancel in-flight loads; their results are discarded
    pub fn teardown(&self) {
        self.scope.cancel();
    }
}
