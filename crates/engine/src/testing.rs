//! Test doubles for the backend and identity seams

use async_trait::async_trait;
use flowva_core::{
    AuthCallback, AuthEvent, AuthSubscription, AuthUser, CheckInResponse, DashboardResponse,
    Error, IdentityProvider, PointsTransaction, ReferralRow, Result, RewardsBackend, RewardsData,
    Session, UserId, UserRewardsRow,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn user(id: &str) -> AuthUser {
    AuthUser {
        id: id.to_string(),
        email: Some(format!("{}@example.com", id)),
        user_metadata: serde_json::Value::Null,
    }
}

pub fn session(id: &str) -> Session {
    Session {
        access_token: format!("token-{}", id),
        refresh_token: None,
        expires_at: None,
        user: user(id),
    }
}

pub fn dashboard(points: u64, streak: u32, can_check_in: bool, dates: &[&str]) -> DashboardResponse {
    DashboardResponse {
        rewards_data: Some(RewardsData {
            total_points: Some(points),
            current_streak: Some(streak),
        }),
        can_check_in_today: Some(can_check_in),
        check_in_week: Some(
            dates
                .iter()
                .map(|d| flowva_core::CheckInDay { date: d.to_string() })
                .collect(),
        ),
        ..Default::default()
    }
}

pub fn referral_rows(n: usize) -> Vec<ReferralRow> {
    (0..n)
        .map(|i| ReferralRow {
            id: serde_json::json!(i),
            referrer_id: Some("u1".to_string()),
            referred_id: Some(format!("friend-{}", i)),
            created_at: None,
        })
        .collect()
}

/// Scripted backend that counts calls and records their order
pub struct MockBackend {
    pub dashboard: Mutex<Result<DashboardResponse>>,
    pub check_in: Mutex<Result<CheckInResponse>>,
    pub rewards_row: Mutex<Result<Option<UserRewardsRow>>>,
    pub referrals: Mutex<Result<Vec<ReferralRow>>>,
    pub transactions: Mutex<Result<Vec<PointsTransaction>>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            dashboard: Mutex::new(Ok(dashboard(120, 2, true, &[]))),
            check_in: Mutex::new(Ok(CheckInResponse {
                success: true,
                points_earned: Some(5),
                message: None,
            })),
            rewards_row: Mutex::new(Ok(Some(UserRewardsRow {
                referral_code: Some("FLOW42".to_string()),
                ..Default::default()
            }))),
            referrals: Mutex::new(Ok(Vec::new())),
            transactions: Mutex::new(Ok(Vec::new())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_dashboard(&self, value: Result<DashboardResponse>) {
        *self.dashboard.lock().unwrap() = value;
    }

    pub fn set_check_in(&self, value: Result<CheckInResponse>) {
        *self.check_in.lock().unwrap() = value;
    }

    pub fn set_rewards_row(&self, value: Result<Option<UserRewardsRow>>) {
        *self.rewards_row.lock().unwrap() = value;
    }

    pub fn set_referrals(&self, value: Result<Vec<ReferralRow>>) {
        *self.referrals.lock().unwrap() = value;
    }

    pub fn set_transactions(&self, value: Result<Vec<PointsTransaction>>) {
        *self.transactions.lock().unwrap() = value;
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_log(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }
}

#[async_trait]
impl RewardsBackend for MockBackend {
    async fn get_user_dashboard(&self, _user_id: &UserId) -> Result<DashboardResponse> {
        self.record("get_user_dashboard");
        self.dashboard.lock().unwrap().clone()
    }

    async fn check_in(&self, _user_id: &UserId) -> Result<CheckInResponse> {
        self.record("check_in");
        self.check_in.lock().unwrap().clone()
    }

    async fn get_user_rewards(&self, _user_id: &UserId) -> Result<Option<UserRewardsRow>> {
        self.record("get_user_rewards");
        self.rewards_row.lock().unwrap().clone()
    }

    async fn get_user_referrals(&self, _user_id: &UserId) -> Result<Vec<ReferralRow>> {
        self.record("get_user_referrals");
        self.referrals.lock().unwrap().clone()
    }

    async fn get_points_transactions(
        &self,
        _user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<PointsTransaction>> {
        self.record("get_points_transactions");
        self.transactions
            .lock()
            .unwrap()
            .clone()
            .map(|rows| rows.into_iter().take(limit as usize).collect())
    }
}

type Listeners = Arc<Mutex<HashMap<usize, AuthCallback>>>;

/// Identity provider that delivers events synchronously
pub struct MockIdentity {
    pub session: Mutex<Result<Option<Session>>>,
    pub sign_out_result: Mutex<Result<()>>,
    pub sign_out_calls: AtomicUsize,
    listeners: Listeners,
    next_id: AtomicUsize,
}

impl MockIdentity {
    pub fn signed_in(id: &str) -> Self {
        Self::with_session(Ok(Some(session(id))))
    }

    pub fn signed_out() -> Self {
        Self::with_session(Ok(None))
    }

    pub fn with_session(session: Result<Option<Session>>) -> Self {
        Self {
            session: Mutex::new(session),
            sign_out_result: Mutex::new(Ok(())),
            sign_out_calls: AtomicUsize::new(0),
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicUsize::new(0),
        }
    }

    pub fn emit(&self, event: AuthEvent) {
        for callback in self.listeners.lock().unwrap().values() {
            callback(event.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn get_current_session(&self) -> Result<Option<Session>> {
        self.session.lock().unwrap().clone()
    }

    fn on_auth_change(&self, callback: AuthCallback) -> AuthSubscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().unwrap().insert(id, callback);
        let listeners = self.listeners.clone();
        AuthSubscription::new(move || {
            listeners.lock().unwrap().remove(&id);
        })
    }

    async fn sign_out(&self) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.sign_out_result.lock().unwrap().clone()
    }
}

pub fn backend_error(msg: &str) -> Error {
    Error::ApiError(msg.to_string())
}
