//! REST/RPC client for the rewards backend

use crate::config::ClientConfig;
use flowva_core::{
    CheckInResponse, DashboardResponse, Error, PointsTransaction, ReferralRow, Result, UserId,
    UserRewardsRow,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Response,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::{debug, error, instrument};

const USER_AGENT_VALUE: &str = concat!("flowva-client/", env!("CARGO_PKG_VERSION"));

/// Characters of an unparseable body kept in the error log
const BODY_PREVIEW_CHARS: usize = 500;

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// HTTP client for the backend's tables and stored procedures
///
/// Requests are made as the anon role until an access token is set,
/// after which row-level security sees the signed-in user.
pub struct SupabaseClient {
    http: Client,
    config: ClientConfig,
    access_token: RwLock<Option<String>>,
}

impl SupabaseClient {
    /// Create a new client; picks up `config.access_token` if present
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| Error::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        let access_token = RwLock::new(config.access_token.clone());
        Ok(Self {
            http,
            config,
            access_token,
        })
    }

    /// Replace (or clear) the bearer token used for requests
    pub fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn bearer(&self) -> String {
        self.access_token
            .read()
            .ok()
            .and_then(|t| t.clone())
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    /// Headers required by the gateway on every request
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.config.anon_key)
                .map_err(|e| Error::Config(format!("invalid anon key: {}", e)))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.bearer()))
                .map_err(|e| Error::AuthenticationError(format!("invalid access token: {}", e)))?,
        );
        Ok(headers)
    }

    /// Check if response indicates authentication failure
    fn check_auth_error(response: &Response) -> Option<Error> {
        match response.status().as_u16() {
            401 => Some(Error::TokenExpired),
            403 => Some(Error::AuthenticationError("Access forbidden".to_string())),
            _ => None,
        }
    }

    /// Read the body, mapping non-2xx statuses to `ApiError` with the
    /// PostgREST message when one is present
    async fn read_body<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        let body_text = response.text().await.map_err(|e| {
            error!("Failed to read {} response body: {}", what, e);
            Error::NetworkError(e.to_string())
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<PostgrestError>(&body_text)
                .ok()
                .and_then(|e| {
                    debug!("{} failed: code={:?} hint={:?}", what, e.code, e.hint);
                    e.message
                })
                .unwrap_or_else(|| format!("HTTP {}: {}", status, body_text));
            error!("{} request failed: HTTP {}: {}", what, status, message);
            return Err(Error::ApiError(message));
        }

        serde_json::from_str(&body_text).map_err(|e| {
            error!(
                "Failed to parse {} response: {}. Body preview: {}",
                what,
                e,
                body_preview(&body_text)
            );
            Error::InvalidData(e.to_string())
        })
    }

    /// Like [`read_body`](Self::read_body), but a `null` body yields `T::default()`
    async fn read_object<T: DeserializeOwned + Default>(response: Response, what: &str) -> Result<T> {
        let data: Option<T> = Self::read_body(response, what).await?;
        Ok(data.unwrap_or_default())
    }

    async fn send_rpc<A: Serialize + ?Sized>(&self, name: &str, args: &A) -> Result<Response> {
        let url = format!("{}/rpc/{}", self.config.rest_url(), name);
        debug!("Calling RPC: {}", url);

        let response = self
            .http
            .post(&url)
            .headers(self.default_headers()?)
            .json(args)
            .send()
            .await?;

        debug!("RPC {} status: {}", name, response.status());
        Ok(response)
    }

    /// Call a stored procedure via `POST /rest/v1/rpc/{name}`
    pub async fn rpc<A, T>(&self, name: &str, args: &A) -> Result<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_rpc(name, args).await?;
        Self::read_body(response, name).await
    }

    /// Call a stored procedure returning a single object, or `null`
    pub async fn rpc_object<A, T>(&self, name: &str, args: &A) -> Result<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let response = self.send_rpc(name, args).await?;
        Self::read_object(response, name).await
    }

    /// Read rows via `GET /rest/v1/{table}?{query}`
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.config.rest_url(), table);
        debug!("Selecting from {} with {:?}", table, query);

        let response = self
            .http
            .get(&url)
            .headers(self.default_headers()?)
            .query(query)
            .send()
            .await?;

        Self::read_body(response, table).await
    }

    /// Consolidated dashboard snapshot
    #[instrument(skip(self))]
    pub async fn get_user_dashboard(&self, user_id: &UserId) -> Result<DashboardResponse> {
        let args = serde_json::json!({ "p_user_id": user_id.as_str() });
        let data: DashboardResponse = self.rpc_object("get_user_dashboard_data", &args).await?;

        debug!(
            "Dashboard fetched: {} week markers, can_check_in={:?}",
            data.check_in_week.as_ref().map(|w| w.len()).unwrap_or(0),
            data.can_check_in_today
        );
        Ok(data)
    }

    /// Submit today's check-in
    #[instrument(skip(self))]
    pub async fn check_in(&self, user_id: &UserId) -> Result<CheckInResponse> {
        let args = serde_json::json!({ "p_user_id": user_id.as_str() });
        let data: CheckInResponse = self.rpc_object("handle_daily_checkin", &args).await?;

        debug!(
            "Check-in response: success={}, points={:?}",
            data.success, data.points_earned
        );
        Ok(data)
    }

    /// The user's `user_rewards` row (zero or one)
    #[instrument(skip(self))]
    pub async fn get_user_rewards(&self, user_id: &UserId) -> Result<Option<UserRewardsRow>> {
        let rows: Vec<UserRewardsRow> = self
            .select(
                "user_rewards",
                &[
                    ("select", "*".to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Referrals made by this user
    #[instrument(skip(self))]
    pub async fn get_user_referrals(&self, user_id: &UserId) -> Result<Vec<ReferralRow>> {
        let rows: Vec<ReferralRow> = self
            .select(
                "referrals",
                &[
                    ("select", "*".to_string()),
                    ("referrer_id", format!("eq.{}", user_id)),
                ],
            )
            .await?;
        debug!("Fetched {} referrals", rows.len());
        Ok(rows)
    }

    /// Latest points ledger rows
    #[instrument(skip(self))]
    pub async fn get_points_transactions(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<PointsTransaction>> {
        let rows: Vec<PointsTransaction> = self
            .select(
                "points_transactions",
                &[
                    ("select", "*".to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                    ("order", "created_at.desc".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        debug!("Fetched {} points transactions", rows.len());
        Ok(rows)
    }
}

/// First characters of `body`, cut on a char boundary
fn body_preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
