//! Identity client: session holder and auth-change broadcaster
//!
//! Sign-in flows live with the hosted identity provider. This client only
//! restores a session from an access token, reports it, forwards identity
//! changes to listeners and signs out.

use crate::config::ClientConfig;
use flowva_core::{AuthEvent, AuthUser, Error, Result, Session};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
};
use std::sync::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument, warn};

/// Buffered auth events per listener before it starts lagging
const EVENT_CAPACITY: usize = 16;

/// Client for the `/auth/v1` endpoints
pub struct SupabaseAuth {
    http: Client,
    config: ClientConfig,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
}

impl SupabaseAuth {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| Error::NetworkError(format!("Failed to create HTTP client: {}", e)))?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            http,
            config,
            session: RwLock::new(None),
            events,
        })
    }

    fn headers(&self, access_token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.config.anon_key)
                .map_err(|e| Error::Config(format!("invalid anon key: {}", e)))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", access_token))
                .map_err(|e| Error::AuthenticationError(format!("invalid access token: {}", e)))?,
        );
        Ok(headers)
    }

    /// Validate an access token against `GET /auth/v1/user` and adopt it
    #[instrument(skip(self, access_token))]
    pub async fn restore_session(&self, access_token: &str) -> Result<Session> {
        let url = format!("{}/user", self.config.auth_url());
        debug!("Restoring session via {}", url);

        let response = self
            .http
            .get(&url)
            .headers(self.headers(access_token)?)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => return Err(Error::TokenExpired),
            _ => {}
        }

        let user: AuthUser = response
            .error_for_status()
            .map_err(|e| {
                error!("Session restore failed: {}", e);
                Error::AuthenticationError(e.to_string())
            })?
            .json()
            .await
            .map_err(|e| {
                error!("Failed to parse auth user: {}", e);
                Error::InvalidData(e.to_string())
            })?;

        let session = Session {
            access_token: access_token.to_string(),
            refresh_token: None,
            expires_at: None,
            user,
        };
        info!("Session restored for user {}", session.user.id);
        self.set_session(session.clone());
        Ok(session)
    }

    /// Adopt a session obtained elsewhere and notify listeners
    pub fn set_session(&self, session: Session) {
        let previous = match self.session.write() {
            Ok(mut guard) => guard.replace(session.clone()),
            Err(_) => {
                warn!("Session lock poisoned; dropping session update");
                return;
            }
        };

        let event = match previous {
            Some(prev) if prev.user.id == session.user.id => AuthEvent::TokenRefreshed(session),
            _ => AuthEvent::SignedIn(session),
        };
        self.emit(event);
    }

    fn take_session(&self) -> Option<Session> {
        self.session.write().ok().and_then(|mut guard| guard.take())
    }

    fn emit(&self, event: AuthEvent) {
        // No receivers is not an error: nobody is listening yet
        let delivered = self.events.send(event).unwrap_or(0);
        debug!("Auth event delivered to {} listener(s)", delivered);
    }

    /// Raw event stream, for listeners that drive their own loop
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// Current session, if one is held
    pub fn session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|guard| guard.clone())
    }

    /// Revoke the session with the provider, then clear it locally
    ///
    /// The local session is cleared and `SignedOut` emitted even when the
    /// remote call fails; the error is still returned.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<()> {
        let Some(session) = self.take_session() else {
            debug!("Sign-out requested without a session");
            self.emit(AuthEvent::SignedOut);
            return Ok(());
        };

        let url = format!("{}/logout", self.config.auth_url());
        let result: Result<()> = async {
            let response = self
                .http
                .post(&url)
                .headers(self.headers(&session.access_token)?)
                .send()
                .await?;
            response.error_for_status().map_err(|e| {
                error!("Logout request failed: {}", e);
                Error::ApiError(e.to_string())
            })?;
            Ok(())
        }
        .await;

        self.emit(AuthEvent::SignedOut);
        info!("Signed out user {}", session.user.id);
        result
    }
}
