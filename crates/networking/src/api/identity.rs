//! `IdentityProvider` over the auth client

use crate::SupabaseAuth;
use async_trait::async_trait;
use flowva_core::{AuthCallback, AuthSubscription, IdentityProvider, Result, Session};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn get_current_session(&self) -> Result<Option<Session>> {
        Ok(self.session())
    }

    /// Spawns a listener task on the current tokio runtime; dropping the
    /// returned handle cancels it.
    fn on_auth_change(&self, callback: AuthCallback) -> AuthSubscription {
        let mut rx = self.subscribe();
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => {
                        debug!("Auth listener released");
                        return;
                    }
                    event = rx.recv() => match event {
                        Ok(event) => callback(event),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Auth listener lagged, {} event(s) skipped", skipped);
                        }
                        Err(RecvError::Closed) => return,
                    }
                }
            }
        });

        AuthSubscription::new(move || cancel.cancel())
    }

    async fn sign_out(&self) -> Result<()> {
        SupabaseAuth::sign_out(self).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClientConfig, SupabaseAuth};
    use flowva_core::{AuthEvent, AuthUser, IdentityProvider, Session};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn session(user_id: &str) -> Session {
        Session {
            access_token: "t".to_string(),
            refresh_token: None,
            expires_at: None,
            user: AuthUser {
                id: user_id.to_string(),
                email: None,
                user_metadata: serde_json::Value::Null,
            },
        }
    }

    #[tokio::test]
    async fn test_listener_stops_after_unsubscribe() {
        let auth = SupabaseAuth::new(ClientConfig::new("https://x.supabase.co", "anon")).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let sub = auth.on_auth_change(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        tokio::time::sleep(Duration::from_millis(20)).await;

        auth.set_session(session("u1"));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(seen.lock().unwrap().len(), 1);

        sub.unsubscribe();
        tokio::time::sleep(Duration::from_millis(20)).await;
        auth.set_session(session("u2"));
        tokio::time::sleep(Duration::from_millis(20)).await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(matches!(seen[0], AuthEvent::SignedIn(_)));
    }
}
