//! Current-user holder shared by the views
//!
//! Constructed once by the front-end and passed to every controller. The
//! user is published on a tokio `watch` channel so renderers can await
//! identity changes instead of polling.

use flowva_core::{AuthEvent, AuthSubscription, AuthUser, IdentityProvider, Result, UserId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct SessionProvider {
    identity: Arc<dyn IdentityProvider>,
    user_tx: Arc<watch::Sender<Option<AuthUser>>>,
    subscription: Mutex<Option<AuthSubscription>>,
}

impl SessionProvider {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        let (user_tx, _) = watch::channel(None);
        Self {
            identity,
            user_tx: Arc::new(user_tx),
            subscription: Mutex::new(None),
        }
    }

    /// Subscribe to identity changes, then read the current session
    ///
    /// A failing session read leaves the provider signed out. An event that
    /// arrives while the read is in flight wins over the read's result.
    pub async fn init(&self) {
        let user_tx = self.user_tx.clone();
        let saw_event = Arc::new(AtomicBool::new(false));
        let saw_event_cb = saw_event.clone();

        let subscription = self.identity.on_auth_change(Box::new(move |event: AuthEvent| {
            saw_event_cb.store(true, Ordering::SeqCst);
            let user = event.session().map(|s| s.user.clone());
            match &user {
                Some(u) => debug!("Auth change: user {}", u.id),
                None => debug!("Auth change: signed out"),
            }
            user_tx.send_replace(user);
        }));

        if let Ok(mut guard) = self.subscription.lock() {
            // Replacing an older handle drops it, which releases its listener
            *guard = Some(subscription);
        }

        let user = match self.identity.get_current_session().await {
            Ok(session) => session.map(|s| s.user),
            Err(e) => {
                warn!("Could not read current session: {}", e);
                None
            }
        };

        if saw_event.load(Ordering::SeqCst) {
            debug!("Auth event arrived during init; keeping it");
            return;
        }
        match &user {
            Some(u) => info!("Session active for {}", u.display_name()),
            None => info!("No active session"),
        }
        self.user_tx.send_replace(user);
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.user_tx.borrow().clone()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_tx.borrow().as_ref().map(AuthUser::user_id)
    }

    /// Receiver that observes every user change
    pub fn watch(&self) -> watch::Receiver<Option<AuthUser>> {
        self.user_tx.subscribe()
    }

    /// Sign out with the provider; the local user is cleared regardless
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.identity.sign_out().await;
        if let Err(e) = &result {
            warn!("Sign-out failed with the provider: {}", e);
        }
        self.user_tx.send_replace(None);
        result
    }

    /// Release the auth listener; no events are observed afterwards
    pub fn teardown(&self) {
        let subscription = self.subscription.lock().ok().and_then(|mut guard| guard.take());
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
            debug!("Session provider torn down");
        }
    }
}

impl Drop for SessionProvider {
    fn drop(&mut self) {
        self.teardown();
    }
}
