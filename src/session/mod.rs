//! Signed-in session state
//!
//! The session lives in the key-value store under the `token` and `user`
//! keys. It is created on login and destroyed on logout or when the backend
//! rejects the credential with a 401. Interested parties learn about those
//! transitions through a broadcast channel instead of a forced navigation.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::client::models::SessionUser;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the signed-in user as JSON
pub const USER_KEY: &str = "user";

/// Route a consumer should navigate to once the session is gone
pub const LOGIN_ROUTE: &str = "/login";

const EVENT_BUFFER: usize = 16;

/// Session lifecycle transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login stored a new credential
    SignedIn { username: String },
    /// The user logged out explicitly
    SignedOut,
    /// The backend rejected the credential; the session was cleared
    Expired { redirect_to: &'static str },
}

/// Process-wide session holder, injected into the HTTP client
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self { store, events }
    }

    /// Subscribe to session transitions that happen after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Current bearer token. Storage failures read as "no token".
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("Failed to read session token: {}", e);
                None
            }
        }
    }

    /// Current user record, if one is stored and parses
    pub fn user(&self) -> Option<SessionUser> {
        let raw = match self.store.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Failed to read session user: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Ignoring unreadable session user: {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a freshly issued credential and its user
    pub fn establish(&self, token: &str, user: &SessionUser) -> Result<()> {
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_KEY, &serde_json::to_string(user)?)?;
        log::debug!("Session established for {}", user.username);

        let _ = self.events.send(SessionEvent::SignedIn {
            username: user.username.clone(),
        });
        Ok(())
    }

    /// Replace the stored user record, keeping the token
    pub fn update_user(&self, user: &SessionUser) -> Result<()> {
        self.store.set(USER_KEY, &serde_json::to_string(user)?)?;
        Ok(())
    }

    /// Explicit logout
    pub fn sign_out(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }

    /// Tear the session down after the backend rejected it.
    ///
    /// Runs before the rejected call returns to its caller. Storage errors are
    /// logged rather than returned so the 401 still reaches the caller.
    pub fn expire(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                log::warn!("Failed to clear session key {}: {}", key, e);
            }
        }
        log::info!("Session rejected by backend, redirecting to {}", LOGIN_ROUTE);

        let _ = self.events.send(SessionEvent::Expired {
            redirect_to: LOGIN_ROUTE,
        });
    }
}
