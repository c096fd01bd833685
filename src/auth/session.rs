//! Ephemeral session tokens.
//!
//! Tokens map to an immutable snapshot of the user taken at login. Expiry is
//! lazy: an expired entry is dropped the first time it is presented.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tracing::debug;
use utoipa::ToSchema;

use super::{
    clock::Clock,
    config::AuthConfig,
    credentials::{PublicUser, Role},
    error::StoreError,
    utils::generate_session_token,
};

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: u64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<String>,
    pub login_time: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(
    ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, thiserror::Error,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvalidSession {
    #[error("Invalid or expired token")]
    NotFound,
    #[error("Session expired")]
    Expired,
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl SessionStore {
    #[must_use]
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
            ttl: config.session_ttl(),
        }
    }

    /// Mint a token for `user` and store a snapshot of it.
    ///
    /// # Errors
    /// Returns `StoreError::TokenGeneration` if the OS RNG fails.
    pub fn issue(&self, user: &PublicUser) -> Result<Session, StoreError> {
        let token = generate_session_token()?;
        let login_time = self.clock.now();
        let session = Session {
            token: token.clone(),
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            permissions: user.permissions.clone(),
            login_time,
            expires_at: login_time + self.ttl,
        };

        self.sessions.lock().insert(token, session.clone());
        debug!("Issued session for {}", user.username);

        Ok(session)
    }

    /// Look up a token, deleting it if it has expired.
    ///
    /// # Errors
    /// Returns `InvalidSession::NotFound` for unknown tokens and
    /// `InvalidSession::Expired` the first time an expired token is seen.
    pub fn validate(&self, token: &str) -> Result<Session, InvalidSession> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock();

        let expired = match sessions.get(token) {
            None => return Err(InvalidSession::NotFound),
            Some(session) => session.expires_at < now,
        };

        if expired {
            sessions.remove(token);
            return Err(InvalidSession::Expired);
        }

        sessions.get(token).cloned().ok_or(InvalidSession::NotFound)
    }

    /// Delete a token. Returns `false` if it was not present.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.lock().remove(token).is_some()
    }

    /// Number of live sessions. Expired entries are purged first.
    pub fn count(&self) -> usize {
        self.purge_expired();
        self.sessions.lock().len()
    }

    /// Stored entries, including expired ones not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Drop expired sessions. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at >= now);
        before - sessions.len()
    }
}
