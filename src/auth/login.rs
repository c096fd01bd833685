//! Login and logout orchestration over the credential, attempt and session stores.

use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use super::{
    clock::Clock,
    credentials::{CredentialStore, PublicUser},
    error::{ErrorKind, LoginError},
    rate_limit::RateLimiter,
    session::SessionStore,
    types::{LoggedOutUser, LoginResult, LoginSuccess, LogoutResult, SessionValidation},
    utils::non_blank,
};

pub struct Authenticator {
    credentials: Arc<dyn CredentialStore>,
    rate_limiter: Arc<dyn RateLimiter>,
    sessions: Arc<SessionStore>,
    clock: Arc<dyn Clock>,
}

impl Authenticator {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        rate_limiter: Arc<dyn RateLimiter>,
        sessions: Arc<SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            rate_limiter,
            sessions,
            clock,
        }
    }

    /// Run the login protocol and flatten the outcome into a `LoginResult`.
    ///
    /// Never fails: store faults come back as `SERVER_ERROR`.
    pub fn login(&self, username: &str, password: &str) -> LoginResult {
        let result = self.authenticate(username, password);
        if let Err(err) = &result {
            match err.kind() {
                ErrorKind::Internal => error!("Login failed with internal error: {err}"),
                ErrorKind::Policy => warn!("Login rejected: {err}"),
                ErrorKind::Input | ErrorKind::Auth => debug!("Login rejected: {err}"),
            }
        }
        result.into()
    }

    /// Check credentials and mint a session.
    ///
    /// Username and password are both trimmed. Unknown users, inactive users
    /// and wrong passwords each count as a failed attempt for the username.
    ///
    /// # Errors
    /// Returns the `LoginError` matching the first failed check.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, username: &str, password: &str) -> Result<LoginSuccess, LoginError> {
        let (Some(username), Some(password)) = (non_blank(username), non_blank(password)) else {
            return Err(LoginError::InvalidInput);
        };

        if self.rate_limiter.is_locked(username)? {
            return Err(LoginError::RateLimited(username.to_string()));
        }

        let Some(record) = self.credentials.find_by_username(username)? else {
            self.credentials.verify_decoy(password);
            self.rate_limiter.record_failure(username)?;
            return Err(LoginError::UserNotFound(username.to_string()));
        };

        if !record.is_active() {
            // Same digest work as an active account, result ignored.
            let _ = self.credentials.verify_password(&record, password);
            self.rate_limiter.record_failure(username)?;
            return Err(LoginError::UserInactive(username.to_string()));
        }

        if !self.credentials.verify_password(&record, password) {
            self.rate_limiter.record_failure(username)?;
            return Err(LoginError::InvalidPassword(username.to_string()));
        }

        self.rate_limiter.clear(username)?;

        let user = PublicUser::from(&record);
        let session = self.sessions.issue(&user)?;

        debug!("Login successful");

        Ok(LoginSuccess {
            token: session.token.clone(),
            user,
            session,
        })
    }

    #[instrument(skip_all)]
    pub fn validate_session(&self, token: &str) -> SessionValidation {
        let result = self.sessions.validate(token);
        if let Err(reason) = &result {
            debug!("Session rejected: {reason}");
        }
        result.into()
    }

    /// Acknowledge a logout. No session is touched; see `logout_with_token`.
    #[instrument(skip(self))]
    pub fn logout(&self, username: &str) -> LogoutResult {
        let Some(username) = non_blank(username) else {
            return LogoutResult {
                success: false,
                message: "Username is required".to_string(),
                user: None,
            };
        };

        LogoutResult {
            success: true,
            message: "Logout successful".to_string(),
            user: Some(LoggedOutUser {
                username: username.to_string(),
                logout_time: self.clock.now(),
            }),
        }
    }

    /// Logout that also revokes the presented session token.
    ///
    /// The token is revoked only when its session belongs to `username`; a
    /// token owned by someone else fails the logout and stays valid. Unknown or
    /// expired tokens leave nothing to revoke and the logout is acknowledged.
    #[instrument(skip(self, token))]
    pub fn logout_with_token(&self, username: &str, token: &str) -> LogoutResult {
        let result = self.logout(username);
        let Some(owner) = result.user.as_ref().map(|user| user.username.clone()) else {
            return result;
        };

        match self.sessions.validate(token) {
            Ok(session) if session.username != owner => {
                warn!("Logout token belongs to another user");
                LogoutResult {
                    success: false,
                    message: "Session does not belong to user".to_string(),
                    user: None,
                }
            }
            Ok(_) => {
                self.sessions.revoke(token);
                result
            }
            Err(reason) => {
                debug!("Logout token was not an active session: {reason}");
                result
            }
        }
    }

    /// Number of live sessions.
    pub fn active_sessions(&self) -> usize {
        self.sessions.count()
    }
}
