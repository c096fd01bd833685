//! Tunables for lockout and session lifetime.

use chrono::TimeDelta;

const DEFAULT_SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;
const DEFAULT_LOCKOUT_WINDOW_SECONDS: i64 = 15 * 60;
const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 5;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    session_ttl_seconds: i64,
    lockout_window_seconds: i64,
    max_failed_attempts: u32,
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            lockout_window_seconds: DEFAULT_LOCKOUT_WINDOW_SECONDS,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_lockout_window_seconds(mut self, seconds: i64) -> Self {
        self.lockout_window_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_max_failed_attempts(mut self, attempts: u32) -> Self {
        self.max_failed_attempts = attempts;
        self
    }

    #[must_use]
    pub fn session_ttl(&self) -> TimeDelta {
        TimeDelta::seconds(self.session_ttl_seconds)
    }

    #[must_use]
    pub fn lockout_window(&self) -> TimeDelta {
        TimeDelta::seconds(self.lockout_window_seconds)
    }

    #[must_use]
    pub fn max_failed_attempts(&self) -> u32 {
        self.max_failed_attempts
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}
