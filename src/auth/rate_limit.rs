//! Failed-attempt tracking and lockout decisions for login flows.
//!
//! A subject is locked once it accumulates `max_failed_attempts` failures and
//! the last failure is younger than the lockout window. Entries whose window
//! has elapsed are evicted on access, so lockouts heal purely with time.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

use super::{clock::Clock, config::AuthConfig, error::StoreError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptState {
    pub failure_count: u32,
    pub last_failure_at: DateTime<Utc>,
}

pub trait RateLimiter: Send + Sync {
    /// # Errors
    /// Returns `StoreError` when the attempt store cannot be consulted.
    fn is_locked(&self, subject: &str) -> Result<bool, StoreError>;

    /// # Errors
    /// Returns `StoreError` when the attempt store cannot be updated.
    fn record_failure(&self, subject: &str) -> Result<(), StoreError>;

    /// # Errors
    /// Returns `StoreError` when the attempt store cannot be updated.
    fn clear(&self, subject: &str) -> Result<(), StoreError>;
}

/// Limiter that never locks and keeps no state.
///
/// Plug point for deployments that throttle logins upstream of the
/// `Authenticator`; the test suites also use it to isolate the login steps
/// from lockout.
#[derive(Clone, Debug)]
pub struct NoopRateLimiter;

impl RateLimiter for NoopRateLimiter {
    fn is_locked(&self, _subject: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    fn record_failure(&self, _subject: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn clear(&self, _subject: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-memory attempt counters keyed by subject.
#[derive(Debug)]
pub struct LoginAttempts {
    attempts: Mutex<HashMap<String, AttemptState>>,
    clock: Arc<dyn Clock>,
    max_failed_attempts: u32,
    window: TimeDelta,
}

impl LoginAttempts {
    #[must_use]
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
            clock,
            max_failed_attempts: config.max_failed_attempts(),
            window: config.lockout_window(),
        }
    }

    /// Current state for a subject, without evicting it.
    #[must_use]
    pub fn attempt_state(&self, subject: &str) -> Option<AttemptState> {
        self.attempts.lock().get(subject).cloned()
    }

    /// Drop every entry whose window has elapsed. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut attempts = self.attempts.lock();
        let before = attempts.len();
        attempts.retain(|_, state| now - state.last_failure_at < self.window);
        before - attempts.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attempts.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attempts.lock().is_empty()
    }
}

impl RateLimiter for LoginAttempts {
    fn is_locked(&self, subject: &str) -> Result<bool, StoreError> {
        let now = self.clock.now();
        let mut attempts = self.attempts.lock();

        let Some((failure_count, last_failure_at)) = attempts
            .get(subject)
            .map(|state| (state.failure_count, state.last_failure_at))
        else {
            return Ok(false);
        };

        // Eviction runs before the threshold test so a lock never outlives its window.
        if now - last_failure_at >= self.window {
            debug!("Lockout window elapsed for {subject}, resetting");
            attempts.remove(subject);
            return Ok(false);
        }

        Ok(failure_count >= self.max_failed_attempts)
    }

    fn record_failure(&self, subject: &str) -> Result<(), StoreError> {
        let now = self.clock.now();
        let mut attempts = self.attempts.lock();
        let state = attempts
            .entry(subject.to_string())
            .or_insert(AttemptState {
                failure_count: 0,
                last_failure_at: now,
            });
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure_at = now;
        debug!("Recorded failure {} for {subject}", state.failure_count);
        Ok(())
    }

    fn clear(&self, subject: &str) -> Result<(), StoreError> {
        self.attempts.lock().remove(subject);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::clock::ManualClock;
    use anyhow::Result;
    use std::thread;

    fn limiter() -> (Arc<ManualClock>, LoginAttempts) {
        let clock = Arc::new(ManualClock::default());
        let limiter = LoginAttempts::new(&AuthConfig::new(), clock.clone());
        (clock, limiter)
    }

    #[test]
    fn noop_rate_limiter_never_locks() -> Result<()> {
        let limiter = NoopRateLimiter;
        for _ in 0..10 {
            limiter.record_failure("admin")?;
        }
        assert!(!limiter.is_locked("admin")?);
        Ok(())
    }

    #[test]
    fn locks_after_five_failures() -> Result<()> {
        let (_clock, limiter) = limiter();
        for _ in 0..4 {
            limiter.record_failure("alice")?;
            assert!(!limiter.is_locked("alice")?);
        }
        limiter.record_failure("alice")?;
        assert!(limiter.is_locked("alice")?);
        assert!(!limiter.is_locked("bob")?);
        Ok(())
    }

    #[test]
    fn first_failure_creates_entry_with_count_one() -> Result<()> {
        let (clock, limiter) = limiter();
        limiter.record_failure("alice")?;
        assert_eq!(
            limiter.attempt_state("alice"),
            Some(AttemptState {
                failure_count: 1,
                last_failure_at: clock.now(),
            })
        );
        Ok(())
    }

    #[test]
    fn failure_refreshes_timestamp() -> Result<()> {
        let (clock, limiter) = limiter();
        limiter.record_failure("alice")?;
        clock.advance(TimeDelta::minutes(10));
        limiter.record_failure("alice")?;
        let state = limiter.attempt_state("alice");
        assert_eq!(
            state.map(|s| (s.failure_count, s.last_failure_at)),
            Some((2, clock.now()))
        );
        Ok(())
    }

    #[test]
    fn lock_heals_once_window_elapses() -> Result<()> {
        let (clock, limiter) = limiter();
        for _ in 0..5 {
            limiter.record_failure("alice")?;
        }
        clock.advance(TimeDelta::minutes(14) + TimeDelta::seconds(59));
        assert!(limiter.is_locked("alice")?);

        clock.advance(TimeDelta::seconds(1));
        assert!(!limiter.is_locked("alice")?);
        assert_eq!(limiter.attempt_state("alice"), None);
        Ok(())
    }

    #[test]
    fn elapsed_window_evicts_below_threshold_too() -> Result<()> {
        let (clock, limiter) = limiter();
        limiter.record_failure("alice")?;
        limiter.record_failure("alice")?;
        clock.advance(TimeDelta::minutes(16));
        assert!(!limiter.is_locked("alice")?);

        // Fresh window: four more failures are not enough.
        for _ in 0..4 {
            limiter.record_failure("alice")?;
        }
        assert!(!limiter.is_locked("alice")?);
        Ok(())
    }

    #[test]
    fn clear_removes_entry() -> Result<()> {
        let (_clock, limiter) = limiter();
        for _ in 0..5 {
            limiter.record_failure("alice")?;
        }
        limiter.clear("alice")?;
        assert!(!limiter.is_locked("alice")?);
        assert!(limiter.is_empty());
        limiter.clear("nobody")?;
        Ok(())
    }

    #[test]
    fn purge_expired_only_drops_stale_entries() -> Result<()> {
        let (clock, limiter) = limiter();
        limiter.record_failure("old")?;
        clock.advance(TimeDelta::minutes(10));
        limiter.record_failure("new")?;
        clock.advance(TimeDelta::minutes(6));

        assert_eq!(limiter.purge_expired(), 1);
        assert_eq!(limiter.len(), 1);
        assert!(limiter.attempt_state("new").is_some());
        Ok(())
    }

    #[test]
    fn custom_threshold_is_honored() -> Result<()> {
        let clock = Arc::new(ManualClock::default());
        let config = AuthConfig::new().with_max_failed_attempts(2);
        let limiter = LoginAttempts::new(&config, clock);
        limiter.record_failure("alice")?;
        assert!(!limiter.is_locked("alice")?);
        limiter.record_failure("alice")?;
        assert!(limiter.is_locked("alice")?);
        Ok(())
    }

    #[test]
    fn concurrent_failures_are_not_lost() {
        let (_clock, limiter) = limiter();
        let limiter = Arc::new(limiter);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        let _ = limiter.record_failure("alice");
                    }
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().is_ok());
        }
        assert_eq!(
            limiter.attempt_state("alice").map(|s| s.failure_count),
            Some(800)
        );
    }
}
