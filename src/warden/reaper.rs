//! Background purge of expired sessions and elapsed attempt windows.
//!
//! Expiry is already enforced lazily on access; this only bounds memory.

use crate::auth::{LoginAttempts, SessionStore};
use std::{sync::Arc, time::Duration};
use tokio::{task::JoinHandle, time::interval};
use tracing::debug;

pub fn spawn(
    sessions: Arc<SessionStore>,
    attempts: Arc<LoginAttempts>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let expired_sessions = sessions.purge_expired();
            let expired_attempts = attempts.purge_expired();
            if expired_sessions > 0 || expired_attempts > 0 {
                debug!(
                    "Reaped {expired_sessions} sessions and {expired_attempts} attempt windows"
                );
            }
        }
    })
}
