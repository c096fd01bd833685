use crate::auth::{
    seed, AuthConfig, Authenticator, Clock, LoginAttempts, MemoryCredentialStore, SessionStore,
    SystemClock,
};
use crate::cli::actions::Action;
use crate::warden::{self, reaper};
use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration};
use tracing::info;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            users,
            reap_interval,
        } => {
            let records = match users {
                Some(path) => seed::load(&path)
                    .with_context(|| format!("Failed to load users from {}", path.display()))?,
                None => seed::default_users(),
            };
            let credentials = MemoryCredentialStore::new(records).context("Invalid user seed")?;
            info!("Loaded {} users", credentials.len());

            let config = AuthConfig::new();
            let clock: Arc<dyn Clock> = Arc::new(SystemClock);
            let attempts = Arc::new(LoginAttempts::new(&config, clock.clone()));
            let sessions = Arc::new(SessionStore::new(&config, clock.clone()));

            if reap_interval > 0 {
                reaper::spawn(
                    sessions.clone(),
                    attempts.clone(),
                    Duration::from_secs(reap_interval),
                );
            }

            let auth = Arc::new(Authenticator::new(
                Arc::new(credentials),
                attempts,
                sessions,
                clock,
            ));

            warden::new(port, auth).await?;
        }
    }

    Ok(())
}
