//! Credential login, brute-force lockout and ephemeral sessions.
//!
//! The stores are owned values with their own locks; an [`Authenticator`]
//! receives them explicitly and composes them into the login protocol:
//!
//! 1. blank username or password → `INVALID_INPUT`
//! 2. locked subject → `RATE_LIMITED`
//! 3. unknown user, inactive user or wrong password → failure recorded
//! 4. otherwise the failure count is cleared and a 24h session is issued

pub mod clock;
pub mod config;
pub mod credentials;
pub mod error;
pub mod login;
pub mod rate_limit;
pub mod seed;
pub mod session;
pub mod types;
mod utils;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AuthConfig;
pub use credentials::{CredentialStore, MemoryCredentialStore, PublicUser, Role, UserRecord, UserStatus};
pub use error::{ErrorKind, LoginCode, LoginError, SeedError, StoreError};
pub use login::Authenticator;
pub use rate_limit::{AttemptState, LoginAttempts, NoopRateLimiter, RateLimiter};
pub use session::{InvalidSession, Session, SessionStore};
pub use types::{LoggedOutUser, LoginResult, LoginSuccess, LogoutResult, SessionValidation};
pub use utils::hash_password;
