//! Error types for the auth core.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fault raised by a backing store. Never shown to callers verbatim.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("failed to generate session token: {0}")]
    TokenGeneration(#[from] rand::Error),
}

/// Problems found while loading the user seed.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate username: {0}")]
    DuplicateUsername(String),
    #[error("duplicate user id: {0}")]
    DuplicateId(u64),
    #[error("invalid email for {username}: {email}")]
    InvalidEmail { username: String, email: String },
    #[error("invalid password hash for {0}")]
    InvalidPasswordHash(String),
    #[error("empty username for user id {0}")]
    EmptyUsername(u64),
}

/// Broad category of a failed login.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Policy,
    Auth,
    Internal,
}

/// Outcome code carried by every `LoginResult`.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoginCode {
    InvalidInput,
    RateLimited,
    UserNotFound,
    UserInactive,
    InvalidPassword,
    LoginSuccess,
    ServerError,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("username and password are required")]
    InvalidInput,
    #[error("too many failed attempts for {0}")]
    RateLimited(String),
    #[error("unknown user {0}")]
    UserNotFound(String),
    #[error("user {0} is inactive")]
    UserInactive(String),
    #[error("wrong password for {0}")]
    InvalidPassword(String),
    #[error(transparent)]
    Internal(#[from] StoreError),
}

impl LoginError {
    #[must_use]
    pub fn code(&self) -> LoginCode {
        match self {
            Self::InvalidInput => LoginCode::InvalidInput,
            Self::RateLimited(_) => LoginCode::RateLimited,
            Self::UserNotFound(_) => LoginCode::UserNotFound,
            Self::UserInactive(_) => LoginCode::UserInactive,
            Self::InvalidPassword(_) => LoginCode::InvalidPassword,
            Self::Internal(_) => LoginCode::ServerError,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput => ErrorKind::Input,
            Self::RateLimited(_) => ErrorKind::Policy,
            Self::UserNotFound(_) | Self::UserInactive(_) | Self::InvalidPassword(_) => {
                ErrorKind::Auth
            }
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to hand back to the caller.
    ///
    /// Auth failures share one message so the text does not reveal which
    /// usernames exist; the code still tells programmatic callers apart.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Input => "Username and password are required",
            ErrorKind::Policy => "Too many failed login attempts. Please try again later.",
            ErrorKind::Auth => "Invalid credentials",
            ErrorKind::Internal => "An error occurred during login",
        }
    }
}
