//! Result types returned by the login, session and logout calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    credentials::PublicUser,
    error::{LoginCode, LoginError},
    session::{InvalidSession, Session},
};

/// A successful authentication, before it is flattened into a `LoginResult`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginSuccess {
    pub token: String,
    pub user: PublicUser,
    pub session: Session,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub success: bool,
    pub code: LoginCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_data: Option<Session>,
}

impl From<LoginSuccess> for LoginResult {
    fn from(success: LoginSuccess) -> Self {
        Self {
            success: true,
            code: LoginCode::LoginSuccess,
            message: "Login successful".to_string(),
            token: Some(success.token),
            user: Some(success.user),
            session_data: Some(success.session),
        }
    }
}

impl From<&LoginError> for LoginResult {
    fn from(err: &LoginError) -> Self {
        Self {
            success: false,
            code: err.code(),
            message: err.message().to_string(),
            token: None,
            user: None,
            session_data: None,
        }
    }
}

impl From<Result<LoginSuccess, LoginError>> for LoginResult {
    fn from(result: Result<LoginSuccess, LoginError>) -> Self {
        match result {
            Ok(success) => success.into(),
            Err(err) => Self::from(&err),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<InvalidSession>,
}

impl From<Result<Session, InvalidSession>> for SessionValidation {
    fn from(result: Result<Session, InvalidSession>) -> Self {
        match result {
            Ok(session) => Self {
                valid: true,
                session: Some(session),
                message: None,
                reason: None,
            },
            Err(reason) => Self {
                valid: false,
                session: None,
                message: Some(reason.to_string()),
                reason: Some(reason),
            },
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoggedOutUser {
    pub username: String,
    pub logout_time: DateTime<Utc>,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LogoutResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<LoggedOutUser>,
}
