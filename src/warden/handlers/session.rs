use super::extract_bearer_token;
use crate::auth::{Authenticator, InvalidSession, SessionValidation};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/session",
    params(
        ("Authorization" = String, Header, description = "Bearer session token")
    ),
    responses(
        (status = 200, description = "Session is active", body = SessionValidation),
        (status = 401, description = "Missing, unknown or expired token", body = SessionValidation)
    ),
    tag = "auth"
)]
pub async fn session(headers: HeaderMap, auth: Extension<Arc<Authenticator>>) -> impl IntoResponse {
    // A missing header is reported the same way as an unknown token.
    let validation = match extract_bearer_token(&headers) {
        Some(token) => auth.validate_session(&token),
        None => SessionValidation::from(Err(InvalidSession::NotFound)),
    };

    let status = if validation.valid {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    (status, Json(validation)).into_response()
}
