use super::extract_bearer_token;
use crate::auth::{Authenticator, LogoutResult};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LogoutRequest {
    pub username: String,
}

#[utoipa::path(
    post,
    path = "/logout",
    request_body = LogoutRequest,
    params(
        ("Authorization" = Option<String>, Header, description = "Bearer session token to revoke")
    ),
    responses(
        (status = 200, description = "Logout successful", body = LogoutResult),
        (status = 400, description = "Username is required, or the token belongs to another user", body = LogoutResult)
    ),
    tag = "auth"
)]
pub async fn logout(
    headers: HeaderMap,
    auth: Extension<Arc<Authenticator>>,
    payload: Option<Json<LogoutRequest>>,
) -> impl IntoResponse {
    let username = payload.map(|Json(request)| request.username).unwrap_or_default();

    let result = match extract_bearer_token(&headers) {
        Some(token) => auth.logout_with_token(&username, &token),
        None => auth.logout(&username),
    };

    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(result)).into_response()
}
