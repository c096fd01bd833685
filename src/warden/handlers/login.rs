use crate::auth::{Authenticator, LoginCode, LoginResult};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    #[schema(value_type = String, format = Password)]
    pub password: SecretString,
}

/// HTTP status for a login outcome.
pub(crate) fn status_for(code: LoginCode) -> StatusCode {
    match code {
        LoginCode::LoginSuccess => StatusCode::OK,
        LoginCode::InvalidInput => StatusCode::BAD_REQUEST,
        LoginCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        LoginCode::UserNotFound | LoginCode::UserInactive | LoginCode::InvalidPassword => {
            StatusCode::UNAUTHORIZED
        }
        LoginCode::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[utoipa::path(
    post,
    path= "/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful", body = LoginResult, content_type = "application/json"),
        (status = 400, description = "Missing or blank credentials", body = LoginResult),
        (status = 401, description = "Invalid credentials", body = LoginResult),
        (status = 429, description = "Too many failed attempts", body = LoginResult),
        (status = 500, description = "Internal error", body = LoginResult),
    ),
    tag= "auth"
)]
#[instrument(skip(auth))]
pub async fn login(
    auth: Extension<Arc<Authenticator>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let result = auth.login(&request.username, request.password.expose_secret());

    (status_for(result.code), Json(result)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warden::handlers::test_support::{app, json_request, send};
    use anyhow::{Context, Result};
    use axum::{body::Body, http::Request};
    use serde_json::json;

    #[test]
    fn login_request_debug_redacts_password() -> Result<()> {
        let request: LoginRequest =
            serde_json::from_value(json!({"username": "admin", "password": "admin123"}))?;
        assert_eq!(request.password.expose_secret(), "admin123");
        assert!(!format!("{request:?}").contains("admin123"));
        Ok(())
    }

    #[test]
    fn status_mapping() {
        assert_eq!(status_for(LoginCode::LoginSuccess), StatusCode::OK);
        assert_eq!(status_for(LoginCode::InvalidInput), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(LoginCode::RateLimited),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(status_for(LoginCode::UserInactive), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(LoginCode::ServerError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn login_returns_token_and_session() -> Result<()> {
        let app = app()?;
        let request = json_request(
            "POST",
            "/login",
            &json!({"username": "admin", "password": "admin123"}),
        )?;
        let (status, _, body) = send(&app.router, request).await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["code"], "LOGIN_SUCCESS");
        assert_eq!(body["user"]["username"], "admin");
        assert_eq!(body["user"]["role"], "admin");
        assert!(body["user"].get("passwordHash").is_none());
        let token = body["token"].as_str().context("missing token")?;
        assert_eq!(body["sessionData"]["token"], token);
        assert_eq!(body["sessionData"]["userId"], 1);
        assert!(app.auth.validate_session(token).valid);
        Ok(())
    }

    #[tokio::test]
    async fn login_maps_failures_to_status_codes() -> Result<()> {
        let app = app()?;

        let request = json_request(
            "POST",
            "/login",
            &json!({"username": "user2", "password": "password2"}),
        )?;
        let (status, _, body) = send(&app.router, request).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "USER_INACTIVE");
        assert!(body.get("token").is_none());

        let request = json_request("POST", "/login", &json!({"username": "", "password": ""}))?;
        let (status, _, body) = send(&app.router, request).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");

        for _ in 0..5 {
            let request = json_request(
                "POST",
                "/login",
                &json!({"username": "testuser", "password": "wrong"}),
            )?;
            let (status, _, body) = send(&app.router, request).await?;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["code"], "USER_NOT_FOUND");
        }
        let request = json_request(
            "POST",
            "/login",
            &json!({"username": "testuser", "password": "wrong"}),
        )?;
        let (status, _, body) = send(&app.router, request).await?;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["code"], "RATE_LIMITED");
        Ok(())
    }

    #[tokio::test]
    async fn login_without_payload_is_bad_request() -> Result<()> {
        let app = app()?;
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .body(Body::empty())?;
        let (status, _, body) = send(&app.router, request).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Missing payload");
        Ok(())
    }
}
