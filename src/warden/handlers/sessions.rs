use crate::auth::Authenticator;
use axum::{extract::Extension, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ActiveSessions {
    pub active: usize,
}

#[utoipa::path(
    get,
    path = "/sessions",
    responses(
        (status = 200, description = "Number of live sessions", body = ActiveSessions)
    ),
    tag = "auth"
)]
pub async fn active_sessions(auth: Extension<Arc<Authenticator>>) -> impl IntoResponse {
    Json(ActiveSessions {
        active: auth.active_sessions(),
    })
}
