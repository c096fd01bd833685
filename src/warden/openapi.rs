use super::handlers::{health, login, logout, session, sessions};
use crate::auth::{
    InvalidSession, LoggedOutUser, LoginCode, LoginResult, LogoutResult, PublicUser, Role, Session,
    SessionValidation,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        login::login,
        session::session,
        logout::logout,
        sessions::active_sessions,
    ),
    components(schemas(
        health::Health,
        login::LoginRequest,
        logout::LogoutRequest,
        sessions::ActiveSessions,
        LoginCode,
        LoginResult,
        PublicUser,
        Role,
        Session,
        SessionValidation,
        InvalidSession,
        LogoutResult,
        LoggedOutUser,
    )),
    tags(
        (name = "auth", description = "Login, session validation and logout"),
        (name = "health", description = "Service health"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
