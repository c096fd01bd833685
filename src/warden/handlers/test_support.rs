use crate::auth::{
    seed::default_users, AuthConfig, Authenticator, LoginAttempts, ManualClock,
    MemoryCredentialStore, SessionStore,
};
use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::Request,
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub(crate) struct TestApp {
    pub(crate) clock: Arc<ManualClock>,
    pub(crate) auth: Arc<Authenticator>,
    pub(crate) router: Router,
}

pub(crate) fn app() -> Result<TestApp> {
    let clock = Arc::new(ManualClock::default());
    let config = AuthConfig::new();
    let auth = Arc::new(Authenticator::new(
        Arc::new(MemoryCredentialStore::new(default_users())?),
        Arc::new(LoginAttempts::new(&config, clock.clone())),
        Arc::new(SessionStore::new(&config, clock.clone())),
        clock.clone(),
    ));
    let router = crate::warden::router(auth.clone());
    Ok(TestApp {
        clock,
        auth,
        router,
    })
}

/// Send a request and return the status, headers and decoded JSON body.
pub(crate) async fn send(
    router: &Router,
    request: Request<Body>,
) -> Result<(axum::http::StatusCode, axum::http::HeaderMap, Value)> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    Ok((status, headers, body))
}

pub(crate) fn json_request(method: &str, uri: &str, body: &Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}
