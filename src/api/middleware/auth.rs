//! Authentication middleware.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::state::AppState;
use crate::error::ErrorCode;

/// Extract bearer token from Authorization header.
fn extract_bearer_token(req: &Request<Body>) -> Option<&str> {
    let auth_header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;

    auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = Json(json!({
        "code": ErrorCode::UNAUTHORIZED.as_i32(),
        "message": message,
        "data": null
    }));

    (StatusCode::UNAUTHORIZED, body).into_response()
}

/// Middleware that requires the configured API token.
///
/// Passes every request through when no token is configured.
pub async fn require_token(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.auth.is_enabled() {
        return next.run(req).await;
    }

    let Some(token) = extract_bearer_token(&req) else {
        return unauthorized_response("Missing or invalid Authorization header");
    };

    if token != state.config.auth.api_token {
        return unauthorized_response("Invalid token");
    }

    next.run(req).await
}
