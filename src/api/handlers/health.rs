//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::state::AppState;
use crate::domain::{ApiResponse, HealthResponse, ReadyComponents, ReadyResponse};
use crate::error::ErrorCode;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Readiness probe - checks that the default generator can serve requests.
pub async fn ready(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<ReadyResponse>>) {
    let generator_ok = state
        .manager
        .generators()
        .contains(&state.config.generation.default_generator);

    let (status_code, code, message) = if generator_ok {
        (StatusCode::OK, 0, "success")
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::SERVICE_UNAVAILABLE.as_i32(),
            "service unavailable",
        )
    };

    let response = ApiResponse {
        code,
        message: message.to_string(),
        data: Some(ReadyResponse {
            ready: generator_ok,
            components: ReadyComponents {
                generator: generator_ok,
            },
        }),
    };

    (status_code, Json(response))
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    let mut output = String::new();

    output.push_str("# HELP codebuilder_up Whether the service is up\n");
    output.push_str("# TYPE codebuilder_up gauge\n");
    output.push_str("codebuilder_up 1\n");

    if let Some(handle) = &state.metrics {
        output.push_str(&handle.render());
    }

    output
}
