//! Code generation handlers.

use std::time::Instant;

use axum::{Json, extract::State};
use chrono::Utc;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::domain::{
    ApiResponse, GenerateRequest, GenerateResponse, StrategiesResponse, ValidatorInfo,
};
use crate::error::{AppError, Result};
use crate::service::GenerationRequest;

/// Generate a batch of codes.
///
/// Generation is CPU-bound and runs on the blocking pool, bounded by the configured
/// attempt ceiling and deadline.
///
/// # Errors
///
/// Returns an error if the request is invalid or generation fails.
pub async fn generate_codes(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<GenerateResponse>>> {
    let settings = &state.config.generation;
    body.validate(settings.max_request_quantity)
        .map_err(AppError::BadRequest)?;

    let generator = body
        .generator
        .unwrap_or_else(|| settings.default_generator.clone());
    let request = GenerationRequest {
        quantity: body.quantity.unwrap_or(settings.default_quantity),
        configuration: body.configuration,
        generator: generator.clone(),
        validators: body.validators,
        limits: settings.limits(Instant::now()),
    };

    let manager = state.manager.clone();
    let codes = tokio::task::spawn_blocking(move || manager.generate(request))
        .await
        .map_err(|e| AppError::Internal(format!("generation task failed: {e}")))??;

    let codes: Vec<String> = codes.into_iter().collect();
    let response = GenerateResponse {
        batch_id: Uuid::new_v4(),
        generator,
        quantity: codes.len(),
        generated_at: Utc::now(),
        codes,
    };

    Ok(Json(ApiResponse::success(response)))
}

/// List registered generators and validators.
pub async fn list_strategies(
    State(state): State<AppState>,
) -> Json<ApiResponse<StrategiesResponse>> {
    let validator_registry = state.manager.validators();
    let validators = validator_registry
        .aliases()
        .into_iter()
        .filter_map(|alias| {
            validator_registry
                .default_options(&alias)
                .map(|defaults| ValidatorInfo { alias, defaults })
        })
        .collect();

    Json(ApiResponse::success(StrategiesResponse {
        generators: state.manager.generators().aliases(),
        validators,
    }))
}
