//! Data Transfer Objects for API requests and responses.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::GenerationConfiguration;
use crate::service::validator::RawOptions;

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (0 = success, non-zero = error).
    pub code: i32,

    /// Human-readable message.
    pub message: String,

    /// Response data (null on error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response.
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

/// Request to generate a batch of codes.
///
/// Omitted fields fall back to the worker's `generation` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateRequest {
    /// Number of codes to generate.
    #[serde(default)]
    pub quantity: Option<u64>,

    /// Code shape.
    #[serde(default)]
    pub configuration: Option<GenerationConfiguration>,

    /// Generator alias.
    #[serde(default)]
    pub generator: Option<String>,

    /// Validator aliases with their raw options, applied in the given order.
    #[serde(default)]
    pub validators: IndexMap<String, RawOptions>,
}

impl GenerateRequest {
    /// Validate the request against the per-request quantity ceiling.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid field.
    pub fn validate(&self, max_quantity: u64) -> Result<(), String> {
        if let Some(quantity) = self.quantity {
            if quantity == 0 {
                return Err("quantity must be at least 1".to_string());
            }
            if quantity > max_quantity {
                return Err(format!("quantity cannot exceed {max_quantity}"));
            }
        }
        if self.generator.as_deref().is_some_and(str::is_empty) {
            return Err("generator cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Response for a generated batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Identifier of this batch, for the caller's bookkeeping.
    pub batch_id: Uuid,

    /// Generator alias used.
    pub generator: String,

    /// Number of codes in the batch.
    pub quantity: usize,

    /// When the batch was generated.
    pub generated_at: DateTime<Utc>,

    /// Generated codes, in generation order.
    pub codes: Vec<String>,
}

/// Registered validator description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorInfo {
    /// Validator alias.
    pub alias: String,

    /// Declared default options.
    pub defaults: Value,
}

/// Registered strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategiesResponse {
    /// Generator aliases.
    pub generators: Vec<String>,

    /// Validators with their default options.
    pub validators: Vec<ValidatorInfo>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Service version.
    pub version: String,
}

/// Readiness check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Overall readiness status.
    pub ready: bool,

    /// Individual component statuses.
    pub components: ReadyComponents,
}

/// Component readiness statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyComponents {
    /// Whether the default generator is registered.
    pub generator: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(vec![1, 2, 3]);
        assert_eq!(response.code, 0);
        assert_eq!(response.message, "success");
        assert_eq!(response.data, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_api_response_error() {
        let response = ApiResponse::<()>::error(1003, "unknown generator");
        assert_eq!(response.code, 1003);
        assert_eq!(response.message, "unknown generator");
        assert!(response.data.is_none());
    }

    #[test]
    fn test_generate_request_validation() {
        let req = GenerateRequest {
            quantity: Some(10),
            ..Default::default()
        };
        assert!(req.validate(100).is_ok());

        let req = GenerateRequest::default();
        assert!(req.validate(100).is_ok());

        let req = GenerateRequest {
            quantity: Some(0),
            ..Default::default()
        };
        assert!(req.validate(100).is_err());

        let req = GenerateRequest {
            quantity: Some(101),
            ..Default::default()
        };
        assert!(req.validate(100).is_err());

        let req = GenerateRequest {
            generator: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate(100).is_err());
    }

    #[test]
    fn test_generate_request_keeps_validator_order() {
        let req: GenerateRequest = serde_json::from_str(
            r#"{"validators": {"repetition": {}, "denylist": {"words": ["BAD"]}, "composition": {}}}"#,
        )
        .unwrap();
        let aliases: Vec<&str> = req.validators.keys().map(String::as_str).collect();
        assert_eq!(aliases, vec!["repetition", "denylist", "composition"]);
    }
}
