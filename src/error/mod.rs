//! Error handling module.
//!
//! `GenerationError` is the error type of the generation core. `AppError` wraps it for
//! the HTTP layer, adding status code mapping and the standardized error envelope.

pub mod codes;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::{ErrorCategory, ErrorCode};

/// Errors raised by the code generation core.
///
/// Every variant aborts the whole generation call; a caller never receives a partial
/// batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The configuration cannot be built into a configurator.
    #[error("Invalid generation configuration: {0}")]
    Configuration(String),

    /// The requested quantity exceeds the configuration's code space.
    #[error(
        "Requested quantity {requested} exceeds the {max_quantity} distinct codes this configuration can produce"
    )]
    InvalidConfiguration {
        /// Quantity asked by the caller.
        requested: u64,
        /// Size of the code space.
        max_quantity: u128,
    },

    /// No generator is registered under the alias.
    #[error("Unknown code generator: {0}")]
    UnknownGenerator(String),

    /// No validator is registered under the alias.
    #[error("Unknown code validator: {0}")]
    UnknownValidator(String),

    /// Raw validator options failed resolution against the validator's schema.
    #[error("Invalid options for validator `{alias}`: {reason}")]
    InvalidOptions {
        /// Validator alias.
        alias: String,
        /// Why resolution failed.
        reason: String,
    },

    /// The attempt ceiling was reached before the batch was complete.
    #[error(
        "Generation stalled after {attempts} attempts with {generated} of {requested} codes accepted"
    )]
    Stalled {
        /// Candidates drawn.
        attempts: u64,
        /// Codes accepted so far.
        generated: u64,
        /// Quantity asked by the caller.
        requested: u64,
    },

    /// The deadline passed before the batch was complete.
    #[error("Generation deadline exceeded with {generated} of {requested} codes accepted")]
    DeadlineExceeded {
        /// Codes accepted so far.
        generated: u64,
        /// Quantity asked by the caller.
        requested: u64,
    },
}

impl GenerationError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Configuration(_) => ErrorCode::INVALID_CONFIGURATION,
            Self::InvalidConfiguration { .. } => ErrorCode::CAPACITY_EXCEEDED,
            Self::UnknownGenerator(_) => ErrorCode::UNKNOWN_GENERATOR,
            Self::UnknownValidator(_) => ErrorCode::UNKNOWN_VALIDATOR,
            Self::InvalidOptions { .. } => ErrorCode::INVALID_OPTIONS,
            Self::Stalled { .. } => ErrorCode::GENERATION_STALLED,
            Self::DeadlineExceeded { .. } => ErrorCode::GENERATION_TIMEOUT,
        }
    }
}

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Code generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Authentication failed.
    #[error("Authentication failed")]
    Unauthorized,

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Generation(err) => err.error_code(),
            Self::Unauthorized => ErrorCode::UNAUTHORIZED,
            Self::BadRequest(_) => ErrorCode::BAD_REQUEST,
            Self::NotFound(_) => ErrorCode::NOT_FOUND,
            Self::Internal(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Generation(
                GenerationError::Configuration(_)
                | GenerationError::InvalidConfiguration { .. }
                | GenerationError::UnknownGenerator(_)
                | GenerationError::UnknownValidator(_)
                | GenerationError::InvalidOptions { .. },
            )
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Generation(GenerationError::Stalled { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Generation(GenerationError::DeadlineExceeded { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let category = error_code.category();
        let code = error_code.as_i32();
        let message = self.to_string();

        // Client-side categories log at warn
        if matches!(category, ErrorCategory::Internal | ErrorCategory::Unknown) {
            tracing::error!(
                error_code = code,
                %category,
                status = %status,
                message = %message,
                "Request failed"
            );
        } else {
            tracing::warn!(
                error_code = code,
                %category,
                status = %status,
                message = %message,
                "Request rejected"
            );
        }

        let body = Json(json!({
            "code": code,
            "message": message,
            "data": null
        }));

        (status, body).into_response()
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `GenerationError`.
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;
