//! Error code constants.
//!
//! Error codes are organized by category:
//! - 1xxx: Generation errors
//! - 2xxx: Authentication errors
//! - 3xxx: Request validation errors
//! - 4xxx: Resource errors
//! - 5xxx: Internal/System errors

/// Error code type with semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    // ===== Generation Errors (1xxx) =====

    /// Configuration cannot be built into a configurator.
    pub const INVALID_CONFIGURATION: Self = Self(1001);

    /// Requested quantity exceeds the configuration's code space.
    pub const CAPACITY_EXCEEDED: Self = Self(1002);

    /// Generator alias is not registered.
    pub const UNKNOWN_GENERATOR: Self = Self(1003);

    /// Validator alias is not registered.
    pub const UNKNOWN_VALIDATOR: Self = Self(1004);

    /// Validator options failed resolution.
    pub const INVALID_OPTIONS: Self = Self(1005);

    /// Attempt ceiling reached before the batch was complete.
    pub const GENERATION_STALLED: Self = Self(1006);

    /// Deadline passed before the batch was complete.
    pub const GENERATION_TIMEOUT: Self = Self(1007);

    // ===== Authentication Errors (2xxx) =====

    /// Authentication required.
    pub const UNAUTHORIZED: Self = Self(2001);

    // ===== Validation Errors (3xxx) =====

    /// Bad request / invalid parameters.
    pub const BAD_REQUEST: Self = Self(3001);

    // ===== Resource Errors (4xxx) =====

    /// Resource not found.
    pub const NOT_FOUND: Self = Self(4001);

    // ===== Internal/System Errors (5xxx) =====

    /// Internal server error.
    pub const INTERNAL_ERROR: Self = Self(5001);

    /// Service unavailable.
    pub const SERVICE_UNAVAILABLE: Self = Self(5002);

    /// Get the error code as an i32.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Get the category of this error code.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.0 {
            1000..=1999 => ErrorCategory::Generation,
            2000..=2999 => ErrorCategory::Authentication,
            3000..=3999 => ErrorCategory::Validation,
            4000..=4999 => ErrorCategory::Resource,
            5000..=5999 => ErrorCategory::Internal,
            _ => ErrorCategory::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

/// Error category based on error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Code generation errors (1xxx).
    Generation,
    /// Authentication errors (2xxx).
    Authentication,
    /// Request validation errors (3xxx).
    Validation,
    /// Resource errors (4xxx).
    Resource,
    /// Internal/system errors (5xxx).
    Internal,
    /// Unknown category.
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generation => write!(f, "generation"),
            Self::Authentication => write!(f, "authentication"),
            Self::Validation => write!(f, "validation"),
            Self::Resource => write!(f, "resource"),
            Self::Internal => write!(f, "internal"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::INVALID_CONFIGURATION.as_i32(), 1001);
        assert_eq!(ErrorCode::CAPACITY_EXCEEDED.as_i32(), 1002);
        assert_eq!(ErrorCode::UNAUTHORIZED.as_i32(), 2001);
        assert_eq!(ErrorCode::BAD_REQUEST.as_i32(), 3001);
        assert_eq!(ErrorCode::NOT_FOUND.as_i32(), 4001);
        assert_eq!(ErrorCode::INTERNAL_ERROR.as_i32(), 5001);
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            ErrorCode::GENERATION_STALLED.category(),
            ErrorCategory::Generation
        );
        assert_eq!(
            ErrorCode::UNAUTHORIZED.category(),
            ErrorCategory::Authentication
        );
        assert_eq!(ErrorCode::BAD_REQUEST.category(), ErrorCategory::Validation);
        assert_eq!(ErrorCode::NOT_FOUND.category(), ErrorCategory::Resource);
        assert_eq!(
            ErrorCode::SERVICE_UNAVAILABLE.category(),
            ErrorCategory::Internal
        );
        assert_eq!(ErrorCategory::Generation.to_string(), "generation");
    }
}
