//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so that log lines and API
//! envelopes can be grepped and monitored.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - INPUT_xxx: form / request values
//! - INFERENCE_xxx: model invocation
//! - ARTIFACT_xxx: model artifact loading
//! - API_xxx: API errors
//! - CFG_xxx: Configuration errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Input Errors (1xx)
    // ============================================
    /// Numeric field outside its declared min/max
    InputOutOfRange,
    /// Category missing from the persisted encoder table
    InputUnknownCategory,

    // ============================================
    // Inference Errors (2xx)
    // ============================================
    /// Row width or column order differs from what the model was fit on
    InferenceShapeMismatch,
    /// Model produced a non-finite value
    InferenceFailed,

    // ============================================
    // Artifact Errors (3xx)
    // ============================================
    /// Artifact file not found
    ArtifactMissing,
    /// Artifact present but malformed or inconsistent
    ArtifactInvalid,

    // ============================================
    // API Errors (4xx)
    // ============================================
    /// Invalid request format
    ApiBadRequest,

    // ============================================
    // Configuration Errors (5xx)
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InputOutOfRange => "INPUT_OUT_OF_RANGE",
            Self::InputUnknownCategory => "INPUT_UNKNOWN_CATEGORY",

            Self::InferenceShapeMismatch => "INFERENCE_SHAPE_MISMATCH",
            Self::InferenceFailed => "INFERENCE_FAILED",

            Self::ArtifactMissing => "ARTIFACT_MISSING",
            Self::ArtifactInvalid => "ARTIFACT_INVALID",

            Self::ApiBadRequest => "API_BAD_REQUEST",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InputOutOfRange | Self::InputUnknownCategory | Self::ApiBadRequest => 400,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Field outside its declared bounds
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputOutOfRange, msg)
    }

    /// Category not present in the encoder table
    pub fn unknown_category(column: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::InputUnknownCategory,
            format!("Unknown category '{}' for column '{}'", value, column),
        )
    }

    /// Row shape does not match the model
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InferenceShapeMismatch, msg)
    }

    /// Model output unusable
    pub fn inference_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InferenceFailed, msg)
    }

    /// Artifact file missing
    pub fn artifact_missing(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ArtifactMissing, msg)
    }

    /// Artifact malformed
    pub fn artifact_invalid(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ArtifactInvalid, msg)
    }

    /// Invalid configuration value
    pub fn invalid_config(key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value '{}' for {}", value, key),
        )
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;
