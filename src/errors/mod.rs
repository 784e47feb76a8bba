//! Error handling module for the fleet console core.
//!
//! Provides centralized error types covering the client-side taxonomy:
//! validation failures are raised before any backend call, transport and
//! decode failures carry the backend context they came from.

use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const HTTP_ERROR: &str = "HTTP_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Application error type.
#[derive(Debug, Clone)]
pub enum AppError {
    /// A path or filename failed its format constraints; no backend call was made
    Validation(String),
    /// A referenced entity no longer exists on the backend
    NotFound(String),
    /// Transport failure or non-success status from the backend
    Http {
        message: String,
        status: Option<u16>,
    },
    /// Response body did not match the expected contract
    Decode(String),
    /// Invalid or missing configuration
    Config(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Http { .. } => codes::HTTP_ERROR,
            AppError::Decode(_) => codes::DECODE_ERROR,
            AppError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Http { message, status } => match status {
                Some(code) => format!("{} (status {})", message, code),
                None => message.clone(),
            },
            AppError::Decode(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
        }
    }

    /// Whether this error was raised locally, before any backend call.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            tracing::error!("Decode error: {:?}", err);
            return AppError::Decode(format!("Response decode error: {}", err));
        }
        let status = err.status().map(|s| s.as_u16());
        tracing::error!("HTTP error: {:?}", err);
        AppError::Http {
            message: format!("Request error: {}", err),
            status,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Decode(format!("JSON error: {}", err))
    }
}

/// Error details in the shape the backend uses for its error envelopes.
///
/// Kept for surfacing backend-provided failure reasons to the caller.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
