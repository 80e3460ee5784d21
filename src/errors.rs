//! # Application Error Types
//!
//! Common error types used throughout the ingredient scaler. The engine
//! surfaces almost nothing to callers (missing sections, unmatched text and
//! malformed stored values are silent fallbacks); these types cover the
//! genuinely exceptional paths such as invalid configuration.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Scaling errors (non-positive or non-finite factor)
    Scale(String),
    /// Persistent store errors
    Storage(String),
    /// Document tree access errors
    Document(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Scale(msg) => write!(f, "[SCALE] {}", msg),
            AppError::Storage(msg) => write!(f, "[STORAGE] {}", msg),
            AppError::Document(msg) => write!(f, "[DOCUMENT] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
