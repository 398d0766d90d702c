//! Custom error types for scholardash.
//!
//! This module defines all error types used throughout the application.
//! All functions return `Result<T, ScholarDashError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for scholardash operations.
///
/// Uses `thiserror` for ergonomic error handling and automatic `Display` implementation.
#[derive(Debug, Error)]
pub enum ScholarDashError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// External API returned an error
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code from API
        code: i32,
        /// Error message from API
        message: String,
    },

    /// No matching record found upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input to a computation (empty corpus, bad threshold, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using `ScholarDashError`
pub type Result<T> = std::result::Result<T, ScholarDashError>;

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with a parse error message
    fn ok_or_parse(self, msg: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_parse(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| ScholarDashError::Parse(msg.to_string()))
    }
}
