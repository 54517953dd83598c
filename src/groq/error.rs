//! Error types for Groq API integration

use thiserror::Error;

/// Errors that can occur when interacting with the Groq API
#[derive(Debug, Error)]
pub enum GroqError {
    /// API key is not configured
    #[error("API key not configured. Set GROQ_API_KEY or run: snapquiz auth set-key")]
    ApiKeyNotFound,

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    KeyringError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Rate limited by the API
    #[error("Rate limited. Retry after {retry_after_seconds} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_seconds: u64,
    },

    /// Invalid API key format
    #[error("Invalid API key format. Key should start with 'gsk_'")]
    InvalidApiKey,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GroqError {
    /// Check if retrying the same request could succeed.
    ///
    /// Rate limits, upstream 5xx responses, and transport failures
    /// (connect errors, timeouts) are transient. Everything else is a
    /// permanent condition the caller must fix first.
    pub fn is_transient(&self) -> bool {
        match self {
            GroqError::RateLimited { .. } => true,
            GroqError::ApiError { status, .. } => *status >= 500,
            GroqError::RequestError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }

    /// Check if this error requires re-authentication
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            GroqError::ApiKeyNotFound
                | GroqError::InvalidApiKey
                | GroqError::ApiError { status: 401, .. }
        )
    }
}
