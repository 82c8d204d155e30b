//! Error Handling Module
//!
//! Unified error type for the library. Recoverable provider-level conditions
//! (unsupported functionality, batch limits) are distinct variants so callers
//! can react to them without string matching.

use thiserror::Error;

/// Main error type for LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// API returned an error response
    #[error("API error {status}: {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message reported by the provider
        message: String,
    },

    /// Failed to parse a response or stream chunk
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Stream-level error (SSE framing, unexpected close)
    #[error("Stream error: {0}")]
    StreamError(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// No API key was provided and none was found in the environment
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// Invalid request parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Caller sent an input shape the adapter does not support at all
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A well-formed input uses a feature the provider cannot express
    #[error("Unsupported functionality: {0}")]
    UnsupportedOperation(String),

    /// Embedding batch exceeds the per-call maximum
    #[error("Too many embedding values for call: requested {requested}, maximum is {max}")]
    TooManyEmbeddingValues {
        /// Configured per-call maximum
        max: usize,
        /// Offending batch size
        requested: usize,
    },

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl LlmError {
    /// Create an API error from a status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
