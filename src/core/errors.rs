//! Error types for LLM client operations

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Classification of a failed operation, surfaced to callers in [`LlmResult`]
///
/// [`LlmResult`]: crate::core::models::LlmResult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Empty, oversized or otherwise unusable input
    InvalidInput,
    /// Upstream answered with a non-2xx status
    UpstreamHttpError,
    /// Upstream answered 2xx but the body did not match the expected schema
    UpstreamMalformedResponse,
    /// Connection refused, DNS failure and other network-level problems
    TransportError,
    /// No answer within the configured request timeout
    Timeout,
    /// Missing or contradictory configuration
    Misconfiguration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::UpstreamHttpError => "upstream_http_error",
            ErrorKind::UpstreamMalformedResponse => "upstream_malformed_response",
            ErrorKind::TransportError => "transport_error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Misconfiguration => "misconfiguration",
        };
        write!(f, "{}", name)
    }
}

/// LLM client errors
#[derive(Error, Debug)]
pub enum LlmError {
    /// Input rejected before any request was made
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    /// API request failed with a non-success status
    #[error("API error: HTTP {status} - {body}")]
    UpstreamHttp {
        status: u16,
        body: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    MalformedResponse {
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    Transport {
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout {
        timeout_ms: u64,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Misconfiguration {
        message: String,
    },
}

impl LlmError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        LlmError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn misconfiguration(message: impl Into<String>) -> Self {
        LlmError::Misconfiguration {
            message: message.into(),
        }
    }

    /// The kind reported to callers for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LlmError::InvalidInput { .. } => ErrorKind::InvalidInput,
            LlmError::UpstreamHttp { .. } => ErrorKind::UpstreamHttpError,
            LlmError::MalformedResponse { .. } => ErrorKind::UpstreamMalformedResponse,
            LlmError::Transport { .. } => ErrorKind::TransportError,
            LlmError::Timeout { .. } => ErrorKind::Timeout,
            LlmError::Misconfiguration { .. } => ErrorKind::Misconfiguration,
        }
    }
}

/// Result type for LLM client operations
pub type Result<T> = std::result::Result<T, LlmError>;
