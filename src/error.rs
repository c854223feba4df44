//! Normalized failure type for the request gateway.
//!
//! Every failure that reaches a caller of [`crate::Gateway`] is a
//! [`GatewayError`], whether it came from the network, from a real HTTP
//! status, or from a simulated mock error.

use thiserror::Error;

/// Errors surfaced by the gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("{message}")]
    Status { code: u16, message: String },
    #[error("no mock error configured for path {path}")]
    MissingMockError { path: String },
    #[error("invalid request path {0:?}")]
    InvalidPath(String),
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// Build a status error with the given code and message.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        GatewayError::Status {
            code,
            message: message.into(),
        }
    }

    /// Human-readable message, suitable for showing verbatim to a user.
    pub fn message(&self) -> String {
        match self {
            GatewayError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Numeric status code, when the failure carries one.
    pub fn code(&self) -> Option<u16> {
        match self {
            GatewayError::Status { code, .. } => Some(*code),
            GatewayError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this failure came from the mock layer rather than the network.
    pub fn is_mock_gap(&self) -> bool {
        matches!(self, GatewayError::MissingMockError { .. })
    }
}
