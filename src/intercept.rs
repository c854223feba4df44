//! Mock interception hooks.
//!
//! The pre-request hook decides whether a request may reach the network.
//! Requests for catalogued paths are diverted into a [`MockSignal`], which
//! the post-response hook turns back into either a synthetic success
//! envelope or a simulated HTTP error. A diverted request never touches the
//! transport.

use std::sync::Arc;

use crate::catalog::{MockCatalog, MockOutcome};
use crate::error::GatewayError;
use crate::request::{RequestConfig, ResponseEnvelope};

/// Marker carried by a diverted request.
#[derive(Debug, Clone, PartialEq)]
pub struct MockSignal {
    /// Outcome selected from the catalog. `None` when an error was
    /// requested for a path with no error entry.
    pub outcome: Option<MockOutcome>,
    pub config: RequestConfig,
}

/// Result of the pre-request hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Interception {
    /// Send the request to the network with this (base URL resolved) config.
    PassThrough(RequestConfig),
    /// Skip the network and resolve from the catalog.
    Mocked(MockSignal),
}

/// A failed request on its way back to the caller.
#[derive(Debug)]
pub enum Rejection {
    Mock(MockSignal),
    Error(GatewayError),
}

impl From<GatewayError> for Rejection {
    fn from(err: GatewayError) -> Self {
        Rejection::Error(err)
    }
}

/// Request/response hooks backed by an immutable catalog.
#[derive(Debug, Clone)]
pub struct MockInterceptor {
    active: bool,
    catalog: Arc<MockCatalog>,
    default_base_url: String,
}

impl MockInterceptor {
    pub fn new(active: bool, catalog: Arc<MockCatalog>, default_base_url: impl Into<String>) -> Self {
        Self {
            active,
            catalog,
            default_base_url: default_base_url.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn catalog(&self) -> &MockCatalog {
        &self.catalog
    }

    pub fn default_base_url(&self) -> &str {
        &self.default_base_url
    }

    /// Pre-request hook.
    ///
    /// A catalogued path is always diverted while mocking is active, even
    /// when the caller supplied an explicit base URL.
    pub fn intercept(&self, config: RequestConfig) -> Interception {
        if !self.active || !self.catalog.is_mocked(&config.path) {
            if self.active && config.options.mock_error {
                tracing::warn!(
                    path = %config.path,
                    "mock error requested for a path with no fixture; sending real request"
                );
            }
            return Interception::PassThrough(config.resolve_base_url(&self.default_base_url));
        }

        tracing::debug!(path = %config.path, mock_error = config.options.mock_error, "mocking request");
        let outcome = self
            .catalog
            .outcome(&config.path, config.options.mock_error);
        Interception::Mocked(MockSignal { outcome, config })
    }

    /// Post-response hook. Real failures are returned unchanged.
    pub fn resolve_mock(&self, rejection: Rejection) -> Result<ResponseEnvelope, GatewayError> {
        let signal = match rejection {
            Rejection::Error(err) => return Err(err),
            Rejection::Mock(signal) => signal,
        };

        match signal.outcome {
            Some(MockOutcome::Success(data)) => Ok(ResponseEnvelope::mocked(data, signal.config)),
            Some(MockOutcome::Failure { status, message }) => {
                Err(GatewayError::status(status, message))
            }
            None => Err(GatewayError::MissingMockError {
                path: signal.config.path,
            }),
        }
    }
}
