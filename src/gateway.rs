//! Request gateway: the single entry point callers use to fetch resources.
//!
//! A [`Gateway`] owns its transport and its mock hooks. Every call runs
//! the pre-request hook, sends pass-through requests to the transport, and
//! routes diverted requests and failures through the post-response hook
//! before handing back only the response body.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::MockCatalog;
use crate::error::GatewayError;
use crate::intercept::{Interception, MockInterceptor, Rejection};
use crate::profile;
use crate::request::{RequestConfig, RequestOptions, ResponseEnvelope};
use crate::transport::{status_message, HttpTransport, Transport};

/// Base URL used when a call does not override it.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent by the HTTP transport.
pub const DEFAULT_USER_AGENT: &str = concat!("mockgate/", env!("CARGO_PKG_VERSION"));

/// Request gateway with mock interception.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
    interceptor: MockInterceptor,
}

impl Gateway {
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    pub fn mocking_active(&self) -> bool {
        self.interceptor.is_active()
    }

    pub fn catalog(&self) -> &MockCatalog {
        self.interceptor.catalog()
    }

    pub fn default_base_url(&self) -> &str {
        self.interceptor.default_base_url()
    }

    /// Fetch `path` and return the response body.
    pub async fn fetch_resource(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, GatewayError> {
        self.request(path, options).await.map(|envelope| envelope.data)
    }

    /// Fetch `path` asking the mock layer for its simulated error.
    pub async fn fetch_with_mock_error(&self, path: &str) -> Result<Value, GatewayError> {
        self.fetch_resource(path, RequestOptions::new().mock_error(true))
            .await
    }

    /// Fetch `path` and return the full response envelope.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope, GatewayError> {
        let result = self.dispatch(path, options).await;
        if let Err(ref e) = result {
            tracing::info!(path, code = ?e.code(), error = %e, "request failed");
        }
        result
    }

    async fn dispatch(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope, GatewayError> {
        validate_path(path)?;

        let config = RequestConfig::new(path, options);
        let rejection = match self.interceptor.intercept(config) {
            Interception::PassThrough(config) => match self.transport.send(config).await {
                Ok(envelope) if envelope.is_success() => return Ok(envelope),
                Ok(envelope) => Rejection::Error(GatewayError::status(
                    envelope.status,
                    status_message(envelope.status, &envelope.data),
                )),
                Err(e) => Rejection::Error(e),
            },
            Interception::Mocked(signal) => Rejection::Mock(signal),
        };

        self.interceptor.resolve_mock(rejection)
    }
}

fn validate_path(path: &str) -> Result<(), GatewayError> {
    if path.is_empty() || !path.starts_with('/') {
        return Err(GatewayError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Builder for [`Gateway`].
pub struct GatewayBuilder {
    base_url: String,
    mocking: Option<bool>,
    catalog: Arc<MockCatalog>,
    transport: Option<Arc<dyn Transport>>,
    user_agent: String,
    timeout: Duration,
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mocking: None,
            catalog: MockCatalog::builtin(),
            transport: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the process-wide mocking flag for this gateway.
    pub fn mocking(mut self, active: bool) -> Self {
        self.mocking = Some(active);
        self
    }

    pub fn catalog(mut self, catalog: Arc<MockCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Gateway, GatewayError> {
        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(&self.user_agent, self.timeout)?),
        };
        let active = self.mocking.unwrap_or_else(profile::mocking_enabled);

        Ok(Gateway {
            transport,
            interceptor: MockInterceptor::new(active, self.catalog, self.base_url),
        })
    }
}
