//! Request and response descriptors passed through the gateway.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Per-call options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestOptions {
    /// Overrides the gateway's default base URL for this call.
    pub base_url: Option<String>,
    /// Ask the mock layer for the path's simulated error instead of its fixture.
    pub mock_error: bool,
    /// Transport timeout for this call.
    #[serde(skip)]
    pub timeout: Option<Duration>,
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn mock_error(mut self, enabled: bool) -> Self {
        self.mock_error = enabled;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// A single in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestConfig {
    pub path: String,
    pub options: RequestOptions,
    /// Base URL the request will be sent to. Unset until the request is
    /// cleared to go to the network.
    pub base_url: Option<String>,
}

impl RequestConfig {
    pub fn new(path: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            path: path.into(),
            options,
            base_url: None,
        }
    }

    /// Set `base_url` from the per-call override, else `default`.
    pub fn resolve_base_url(mut self, default: &str) -> Self {
        let base = self
            .options
            .base_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| default.to_string());
        self.base_url = Some(base);
        self
    }

    /// Absolute URL for this request, if the base URL has been resolved.
    pub fn url(&self) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), self.path))
    }
}

/// A completed response, real or synthesized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub data: Value,
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub config: RequestConfig,
    /// True when the response was produced from a fixture.
    pub is_mock: bool,
}

impl ResponseEnvelope {
    /// Synthetic `200 OK` envelope carrying fixture data.
    pub fn mocked(data: Value, config: RequestConfig) -> Self {
        Self {
            data,
            status: 200,
            status_text: "OK".to_string(),
            headers: BTreeMap::new(),
            config,
            is_mock: true,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
