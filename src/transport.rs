//! Network boundary for the gateway.
//!
//! [`Transport`] is the seam the gateway calls once a request has cleared
//! the mock layer. [`HttpTransport`] sends it with reqwest.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::GatewayError;
use crate::request::{RequestConfig, ResponseEnvelope};

/// Sends a resolved request and returns the response envelope.
///
/// Implementations return `Err` for transport failures and should return
/// `Err` for non-2xx statuses; the gateway rejects a non-2xx envelope either way.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, config: RequestConfig) -> Result<ResponseEnvelope, GatewayError>;
}

/// reqwest-backed transport issuing `GET <base_url><path>`.
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Create a transport with the given user agent and default timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, config: RequestConfig) -> Result<ResponseEnvelope, GatewayError> {
        let url = config
            .url()
            .ok_or_else(|| GatewayError::InvalidPath(config.path.clone()))?;

        let mut request = self.http.get(&url);
        if let Some(timeout) = config.options.timeout {
            request = request.timeout(timeout);
        }
        for (name, value) in &config.options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        tracing::debug!(%url, "sending request");
        let response = request.send().await.map_err(map_send_error)?;

        let status = response.status();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await.map_err(map_send_error)?;

        if !status.is_success() {
            let data = decode_body(&body).unwrap_or(Value::Null);
            return Err(GatewayError::status(
                status.as_u16(),
                status_message(status.as_u16(), &data),
            ));
        }
        let data = decode_body(&body)?;

        Ok(ResponseEnvelope {
            data,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            config,
            is_mock: false,
        })
    }
}

fn map_send_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(e)
    }
}

/// Decode a body as JSON, keeping non-JSON text as a string value.
fn decode_body(body: &[u8]) -> Result<Value, GatewayError> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(e) => match std::str::from_utf8(body) {
            Ok(text) => Ok(Value::String(text.to_string())),
            Err(_) => Err(GatewayError::Decode(e)),
        },
    }
}

/// Message for a non-2xx response: the body's `message` field when present.
pub(crate) fn status_message(status: u16, data: &Value) -> String {
    data.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status))
}
