//! HTTP transport for the account service.
//!
//! Each call is a `POST` of `{"action": <method>, "args": <params>}` to the configured
//! endpoint. Successful replies carry either `{"data": <result>}` or `{"error": "<message>"}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::{AppConfig, ConfigError};
use crate::error::CallError;
use crate::service::trait_::Transport;
use crate::telemetry::current_trace_id;

const BODY_SNIPPET_CHARS: usize = 200;

/// Correlation header carrying the submission's trace id.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Errors raised while building the transport.
#[derive(Debug, Error)]
pub enum TransportInitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct CallRequest<'a> {
    action: &'a str,
    args: Value,
}

#[derive(Debug, Deserialize)]
struct CallReply {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// `Transport` backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, TransportInitError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, TransportInitError> {
        let endpoint = config.service_url()?;
        Self::new(endpoint, config.call_timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, CallError> {
        let request = CallRequest {
            action: method,
            args: params,
        };

        let mut builder = self.client.post(self.endpoint.clone()).json(&request);
        if let Some(trace_id) = current_trace_id() {
            builder = builder.header(TRACE_ID_HEADER, trace_id);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok().map(|body| snippet(&body));
            tracing::warn!(method, status = status.as_u16(), "account service call failed");
            return Err(CallError::Http {
                status: status.as_u16(),
                body: body.filter(|b| !b.is_empty()),
            });
        }

        let reply: CallReply = response.json().await?;
        if let Some(message) = reply.error {
            return Err(CallError::service(method, message));
        }
        Ok(reply.data.unwrap_or(Value::Null))
    }
}

fn snippet(body: &str) -> String {
    if body.chars().count() > BODY_SNIPPET_CHARS {
        let truncated: String = body.chars().take(BODY_SNIPPET_CHARS).collect();
        format!("{}...", truncated)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_truncates_long_bodies() {
        let long = "x".repeat(250);
        let cut = snippet(&long);
        assert_eq!(cut.len(), BODY_SNIPPET_CHARS + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_from_config_rejects_bad_service_url() {
        let config = AppConfig {
            account_service_url: "ftp://wallet.local/rpc".to_string(),
            ..AppConfig::default()
        };
        let err = HttpTransport::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TransportInitError::Config(ConfigError::InvalidServiceUrl { .. })
        ));
    }

    #[test]
    fn test_request_envelope_shape() {
        let request = CallRequest {
            action: "selectAccount",
            args: serde_json::json!({"id": "42"}),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"action": "selectAccount", "args": {"id": "42"}})
        );
    }
}
