//! JSON-RPC transport abstraction.
//!
//! The wallet never talks to a node directly; everything goes through an
//! injected [`RpcTransport`]. In production that is [`HttpTransport`]; in
//! tests it is a scripted implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::ProviderError;

/// A JSON-RPC request pipe.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Issue a single JSON-RPC request and return the raw `result` value.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// HTTP JSON-RPC 2.0 transport.
///
/// Wraps `reqwest::Client` with the endpoint URL and a monotonically
/// increasing request id. Timeouts are the transport's own; callers do not
/// layer retries or deadlines on top.
pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Create a transport targeting the given JSON-RPC endpoint
    /// (e.g. `https://data-seed-prebsc-1-s1.binance.org:8545`).
    pub fn new(url: impl Into<String>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// The configured endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }

        let parsed: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Transport(format!("invalid JSON response: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(ProviderError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        parsed
            .result
            .ok_or_else(|| ProviderError::InvalidResponse("missing result field".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: "eth_chainId",
            params: serde_json::json!([]),
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "eth_chainId",
                "params": [],
            })
        );
    }

    #[test]
    fn response_error_parses() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"method not found"}}"#;
        let parsed: JsonRpcResponse = serde_json::from_str(raw).unwrap();
        let err = parsed.error.unwrap();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "method not found");
        assert!(parsed.result.is_none());
    }
}
