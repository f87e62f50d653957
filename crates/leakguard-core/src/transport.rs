//! Transport boundary
//!
//! The pipeline's only coupling to a host network stack is the [`Transport`]
//! trait: one awaitable primitive taking a prepared request and returning a
//! status code plus parsed body, or a transport-level failure. The default
//! implementation adapts reqwest; tests substitute scripted doubles.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::request::{HttpMethod, RequestDescriptor};

/// Failure raised before any usable response was obtained
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("network unreachable: {0}")]
    Unreachable(String),
}

impl TransportError {
    /// Build a transport error from a host failure description
    ///
    /// Host platforms report failures as free text; a `timeout` keyword in
    /// the text selects the timeout variant, everything else is treated as
    /// an unreachable network.
    pub fn from_failure_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.to_lowercase().contains("timeout") {
            TransportError::Timeout(text)
        } else {
            TransportError::Unreachable(text)
        }
    }
}

/// Prepared request handed to the transport
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    /// Query parameters for GET/DELETE, JSON body for POST/PUT
    pub payload: Option<Value>,
    pub timeout: Duration,
}

impl TransportRequest {
    /// Extract the transport-relevant fields from a processed descriptor
    pub fn from_descriptor(descriptor: &RequestDescriptor) -> Self {
        Self {
            url: descriptor.url.clone(),
            method: descriptor.method,
            headers: descriptor.headers.clone(),
            payload: descriptor.payload.clone(),
            timeout: descriptor.timeout,
        }
    }
}

/// Raw response produced by the transport
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    /// Parsed JSON body; `Value::Null` when the body was empty, a
    /// `Value::String` when it was not valid JSON
    pub body: Value,
}

/// The single network primitive the pipeline depends on
#[async_trait]
pub trait Transport: Send + Sync {
    async fn issue(
        &self,
        request: &TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// Default transport backed by a shared reqwest client
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create the adapter with its own connection pool
    ///
    /// Timeouts are applied per request from the descriptor, so the client
    /// itself is built without one.
    pub fn new() -> std::result::Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Unreachable(format!("failed to build client: {e}")))?;
        Ok(Self { client })
    }

    fn method_of(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Flatten a JSON object into query pairs the way the host platform
    /// serializes GET payloads: strings verbatim, scalars via display,
    /// nested values as compact JSON.
    fn query_pairs(payload: &Value) -> Vec<(String, String)> {
        match payload {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| {
                    let rendered = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (key.clone(), rendered)
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn issue(
        &self,
        request: &TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(Self::method_of(request.method), &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(payload) = &request.payload {
            if request.method.payload_in_query() {
                builder = builder.query(&Self::query_pairs(payload));
            } else {
                builder = builder.json(payload);
            }
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_text_keyword_matching() {
        assert!(matches!(
            TransportError::from_failure_text("request:fail timeout"),
            TransportError::Timeout(_)
        ));
        assert!(matches!(
            TransportError::from_failure_text("request:fail socket hang up"),
            TransportError::Unreachable(_)
        ));
    }

    #[test]
    fn test_query_pairs_rendering() {
        let pairs = ReqwestTransport::query_pairs(&json!({
            "keyword": "roof",
            "page": 2,
            "flags": ["a", "b"]
        }));

        assert!(pairs.contains(&("keyword".to_string(), "roof".to_string())));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("flags".to_string(), "[\"a\",\"b\"]".to_string())));
    }

    #[test]
    fn test_non_object_payload_produces_no_pairs() {
        assert!(ReqwestTransport::query_pairs(&json!("scalar")).is_empty());
        assert!(ReqwestTransport::query_pairs(&json!(null)).is_empty());
    }

    #[test]
    fn test_transport_request_from_descriptor() {
        let config = crate::config::HttpConfig::default();
        let descriptor =
            crate::request::RequestDescriptor::new(HttpMethod::Post, "https://x/y", &config)
                .with_payload(json!({"name": "Lee"}));

        let request = TransportRequest::from_descriptor(&descriptor);
        assert_eq!(request.url, "https://x/y");
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.timeout, config.timeout);
        assert_eq!(request.payload, Some(json!({"name": "Lee"})));
    }
}
