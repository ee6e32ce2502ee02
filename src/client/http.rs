//! HTTP transport for the organization RPC service
//!
//! `POST {base_url}/rpc/{method}` with the params as JSON body; the service
//! answers with `{"code": 0, "message": "...", "data": ...}`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::RpcTransport;
use crate::config::UpstreamConfig;
use crate::error::{AppError, AppResult};

/// Response envelope of the organization service
#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Value,
}

impl RpcEnvelope {
    fn into_result(self) -> AppResult<Value> {
        if self.code == 0 {
            Ok(self.data)
        } else {
            Err(AppError::Upstream {
                code: self.code,
                message: self.message,
            })
        }
    }
}

#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/rpc/{}", self.base_url, method)
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> AppResult<Value> {
        let url = self.method_url(method);
        let response = self.http.post(&url).json(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} returned HTTP {}", url, status);
            return Err(AppError::Upstream {
                code: i64::from(status.as_u16()),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        let envelope: RpcEnvelope = response.json().await?;
        envelope.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url_trims_slash() {
        let transport = HttpTransport::new(&UpstreamConfig {
            base_url: "http://org.local/".to_string(),
            timeout_secs: 3,
        })
        .unwrap();
        assert_eq!(
            transport.method_url("organization.getTree"),
            "http://org.local/rpc/organization.getTree"
        );
    }

    #[test]
    fn test_envelope_success() {
        let envelope: RpcEnvelope =
            serde_json::from_str(r#"{"code": 0, "data": [1, 2]}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap(), serde_json::json!([1, 2]));
    }

    #[test]
    fn test_envelope_error() {
        let envelope: RpcEnvelope =
            serde_json::from_str(r#"{"code": 40001, "message": "name taken"}"#).unwrap();
        match envelope.into_result() {
            Err(AppError::Upstream { code, message }) => {
                assert_eq!(code, 40001);
                assert_eq!(message, "name taken");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_remote_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let transport = HttpTransport::new(&UpstreamConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        })
        .unwrap();
        let err = transport
            .call("organization.getTree", Value::Null)
            .await
            .unwrap_err();
        assert!(err.is_remote());
    }
}
