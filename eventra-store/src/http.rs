use async_trait::async_trait;
use eventra_core::transport::{ApiRequest, ApiResponse, Method, Transport};
use eventra_core::{CoreError, CoreResult};
use serde_json::Value;
use tracing::debug;

use crate::app_config::ApiConfig;
use crate::StoreError;

/// `reqwest`-backed transport resolving request paths against a base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
    }
}

/// JSON when possible, the raw text otherwise (HTML error pages, empty bodies).
fn decode_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> CoreResult<ApiResponse> {
        let url = self.url(&request.path);
        let mut builder = self.client.request(to_reqwest(request.method), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CoreError::Transport(format!("{} {}: {}", request.method, url, e)))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| CoreError::Transport(format!("reading body of {}: {}", url, e)))?;

        debug!(method = %request.method, path = %request.path, status, "HTTP exchange");
        Ok(ApiResponse::new(status, decode_body(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let transport = HttpTransport::new(&ApiConfig {
            base_url: "http://localhost:5000/".to_string(),
            timeout_seconds: 5,
        })
        .unwrap();
        assert_eq!(transport.url("/api/events/"), "http://localhost:5000/api/events/");
    }

    #[test]
    fn test_body_decoding() {
        assert_eq!(decode_body(String::new()), Value::Null);
        assert_eq!(decode_body("{\"msg\":\"x\"}".into())["msg"], "x");
        assert_eq!(decode_body("<html>".into()), Value::String("<html>".into()));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let transport = HttpTransport::new(&ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 2,
        })
        .unwrap();
        let res = transport.send(ApiRequest::get("/api/events/")).await;
        assert!(matches!(res, Err(CoreError::Transport(_))));
    }
}
