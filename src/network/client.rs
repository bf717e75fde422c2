//! HTTP client wrapper - the production transport backed by reqwest

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::constants::HTTP_TIMEOUT_SECS;
use crate::models::HttpMethod;
use crate::network::transport::{Transport, TransportError, TransportResponse};
use crate::validator::ValidatedRequest;

/// Transport that performs real HTTP calls. Every status code counts as a
/// completed call; only failures to get a response are errors.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        ReqwestTransport {
            client: create_client(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a request from the given parameters
fn build_request(client: &reqwest::Client, request: &ValidatedRequest) -> reqwest::RequestBuilder {
    let mut req_builder = match request.method {
        HttpMethod::GET => client.get(&request.url),
        HttpMethod::POST => client.post(&request.url),
        HttpMethod::PUT => client.put(&request.url),
        HttpMethod::DELETE => client.delete(&request.url),
    };

    for (name, value) in &request.headers {
        req_builder = req_builder.header(name.as_str(), value.as_str());
    }

    if let Some(body) = &request.body {
        req_builder = req_builder.json(body);
    }

    req_builder
}

/// JSON when the body parses, the plain text otherwise
fn parse_payload(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timed out ({}s)", HTTP_TIMEOUT_SECS)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_builder() {
        format!("Invalid request: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ValidatedRequest) -> Result<TransportResponse, TransportError> {
        let resp = build_request(&self.client, request)
            .send()
            .await
            .map_err(|e| TransportError::new(describe_error(&e)))?;

        let status = resp.status().as_u16();
        let headers = collect_headers(resp.headers());

        match resp.text().await {
            Ok(body) => Ok(TransportResponse {
                status,
                data: parse_payload(body),
                headers,
            }),
            Err(e) => Err(TransportError::with_response(
                format!("Error reading body: {}", e),
                TransportResponse {
                    status,
                    data: Value::Null,
                    headers,
                },
            )),
        }
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};
    use serde_json::json;

    #[test]
    fn test_parse_payload_prefers_json() {
        assert_eq!(parse_payload("[{\"a\":1}]".to_string()), json!([{"a": 1}]));
        assert_eq!(parse_payload("<html>".to_string()), json!("<html>"));
        assert_eq!(parse_payload(String::new()), json!(""));
    }

    #[test]
    fn test_collect_headers_joins_repeated_names() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));
        headers.insert("content-type", HeaderValue::from_static("text/plain"));

        let collected = collect_headers(&headers);
        assert_eq!(collected["set-cookie"], "a=1, b=2");
        assert_eq!(collected["content-type"], "text/plain");
    }

    #[test]
    fn test_build_request_sends_body_only_when_present() {
        let client = reqwest::Client::new();
        let mut request = ValidatedRequest {
            method: HttpMethod::POST,
            url: "https://api.example.com/users".to_string(),
            headers: vec![("X-Trace".to_string(), "abc".to_string())],
            body: Some(json!({"name": "Ada"})),
        };

        let built = build_request(&client, &request).build().unwrap();
        assert_eq!(built.method(), reqwest::Method::POST);
        assert_eq!(built.headers()["x-trace"], "abc");
        assert_eq!(built.body().and_then(|b| b.as_bytes()), Some(&b"{\"name\":\"Ada\"}"[..]));

        request.method = HttpMethod::DELETE;
        request.body = None;
        let built = build_request(&client, &request).build().unwrap();
        assert_eq!(built.method(), reqwest::Method::DELETE);
        assert!(built.body().is_none());
    }
}
