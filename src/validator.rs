//! Request validation - turns the raw editable fields into a dispatch-ready request

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::constants::DEFAULT_SCHEME;
use crate::error::ValidationError;
use crate::models::{HttpMethod, RequestDescriptor};

/// A request whose URL is normalized and whose JSON fields are parsed
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Present only for methods that carry a body
    pub body: Option<Value>,
}

fn scheme_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^https?://").expect("scheme pattern is valid"))
}

/// Trim the URL and default its scheme to https.
///
/// Nothing is rejected here; an unusable URL fails later in the transport.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if scheme_pattern().is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, trimmed)
    }
}

/// Parse the headers text into ordered name/value pairs
pub fn parse_headers(raw: &str) -> Result<Vec<(String, String)>, ValidationError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ValidationError::InvalidHeadersJson(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(ValidationError::InvalidHeadersJson(
            "expected a JSON object".to_string(),
        ));
    };

    Ok(map
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((name, s)),
            other => Some((name, other.to_string())),
        })
        .collect())
}

/// Parse the body text; empty text means an empty object
pub fn parse_body(raw: &str) -> Result<Value, ValidationError> {
    if raw.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(raw).map_err(|e| ValidationError::InvalidBodyJson(e.to_string()))
}

/// Validate a descriptor. Headers are checked before the body so only one
/// error is ever reported.
pub fn validate(descriptor: &RequestDescriptor) -> Result<ValidatedRequest, ValidationError> {
    let url = normalize_url(&descriptor.url);
    let headers = parse_headers(&descriptor.headers)?;
    let body = if descriptor.method.has_body() {
        Some(parse_body(&descriptor.body)?)
    } else {
        None
    };

    Ok(ValidatedRequest {
        method: descriptor.method,
        url,
        headers,
        body,
    })
}
