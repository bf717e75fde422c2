//! Request export/import in the portable JSON document format
//!
//! ```json
//! { "method": "POST", "url": "...", "headers": "{...}", "body": "{...}" }
//! ```
//!
//! `headers` and `body` are stored as JSON text inside JSON strings so the
//! document keeps exactly what the user typed.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::DEFAULT_HEADERS;
use crate::error::ImportError;
use crate::models::{HttpMethod, RequestDescriptor};

#[derive(Serialize)]
struct RequestDocument<'a> {
    method: &'static str,
    url: &'a str,
    headers: &'a str,
    body: &'a str,
}

/// Serialize a descriptor's raw fields, pretty-printed
pub fn export(descriptor: &RequestDescriptor) -> String {
    let document = RequestDocument {
        method: descriptor.method.as_str(),
        url: &descriptor.url,
        headers: &descriptor.headers,
        body: &descriptor.body,
    };
    // A struct of plain strings always serializes
    serde_json::to_string_pretty(&document).unwrap_or_default()
}

/// Parse an exported document. Missing fields fall back to defaults, but a
/// document that is not JSON at all is rejected.
pub fn import(text: &str) -> Result<RequestDescriptor, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(document) = value else {
        return Err(ImportError::NotAnObject);
    };

    Ok(RequestDescriptor {
        method: import_method(&document)?,
        url: import_string(&document, "url")?,
        headers: import_headers(&document),
        body: import_string(&document, "body")?,
    })
}

fn import_method(document: &Map<String, Value>) -> Result<HttpMethod, ImportError> {
    match document.get("method") {
        None | Some(Value::Null) => Ok(HttpMethod::GET),
        Some(Value::String(s)) if s.is_empty() => Ok(HttpMethod::GET),
        Some(Value::String(s)) => s.parse().map_err(ImportError::UnknownMethod),
        Some(other) => Err(ImportError::UnknownMethod(other.to_string())),
    }
}

fn import_string(document: &Map<String, Value>, field: &'static str) -> Result<String, ImportError> {
    match document.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ImportError::FieldType(field)),
    }
}

fn import_headers(document: &Map<String, Value>) -> String {
    match document.get("headers") {
        None | Some(Value::Null) => DEFAULT_HEADERS.to_string(),
        Some(Value::String(s)) if s.is_empty() => DEFAULT_HEADERS.to_string(),
        Some(Value::String(s)) => s.clone(),
        // Hand-written files sometimes nest the headers object directly
        Some(other) => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
