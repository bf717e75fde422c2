use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::constants::DEFAULT_HEADERS;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::GET,
        }
    }

    /// Only POST and PUT carry a JSON body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT)
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            "PUT" => Ok(HttpMethod::PUT),
            "DELETE" => Ok(HttpMethod::DELETE),
            _ => Err(s.to_string()),
        }
    }
}

/// The editable request, exactly as the user typed it.
///
/// `headers` and `body` hold raw JSON text. Parsed forms are derived by the
/// validator and never written back here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub url: String,
    pub headers: String,
    pub body: String,
}

impl Default for RequestDescriptor {
    fn default() -> Self {
        RequestDescriptor {
            method: HttpMethod::GET,
            url: String::new(),
            headers: String::from(DEFAULT_HEADERS),
            body: String::new(),
        }
    }
}

/// Normalized outcome of one dispatch, uniform across success and failure
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseEnvelope {
    /// True when the transport call completed, whatever the status code
    pub success: bool,
    /// HTTP status, or 500 when the transport never produced one
    pub status: u16,
    pub data: Value,
    /// Response headers, only present on success
    pub headers: Option<BTreeMap<String, String>>,
}

/// Response presentations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Raw,
    Table,
    Cards,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Raw => "Raw JSON",
            ViewMode::Table => "Table",
            ViewMode::Cards => "Cards",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_cycle_covers_all_methods() {
        let mut method = HttpMethod::GET;
        let mut seen = vec![method];
        for _ in 0..3 {
            method = method.next();
            seen.push(method);
        }
        assert_eq!(seen, vec![HttpMethod::GET, HttpMethod::POST, HttpMethod::PUT, HttpMethod::DELETE]);
        assert_eq!(method.next(), HttpMethod::GET);
    }

    #[test]
    fn test_method_from_str_is_case_insensitive() {
        assert_eq!("put".parse::<HttpMethod>(), Ok(HttpMethod::PUT));
        assert_eq!("Delete".parse::<HttpMethod>(), Ok(HttpMethod::DELETE));
        assert!("PATCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_only_post_and_put_have_body() {
        assert!(HttpMethod::POST.has_body());
        assert!(HttpMethod::PUT.has_body());
        assert!(!HttpMethod::GET.has_body());
        assert!(!HttpMethod::DELETE.has_body());
    }
}
