//! Transport seam between the dispatcher and whatever actually speaks HTTP

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::validator::ValidatedRequest;

/// What a transport returns for a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub data: Value,
    pub headers: BTreeMap<String, String>,
}

/// A failed transport call. `response` is set when the transport gave up
/// after receiving something from the server.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub response: Option<TransportResponse>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        TransportError {
            message: message.into(),
            response: None,
        }
    }

    pub fn with_response(message: impl Into<String>, response: TransportResponse) -> Self {
        TransportError {
            message: message.into(),
            response: Some(response),
        }
    }
}

/// Sends one validated request
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ValidatedRequest) -> Result<TransportResponse, TransportError>;
}
