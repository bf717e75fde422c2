//! Network messages - communication between App and Network layers

use crate::models::ResponseEnvelope;
use crate::validator::ValidatedRequest;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Dispatch a validated request
    Dispatch {
        id: u64,
        request: ValidatedRequest,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A dispatch finished, successfully or not
    Completed {
        id: u64,
        envelope: ResponseEnvelope,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
        }
    }
}
