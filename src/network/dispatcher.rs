//! Dispatcher - runs one request through a transport and normalizes the outcome

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::models::ResponseEnvelope;
use crate::network::transport::{Transport, TransportError};
use crate::validator::ValidatedRequest;

/// Status reported when the transport never produced one
pub const FALLBACK_STATUS: u16 = 500;

/// Shared "request in flight" flag. The owner creates it and hands clones to
/// whoever dispatches; it is false whenever no dispatch is running.
#[derive(Clone, Debug, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise the flag until the returned guard is dropped
    pub fn begin(&self) -> InFlightGuard<'_> {
        self.0.store(true, Ordering::SeqCst);
        InFlightGuard { flag: self }
    }
}

pub struct InFlightGuard<'a> {
    flag: &'a InFlight,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.0.store(false, Ordering::SeqCst);
    }
}

/// Send `request` exactly once. Transport failures come back as an envelope
/// with `success: false`; nothing is propagated.
pub async fn dispatch(
    transport: &dyn Transport,
    request: &ValidatedRequest,
    in_flight: &InFlight,
) -> ResponseEnvelope {
    let _guard = in_flight.begin();
    tracing::info!(method = request.method.as_str(), url = %request.url, "Dispatching request");

    match transport.send(request).await {
        Ok(response) => {
            tracing::info!(status = response.status, "Request completed");
            ResponseEnvelope {
                success: true,
                status: response.status,
                data: response.data,
                headers: Some(response.headers),
            }
        }
        Err(error) => {
            tracing::warn!(error = %error.message, "Transport failure");
            failure_envelope(error)
        }
    }
}

fn failure_envelope(error: TransportError) -> ResponseEnvelope {
    let TransportError { message, response } = error;
    let (status, data) = match response {
        Some(response) => {
            let status = if response.status == 0 { FALLBACK_STATUS } else { response.status };
            let data = if is_blank(&response.data) { Value::String(message) } else { response.data };
            (status, data)
        }
        None => (FALLBACK_STATUS, Value::String(message)),
    };

    ResponseEnvelope {
        success: false,
        status,
        data,
        headers: None,
    }
}

/// An error body worth showing instead of the failure message
fn is_blank(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}
