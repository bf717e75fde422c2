//! Network layer - request dispatch and HTTP execution
//!
//! The Network actor receives dispatch commands and sends back envelopes.

pub mod actor;
pub mod client;
pub mod dispatcher;
pub mod transport;

pub use actor::NetworkActor;
pub use client::ReqwestTransport;
pub use dispatcher::{dispatch, InFlight};
pub use transport::{Transport, TransportError, TransportResponse};
