//! # restview
//!
//! A terminal API tester with an adaptive response viewer.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, DELETE
//! - JSON headers and body editors with validation
//! - Response views: raw JSON, table and cards for lists of objects
//! - Request export/import as a portable JSON document
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod error;
pub mod models;
pub mod validator;
pub mod view;
pub mod serializer;
pub mod storage;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{HttpMethod, RequestDescriptor, ResponseEnvelope, ViewMode};
pub use error::{ImportError, ValidationError};
pub use validator::{validate, ValidatedRequest};
pub use view::{legal_views, render, RenderedView, ResponseShape};
pub use serializer::{export, import};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{dispatch, InFlight, NetworkActor, ReqwestTransport, Transport};
