//! App state - pure data structure with no I/O logic

use crate::messages::ui_events::{InputMode, Overlays, Panel};
use crate::messages::{RenderState, ResponseView};
use crate::models::{RequestDescriptor, ResponseEnvelope, ViewMode};
use crate::network::InFlight;
use crate::storage::Storage;
use crate::view;

/// Main application state - pure data, no I/O
pub struct AppState {
    // Request data
    pub request: RequestDescriptor,
    pub cursor_position: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub response_scroll: u16,

    // Response (replaced wholesale by each dispatch)
    pub response: Option<ResponseEnvelope>,
    pub time_ms: u64,
    pub view: ViewMode,

    // Dispatch tracking
    pub in_flight: InFlight,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    /// Validation error shown under the form
    pub error_message: Option<String>,
    /// Blocking message (import failures, export results)
    pub notice: Option<String>,

    pub storage: Storage,

    // Popups
    pub show_help: bool,
    pub show_import: bool,
    pub import_path_input: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(InFlight::new())
    }
}

impl AppState {
    pub fn new(in_flight: InFlight) -> Self {
        AppState {
            request: RequestDescriptor::default(),
            cursor_position: 0,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            response_scroll: 0,
            response: None,
            time_ms: 0,
            view: ViewMode::Raw,
            in_flight,
            next_request_id: 1,
            pending_request_id: None,
            error_message: None,
            notice: None,
            storage: Storage::new(),
            show_help: false,
            show_import: false,
            import_path_input: String::new(),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// True from submission until the envelope arrives
    pub fn is_loading(&self) -> bool {
        self.pending_request_id.is_some() || self.in_flight.is_set()
    }

    /// Whether the focused panel accepts text right now
    pub fn is_editable(&self) -> bool {
        match self.active_panel {
            Panel::Url | Panel::Headers => true,
            Panel::Body => self.request.method.has_body(),
            Panel::Response => false,
        }
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Url => &self.request.url,
            Panel::Headers => &self.request.headers,
            Panel::Body => &self.request.body,
            Panel::Response => "",
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::Url => Some(&mut self.request.url),
            Panel::Headers => Some(&mut self.request.headers),
            Panel::Body => Some(&mut self.request.body),
            Panel::Response => None,
        }
    }

    /// The current envelope rendered in the selected view
    pub fn response_view(&self) -> Option<ResponseView> {
        self.response.as_ref().map(|envelope| ResponseView {
            success: envelope.success,
            status: envelope.status,
            time_ms: self.time_ms,
            header_count: envelope.headers.as_ref().map_or(0, |h| h.len()),
            view: self.view,
            legal_views: view::legal_views(&envelope.data),
            rendered: view::render(&envelope.data, self.view),
        })
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            method: self.request.method,
            url: self.request.url.clone(),
            headers: self.request.headers.clone(),
            body: self.request.body.clone(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            response: self.response_view(),
            response_scroll: self.response_scroll,
            is_loading: self.is_loading(),
            error_message: self.error_message.clone(),
            overlays: Overlays {
                help: self.show_help,
                import: self.show_import,
                notice: self.notice.is_some(),
            },
            notice: self.notice.clone(),
            import_path_input: self.import_path_input.clone(),
        }
    }
}
