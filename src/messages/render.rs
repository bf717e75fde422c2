//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{InputMode, Overlays, Panel};
use crate::models::{HttpMethod, ViewMode};
use crate::view::RenderedView;

/// The response as the viewer shows it
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseView {
    pub success: bool,
    pub status: u16,
    pub time_ms: u64,
    pub header_count: usize,
    pub view: ViewMode,
    /// Views the user may switch between for this payload
    pub legal_views: Vec<ViewMode>,
    pub rendered: RenderedView,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Request data
    pub method: HttpMethod,
    pub url: String,
    pub headers: String,
    pub body: String,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Response
    pub response: Option<ResponseView>,
    pub response_scroll: u16,
    pub is_loading: bool,

    /// Inline validation error under the form
    pub error_message: Option<String>,

    // Popups
    pub overlays: Overlays,
    pub notice: Option<String>,
    pub import_path_input: String,
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::DEFAULT_HEADERS;
        RenderState {
            method: HttpMethod::GET,
            url: String::new(),
            headers: String::from(DEFAULT_HEADERS),
            body: String::new(),
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            response: None,
            response_scroll: 0,
            is_loading: false,
            error_message: None,
            overlays: Overlays::default(),
            notice: None,
            import_path_input: String::new(),
        }
    }
}
