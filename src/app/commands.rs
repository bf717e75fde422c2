//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::ViewMode;
use crate::{serializer, validator, view};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.is_editable() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            if let Some(input) = self.current_input_mut() {
                let prev_pos = input[..cursor_pos]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                input.remove(prev_pos);
                self.cursor_position = prev_pos;
            }
        }
    }

    // ========================
    // HTTP Method
    // ========================

    pub fn cycle_method(&mut self) {
        if !self.is_loading() {
            self.request.method = self.request.method.next();
            if !self.is_editable() {
                self.input_mode = InputMode::Normal;
            }
        }
    }

    // ========================
    // Response scrolling and views
    // ========================

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    /// Move to the next view the current payload allows
    pub fn cycle_view(&mut self) {
        let Some(envelope) = &self.response else {
            return;
        };
        let legal = view::legal_views(&envelope.data);
        let next = legal
            .iter()
            .position(|mode| *mode == self.view)
            .map(|i| legal[(i + 1) % legal.len()])
            .unwrap_or(ViewMode::Raw);
        tracing::debug!(from = ?self.view, to = ?next, "Switching response view");
        self.view = next;
        self.response_scroll = 0;
    }

    // ========================
    // Request sending
    // ========================

    /// Validate the form and build a dispatch command. Refused while a
    /// dispatch is still in flight.
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        if self.is_loading() {
            tracing::debug!("Ignoring submission while a request is in flight");
            return None;
        }

        self.error_message = None;
        self.response = None;

        match validator::validate(&self.request) {
            Ok(request) => {
                let id = self.next_id();
                self.pending_request_id = Some(id);
                Some(NetworkCommand::Dispatch { id, request })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Request validation failed");
                self.error_message = Some(e.to_string());
                None
            }
        }
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        // Only process if it matches the pending request
        if self.pending_request_id != Some(response.id()) {
            return;
        }

        match response {
            NetworkResponse::Completed { envelope, time_ms, .. } => {
                if !view::is_legal(&envelope.data, self.view) {
                    tracing::debug!(view = ?self.view, "View no longer fits the payload, resetting to raw");
                    self.view = ViewMode::Raw;
                }
                self.response = Some(envelope);
                self.time_ms = time_ms;
                self.response_scroll = 0;
                self.pending_request_id = None;
            }
        }
    }

    // ========================
    // Export / import
    // ========================

    pub fn export_request(&mut self) {
        match self.storage.save_export(&self.request) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Exported request");
                self.notice = Some(format!("Request exported to {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                self.notice = Some(format!("Export failed: {:#}", e));
            }
        }
    }

    pub fn show_import(&mut self) {
        self.show_import = true;
    }

    pub fn import_path_char(&mut self, c: char) {
        self.import_path_input.push(c);
    }

    pub fn import_path_backspace(&mut self) {
        self.import_path_input.pop();
    }

    pub fn cancel_import(&mut self) {
        self.import_path_input.clear();
        self.show_import = false;
    }

    /// Load the request file at the typed path. On any failure the current
    /// request is left untouched.
    pub fn import_request(&mut self) {
        let path = std::mem::take(&mut self.import_path_input);
        self.show_import = false;

        let text = match self.storage.read_import(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Import failed");
                self.notice = Some(format!("Could not read file: {:#}", e));
                return;
            }
        };

        self.apply_import(&text);
    }

    /// Replace the request with an imported document
    pub fn apply_import(&mut self, text: &str) {
        match serializer::import(text) {
            Ok(request) => {
                tracing::info!(method = request.method.as_str(), url = %request.url, "Imported request");
                self.request = request;
                self.input_mode = InputMode::Normal;
                self.cursor_position = self.current_input().len();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Import failed");
                self.notice = Some(e.to_string());
            }
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ui_events::Panel;
    use crate::models::{HttpMethod, RequestDescriptor, ResponseEnvelope};
    use crate::storage::Storage;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn completed(id: u64, data: Value) -> NetworkResponse {
        NetworkResponse::Completed {
            id,
            envelope: ResponseEnvelope {
                success: true,
                status: 200,
                data,
                headers: Some(Default::default()),
            },
            time_ms: 12,
        }
    }

    fn dispatch_id(cmd: Option<NetworkCommand>) -> u64 {
        match cmd {
            Some(NetworkCommand::Dispatch { id, .. }) => id,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_headers_block_dispatch() {
        let mut state = AppState::default();
        state.request.headers = "Authorization: Bearer x".to_string();

        assert!(state.prepare_request().is_none());
        assert!(state.error_message.as_deref().unwrap().starts_with("Headers must be valid JSON"));
        assert!(!state.is_loading());
        assert!(!state.in_flight.is_set());
    }

    #[test]
    fn test_invalid_body_blocks_post_but_not_get() {
        let mut state = AppState::default();
        state.request.body = "{oops".to_string();

        assert!(state.prepare_request().is_some());

        let mut state = AppState::default();
        state.request.method = HttpMethod::POST;
        state.request.body = "{oops".to_string();
        assert!(state.prepare_request().is_none());
        assert!(state.error_message.as_deref().unwrap().starts_with("Body must be valid JSON"));
    }

    #[test]
    fn test_new_submission_clears_previous_error() {
        let mut state = AppState::default();
        state.request.headers = "{".to_string();
        state.prepare_request();
        assert!(state.error_message.is_some());

        state.request.headers = "{}".to_string();
        let cmd = state.prepare_request();
        assert!(state.error_message.is_none());
        match cmd {
            Some(NetworkCommand::Dispatch { request, .. }) => {
                assert_eq!(request.url, "https://");
                assert_eq!(request.body, None);
            }
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn test_second_submission_refused_while_pending() {
        let mut state = AppState::default();
        let id = dispatch_id(state.prepare_request());
        assert!(state.is_loading());
        assert!(state.prepare_request().is_none());

        state.handle_response(completed(id, json!({})));
        assert!(!state.is_loading());
        assert!(state.prepare_request().is_some());
    }

    #[test]
    fn test_stale_responses_are_ignored() {
        let mut state = AppState::default();
        let id = dispatch_id(state.prepare_request());

        state.handle_response(completed(id + 100, json!("stale")));
        assert!(state.response.is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn test_view_resets_to_raw_when_payload_changes_shape() {
        let mut state = AppState::default();
        let id = dispatch_id(state.prepare_request());
        state.handle_response(completed(id, json!([{"a": 1}, {"a": 2}])));

        state.cycle_view();
        assert_eq!(state.view, ViewMode::Table);
        state.cycle_view();
        assert_eq!(state.view, ViewMode::Cards);

        // Another array of records keeps the selection
        let id = dispatch_id(state.prepare_request());
        state.handle_response(completed(id, json!([{"b": 1}])));
        assert_eq!(state.view, ViewMode::Cards);

        let id = dispatch_id(state.prepare_request());
        state.handle_response(completed(id, json!([1, 2, 3])));
        assert_eq!(state.view, ViewMode::Raw);
    }

    #[test]
    fn test_cycle_view_stays_raw_for_scalars() {
        let mut state = AppState::default();
        let id = dispatch_id(state.prepare_request());
        state.handle_response(completed(id, json!({"a": 1})));

        state.cycle_view();
        assert_eq!(state.view, ViewMode::Raw);
        assert_eq!(state.response_view().unwrap().legal_views, vec![ViewMode::Raw]);
    }

    #[test]
    fn test_body_panel_is_read_only_for_get() {
        let mut state = AppState::default();
        state.active_panel = Panel::Body;
        state.start_editing();
        assert_eq!(state.input_mode, InputMode::Normal);

        state.cycle_method();
        state.start_editing();
        assert_eq!(state.input_mode, InputMode::Editing);
        state.enter_char('{');
        state.enter_char('}');
        assert_eq!(state.request.body, "{}");
        state.delete_char();
        assert_eq!(state.request.body, "{");
    }

    #[test]
    fn test_failed_import_leaves_request_unchanged() {
        let mut state = AppState::default();
        state.request.url = "keep.me".to_string();
        let before = state.request.clone();

        state.apply_import("{ not json");
        assert_eq!(state.request, before);
        assert!(state.notice.as_deref().unwrap().starts_with("Invalid JSON format in file"));
    }

    #[test]
    fn test_export_then_import_restores_request() {
        let dir = tempdir().unwrap();
        let mut state = AppState::default();
        state.storage = Storage::with_export_dir(dir.path());
        let original = RequestDescriptor {
            method: HttpMethod::POST,
            url: "api.example.com/users".to_string(),
            headers: "{\"Accept\": \"application/json\"}".to_string(),
            body: "{\"name\": \"Ada\"}".to_string(),
        };
        state.request = original.clone();

        state.export_request();
        assert!(state.notice.take().unwrap().contains("api-request.json"));

        state.request = RequestDescriptor::default();
        for c in state.storage.export_path().to_string_lossy().chars() {
            state.import_path_char(c);
        }
        state.import_request();

        assert_eq!(state.request, original);
        assert!(state.notice.is_none());
        assert!(!state.show_import);
    }

    #[test]
    fn test_import_of_missing_file_sets_notice() {
        let dir = tempdir().unwrap();
        let mut state = AppState::default();
        state.storage = Storage::with_export_dir(dir.path());
        state.show_import();
        state.import_path_input = dir.path().join("missing.json").to_string_lossy().into_owned();

        state.import_request();
        assert!(state.notice.unwrap().starts_with("Could not read file"));
        assert_eq!(state.request, RequestDescriptor::default());
    }
}
