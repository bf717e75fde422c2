//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Request actions
    SendRequest,
    CycleMethod,

    // Response view
    CycleView,

    // Export / import
    ExportRequest,
    ShowImport,
    ImportPathChar(char),
    ImportPathBackspace,
    ImportRequest,
    CancelImport,

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissNotice,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Panel {
    Url,
    Headers,
    Body,
    Response,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Url => Panel::Headers,
            Panel::Headers => Panel::Body,
            Panel::Body => Panel::Response,
            Panel::Response => Panel::Url,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Url => Panel::Response,
            Panel::Headers => Panel::Url,
            Panel::Body => Panel::Headers,
            Panel::Response => Panel::Body,
        }
    }

    /// Panels holding multi-line JSON text
    pub fn is_multiline(&self) -> bool {
        matches!(self, Panel::Headers | Panel::Body)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Popups that capture every key while open
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Overlays {
    pub help: bool,
    pub import: bool,
    pub notice: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    overlays: Overlays,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Handle popups first
    if overlays.notice {
        return Some(UiEvent::DismissNotice);
    }

    if overlays.help {
        return Some(UiEvent::CloseHelp);
    }

    if overlays.import {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelImport),
            KeyCode::Enter => Some(UiEvent::ImportRequest),
            KeyCode::Backspace => Some(UiEvent::ImportPathBackspace),
            KeyCode::Char(c) => Some(UiEvent::ImportPathChar(c)),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('e') | KeyCode::Enter => match active_panel {
                Panel::Url | Panel::Headers | Panel::Body => Some(UiEvent::StartEditing),
                Panel::Response => None,
            },
            KeyCode::Char('m') => Some(UiEvent::CycleMethod),
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Char('v') => Some(UiEvent::CycleView),
            KeyCode::Char('x') => Some(UiEvent::ExportRequest),
            KeyCode::Char('i') => Some(UiEvent::ShowImport),
            KeyCode::Up if active_panel == Panel::Response => Some(UiEvent::ScrollUp),
            KeyCode::Down if active_panel == Panel::Response => Some(UiEvent::ScrollDown),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Tab if active_panel.is_multiline() => Some(UiEvent::CharInput(' ')),
            KeyCode::Enter => {
                if active_panel.is_multiline() {
                    Some(UiEvent::CharInput('\n'))
                } else {
                    Some(UiEvent::SendRequest)
                }
            }
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_sends_from_url_and_breaks_lines_in_json_fields() {
        let none = Overlays::default();
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), Panel::Url, InputMode::Editing, none),
            Some(UiEvent::SendRequest)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), Panel::Body, InputMode::Editing, none),
            Some(UiEvent::CharInput('\n'))
        );
    }

    #[test]
    fn test_notice_swallows_any_key() {
        let overlays = Overlays { notice: true, ..Overlays::default() };
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('s')), Panel::Url, InputMode::Normal, overlays),
            Some(UiEvent::DismissNotice)
        );
    }

    #[test]
    fn test_import_prompt_captures_characters() {
        let overlays = Overlays { import: true, ..Overlays::default() };
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), Panel::Url, InputMode::Normal, overlays),
            Some(UiEvent::ImportPathChar('q'))
        );
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let overlays = Overlays { help: true, ..Overlays::default() };
        assert_eq!(key_to_ui_event(key, Panel::Body, InputMode::Editing, overlays), Some(UiEvent::Quit));
    }
}
