//! Widget helpers shared by the terminal drawing code

use ratatui::{prelude::*, widgets::*};

use crate::models::ViewMode;

/// Widest a table cell may be drawn before it is cut with an ellipsis
pub const MAX_CELL_WIDTH: usize = 24;

/// View selector listing only the views legal for the current payload
pub fn render_view_tabs(legal: &[ViewMode], selected: ViewMode) -> Tabs<'static> {
    let titles: Vec<Line> = legal.iter().map(|mode| Line::from(mode.label())).collect();
    let index = legal.iter().position(|mode| *mode == selected).unwrap_or(0);

    Tabs::new(titles)
        .select(index)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Cut `text` to `max` characters for display. The underlying value is not
/// touched; only what is drawn gets shorter.
pub fn truncate_cell(text: &str, max: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Line and column of a byte offset, for placing the terminal cursor
pub fn cursor_coords(text: &str, byte_pos: usize) -> (u16, u16) {
    let before = &text[..byte_pos.min(text.len())];
    let row = before.matches('\n').count();
    let col = before.rsplit('\n').next().map_or(0, |line| line.chars().count());
    (col as u16, row as u16)
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '.')
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut escaped = false;
    // A quoted token followed by ':' is a key
    let is_key_line = line.contains("\":");

    let flush = |current: &mut String, spans: &mut Vec<Span<'static>>| {
        if current.is_empty() {
            return;
        }
        let text = std::mem::take(current);
        if is_numeric(&text) {
            spans.push(Span::styled(text, Style::default().fg(Color::Yellow)));
        } else if matches!(text.trim(), "true" | "false" | "null") {
            spans.push(Span::styled(text, Style::default().fg(Color::Magenta)));
        } else {
            spans.push(Span::raw(text));
        }
    };

    let mut seen_key = false;
    for c in line.chars() {
        if in_string {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                let color = if is_key_line && !seen_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(std::mem::take(&mut current), Style::default().fg(color)));
                in_string = false;
                seen_key = true;
            }
            continue;
        }

        match c {
            '"' => {
                flush(&mut current, &mut spans);
                current.push(c);
                in_string = true;
            }
            '{' | '}' | '[' | ']' => {
                flush(&mut current, &mut spans);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
            }
            ':' | ',' => {
                flush(&mut current, &mut spans);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::White)));
            }
            ' ' => {
                flush(&mut current, &mut spans);
                spans.push(Span::raw(" "));
            }
            _ => current.push(c),
        }
    }
    flush(&mut current, &mut spans);

    Line::from(spans)
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_cell_only_shortens_long_text() {
        assert_eq!(truncate_cell("short", 10), "short");
        assert_eq!(truncate_cell("abcdefghijkl", 5), "abcd…");
        assert_eq!(truncate_cell("two\nlines", 20), "two lines");
    }

    #[test]
    fn test_cursor_coords_tracks_lines() {
        let text = "{\n  \"a\": 1\n}";
        assert_eq!(cursor_coords(text, 0), (0, 0));
        assert_eq!(cursor_coords(text, 2), (0, 1));
        assert_eq!(cursor_coords(text, 5), (3, 1));
        assert_eq!(cursor_coords(text, text.len()), (1, 2));
    }

    #[test]
    fn test_highlight_json_keeps_text() {
        let lines = highlight_json("{\n  \"name\": \"Ada\",\n  \"age\": 36\n}");
        let rendered: Vec<String> = lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(rendered, vec!["{", "  \"name\": \"Ada\",", "  \"age\": 36", "}"]);
        assert_eq!(lines[1].spans.iter().find(|s| s.content == "\"name\"").unwrap().style.fg, Some(Color::Cyan));
        assert_eq!(lines[2].spans.iter().find(|s| s.content == "36").unwrap().style.fg, Some(Color::Yellow));
    }
}
