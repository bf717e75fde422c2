//! restview - terminal API tester
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async request dispatch

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use restview::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use restview::messages::ui_events::{key_to_ui_event, InputMode, Panel};
use restview::messages::{NetworkCommand, NetworkResponse, RenderState, ResponseView, UiEvent};
use restview::ui::{
    cursor_coords, highlight_json, method_color, render_view_tabs, status_color, truncate_cell,
    MAX_CELL_WIDTH,
};
use restview::view::{Card, RenderedView, TableView, CARD_MAX_FIELDS};
use restview::{AppActor, InFlight, NetworkActor, ReqwestTransport};

/// Cards drawn side by side
const CARDS_PER_ROW: usize = 3;

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!("{} {} starting", APP_NAME, APP_VERSION);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    let in_flight = InFlight::new();

    // Spawn network actor
    let network_actor = NetworkActor::new(Arc::new(ReqwestTransport::new()), in_flight.clone(), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx, in_flight);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("{} exiting", APP_NAME);
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.overlays,
                ) {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Method + URL
            Constraint::Length(8), // Headers + Body
            Constraint::Length(1), // Validation error
            Constraint::Min(5),    // Response
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, chunks[0]);
    draw_url_bar(f, state, chunks[1]);
    draw_editors(f, state, chunks[2]);
    draw_error_line(f, state, chunks[3]);
    draw_response(f, state, chunks[4]);
    draw_status_bar(f, state, chunks[5]);

    if state.is_loading {
        draw_loading_popup(f, area);
    }
    if state.overlays.help {
        draw_help_popup(f, area);
    }
    if state.overlays.import {
        draw_import_popup(f, state, area);
    }
    if let Some(notice) = &state.notice {
        draw_notice_popup(f, notice, area);
    }
}

fn draw_title_bar(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        " API Tester ",
        Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn focus_style(state: &RenderState, panel: Panel) -> Style {
    let is_focused = state.active_panel == panel;
    if is_focused && state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn place_cursor(f: &mut Frame, state: &RenderState, panel: Panel, text: &str, area: Rect) {
    if state.active_panel != panel || state.input_mode != InputMode::Editing {
        return;
    }
    let (col, row) = cursor_coords(text, state.cursor_position);
    let max_x = area.x + area.width.saturating_sub(2);
    let max_y = area.y + area.height.saturating_sub(2);
    let cursor_x = (area.x + col + 1).min(max_x);
    let cursor_y = (area.y + row + 1).min(max_y);
    f.set_cursor_position(Position::new(cursor_x, cursor_y));
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mcolor = method_color(state.method.as_str());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, Panel::Url))
        .title(format!(" {} ", state.method.as_str()))
        .title_style(Style::default().fg(mcolor).bold());

    let text = if state.url.is_empty() && state.input_mode == InputMode::Normal {
        Paragraph::new("https://api.example.com").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(state.url.as_str())
    };
    f.render_widget(text.block(block), area);

    place_cursor(f, state, Panel::Url, &state.url, area);
}

fn draw_editors(f: &mut Frame, state: &RenderState, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let headers = Paragraph::new(state.headers.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(state, Panel::Headers))
                .title(" Headers (JSON) "),
        );
    f.render_widget(headers, halves[0]);
    place_cursor(f, state, Panel::Headers, &state.headers, halves[0]);

    let (title, content) = if state.method.has_body() {
        (" Body (JSON) ", state.body.as_str())
    } else {
        (" Body (disabled for GET/DELETE) ", "")
    };
    let body = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(state, Panel::Body))
            .title(title),
    );
    f.render_widget(body, halves[1]);
    if state.method.has_body() {
        place_cursor(f, state, Panel::Body, &state.body, halves[1]);
    }
}

fn draw_error_line(f: &mut Frame, state: &RenderState, area: Rect) {
    if let Some(message) = &state.error_message {
        let line = Paragraph::new(format!(" ✗ {}", message))
            .style(Style::default().fg(Color::Red).bold());
        f.render_widget(line, area);
    }
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let border_style = focus_style(state, Panel::Response);

    let Some(response) = &state.response else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Response ");
        let help = Paragraph::new(QUICK_REFERENCE)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(help, area);
        return;
    };

    let mut title = vec![Span::styled(
        format!(" Status: {} ", response.status),
        Style::default().fg(status_color(response.status)).bold(),
    )];
    if !response.success {
        title.push(Span::styled(" request failed ", Style::default().fg(Color::Red)));
    }

    let footer = if response.success {
        format!(" {} headers | {}ms ", response.header_count, response.time_ms)
    } else {
        format!(" {}ms ", response.time_ms)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title))
        .title_bottom(Line::from(footer).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let content_area = if response.legal_views.len() > 1 {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);
        f.render_widget(render_view_tabs(&response.legal_views, response.view), parts[0]);
        parts[1]
    } else {
        inner
    };

    draw_rendered_view(f, response, state.response_scroll, content_area);
}

fn draw_rendered_view(f: &mut Frame, response: &ResponseView, scroll: u16, area: Rect) {
    match &response.rendered {
        RenderedView::Raw(text) => {
            let raw = Paragraph::new(highlight_json(text))
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0));
            f.render_widget(raw, area);
        }
        RenderedView::Table(table) => draw_table(f, table, scroll, area),
        RenderedView::Cards(cards) => draw_cards(f, cards, scroll, area),
    }
}

fn draw_table(f: &mut Frame, table: &TableView, scroll: u16, area: Rect) {
    if table.columns.is_empty() {
        f.render_widget(Paragraph::new("(no rows)").style(Style::default().fg(Color::DarkGray)), area);
        return;
    }

    let header = Row::new(
        table
            .columns
            .iter()
            .map(|c| Cell::from(truncate_cell(c, MAX_CELL_WIDTH))),
    )
    .style(Style::default().fg(Color::Cyan).bold());

    let rows = table.rows.iter().skip(scroll as usize).enumerate().map(|(i, row)| {
        let style = if i % 2 == 0 {
            Style::default()
        } else {
            Style::default().fg(Color::Gray)
        };
        Row::new(row.iter().map(|cell| Cell::from(truncate_cell(cell.as_str(), MAX_CELL_WIDTH)))).style(style)
    });

    let count = table.columns.len() as u32;
    let widths = vec![Constraint::Ratio(1, count); table.columns.len()];
    f.render_widget(Table::new(rows, widths).header(header).column_spacing(1), area);
}

fn draw_cards(f: &mut Frame, cards: &[Card], scroll: u16, area: Rect) {
    if cards.is_empty() {
        f.render_widget(Paragraph::new("(no items)").style(Style::default().fg(Color::DarkGray)), area);
        return;
    }

    let card_height = CARD_MAX_FIELDS as u16 + 2;
    let visible_rows = (area.height / card_height).max(1) as usize;

    let card_rows: Vec<&[Card]> = cards.chunks(CARDS_PER_ROW).skip(scroll as usize).take(visible_rows).collect();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(card_height); card_rows.len()])
        .split(area);

    for (row, row_area) in card_rows.iter().zip(row_areas.iter()) {
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, CARDS_PER_ROW as u32); CARDS_PER_ROW])
            .split(*row_area);

        for (card, card_area) in row.iter().zip(col_areas.iter()) {
            let lines: Vec<Line> = card
                .fields
                .iter()
                .map(|(key, value)| {
                    Line::from(vec![
                        Span::styled(format!("{}: ", key), Style::default().bold()),
                        Span::styled(value.clone(), Style::default().fg(Color::Green)),
                    ])
                })
                .collect();
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", card.title));
            f.render_widget(Paragraph::new(lines).block(block), *card_area);
        }
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        " Sending request... "
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Enter:send (URL) / newline (JSON) "
    } else {
        " Tab:panel | e:edit | m:method | s:send | v:view | x:export | i:import | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

const QUICK_REFERENCE: &str = r#"Quick Reference:
────────────────────────────
  e     Edit field
  m     Change method
  s     Send request
  v     Switch view (table/cards for lists)
  x     Export request
  i     Import request
  ?     Full help
  q     Quit
────────────────────────────"#;

fn draw_loading_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(30, 15, area);
    let popup = Paragraph::new("\n⏳ Waiting for response...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).style(Style::default().bg(Color::Black)));
    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 API TESTER - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels (URL, Headers, Body, Response)
   ↑ / ↓              Scroll response

 REQUEST
   m                  Cycle HTTP method (GET/POST/PUT/DELETE)
   e / Enter          Edit current field
   s                  Send request
   Enter (URL edit)   Send request

 RESPONSE
   v                  Cycle view: Raw JSON / Table / Cards
                      (table and cards need a list of objects)

 FILES
   x                  Export request to api-request.json
   i                  Import request from a file

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_import_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Import Request (Enter to load, Esc to cancel) ")
        .style(Style::default().bg(Color::Black));

    let content = if state.import_path_input.is_empty() {
        "Enter path to a request file...\n\nExample: ~/Downloads/api-request.json"
    } else {
        state.import_path_input.as_str()
    };

    let input = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(input, popup_area);
}

fn draw_notice_popup(f: &mut Frame, notice: &str, area: Rect) {
    let popup_area = centered_rect(60, 25, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Notice (press any key) ")
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(notice)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(text, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
