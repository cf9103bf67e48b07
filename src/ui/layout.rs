//! Main layout orchestration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ TRACECHAIN v0.1.0            ⚠ notice            [?]Help [Q]uit │
//! ├──────────────────────────┬──────────────────────────────────────┤
//! │  SEARCH                  │  LOT ID input                        │
//! │  query input             │  summary + badge + metrics           │
//! │  results table           │  event chain (cards)                 │
//! ├──────────────────────────┴──────────────────────────────────────┤
//! │  [Tab] Focus  [Enter] Load/Expand  [e] Seed  [o] QR  [c] Copy   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::App;

use super::{detail_panel, search_panel, widgets};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Footer (keybinds)
        ])
        .split(size);

    render_header(frame, main_chunks[0], app);
    render_body(frame, main_chunks[1], app);
    render_footer(frame, main_chunks[2]);

    if let Some(artifact) = &app.qr {
        widgets::render_qr_modal(frame, artifact);
    }
    if app.help_open {
        widgets::render_help_overlay(frame);
    }
}

/// Render the header bar with title, notice area, and hints.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = vec![
        Span::styled(
            " TRACECHAIN ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("v0.1.0", Style::default().fg(Color::DarkGray)),
    ];

    let status = if let Some(notice) = &app.notice {
        Span::styled(format!(" ⚠ {notice} "), Style::default().fg(Color::Red))
    } else if app.copied_label_active() {
        Span::styled(" Copied! ", Style::default().fg(Color::Green))
    } else if app.seeding {
        Span::styled(" Seeding... ", Style::default().fg(Color::Yellow))
    } else if app.detail.is_loading() {
        Span::styled(" Loading... ", Style::default().fg(Color::Yellow))
    } else if app.qr_loading {
        Span::styled(" Fetching QR... ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw(" ")
    };

    let hints = vec![
        Span::styled("[?]", Style::default().fg(Color::Yellow)),
        Span::raw("Help "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit "),
    ];

    let title_len: usize = title.iter().map(|s| s.content.len()).sum();
    let status_len = status.content.chars().count();
    let hints_len: usize = hints.iter().map(|s| s.content.len()).sum();
    let padding = area
        .width
        .saturating_sub((title_len + status_len + hints_len) as u16);

    let mut spans = title;
    spans.push(status);
    spans.push(Span::raw(" ".repeat(padding as usize)));
    spans.extend(hints);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Render the main body (search panel + lot detail panel).
fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(46), // Search + results
            Constraint::Min(50),    // Lot detail
        ])
        .split(area);

    search_panel::render(frame, body_chunks[0], app);
    detail_panel::render(frame, body_chunks[1], app);
}

/// Render the footer with keyboard shortcuts.
fn render_footer(frame: &mut Frame, area: Rect) {
    let keybinds = vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Focus  "),
        Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" Load/Expand  "),
        Span::styled("[←→]", Style::default().fg(Color::Yellow)),
        Span::raw(" Page  "),
        Span::styled("[e]", Style::default().fg(Color::Yellow)),
        Span::raw(" Seed  "),
        Span::styled("[E]", Style::default().fg(Color::Yellow)),
        Span::raw(" Seed Many  "),
        Span::styled("[o]", Style::default().fg(Color::Yellow)),
        Span::raw(" QR  "),
        Span::styled("[c/p]", Style::default().fg(Color::Yellow)),
        Span::raw(" Copy Hash  "),
    ];

    let footer = Paragraph::new(Line::from(keybinds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .centered();

    frame.render_widget(footer, area);
}

/// Border style shared by the focusable panes.
pub(super) fn pane_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
