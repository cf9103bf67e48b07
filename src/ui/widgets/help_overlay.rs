//! Help overlay widget.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "TRACECHAIN HELP",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::raw(""),
        Line::from(vec![Span::styled(
            "Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Tab    ", Style::default().fg(Color::Yellow)),
            Span::raw("Cycle focus: lot id → search → results → chain"),
        ]),
        Line::from(vec![
            Span::styled("  ↑/↓    ", Style::default().fg(Color::Yellow)),
            Span::raw("Move selection in results or chain"),
        ]),
        Line::from(vec![
            Span::styled("  ←/→    ", Style::default().fg(Color::Yellow)),
            Span::raw("Previous / next results page"),
        ]),
        Line::raw(""),
        Line::from(vec![Span::styled(
            "Actions",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Enter  ", Style::default().fg(Color::Yellow)),
            Span::raw("Load lot (inputs/results) or expand card (chain)"),
        ]),
        Line::from(vec![
            Span::styled("  e / E  ", Style::default().fg(Color::Yellow)),
            Span::raw("Seed one demo lot / seed a batch"),
        ]),
        Line::from(vec![
            Span::styled("  o      ", Style::default().fg(Color::Yellow)),
            Span::raw("Show QR code for the loaded lot"),
        ]),
        Line::from(vec![
            Span::styled("  c / p  ", Style::default().fg(Color::Yellow)),
            Span::raw("Copy the selected card's hash / prev hash"),
        ]),
        Line::from(vec![
            Span::styled("  r      ", Style::default().fg(Color::Yellow)),
            Span::raw("Refresh the lot listing"),
        ]),
        Line::from(vec![
            Span::styled("  q      ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit (outside text inputs)"),
        ]),
        Line::raw(""),
        Line::from(vec![Span::styled(
            "Badges",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  VERIFIED ", Style::default().fg(Color::Green)),
            Span::raw("Server-side hash chain check passed"),
        ]),
        Line::from(vec![
            Span::styled("  TAMPERED ", Style::default().fg(Color::Red)),
            Span::raw("Chain broken, or flag missing/ambiguous"),
        ]),
        Line::raw(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )]),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}
