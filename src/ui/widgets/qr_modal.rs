//! QR presentation modal.
//!
//! The artifact is a server-rasterized image; a terminal cell grid cannot
//! display it directly, so the modal presents the artifact metadata and the
//! transient file it is bound to, plus the save affordance.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::domain::QrArtifact;

use super::centered_rect;

/// Render the QR artifact modal, centered over the whole UI.
pub fn render_qr_modal(frame: &mut Frame, artifact: &QrArtifact) {
    let popup_area = centered_rect(60, 40, frame.area());
    frame.render_widget(Clear, popup_area);

    let path = artifact
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(released)".to_string());

    let lines = vec![
        Line::from(vec![
            Span::raw("Lot: "),
            Span::styled(
                artifact.lot_id.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Type: ", Style::default().fg(Color::DarkGray)),
            Span::raw(artifact.content_type.clone()),
            Span::styled("   Size: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} bytes", artifact.byte_len)),
        ]),
        Line::from(vec![
            Span::styled("File: ", Style::default().fg(Color::DarkGray)),
            Span::raw(path),
        ]),
        Line::raw(""),
        Line::styled(
            "The image file above is removed when this dialog closes.",
            Style::default().fg(Color::DarkGray),
        ),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[s]", Style::default().fg(Color::Yellow)),
            Span::raw(" Save copy   "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Close"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" QR CODE ")
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
