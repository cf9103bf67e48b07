//! Lot detail panel: lot-id input, summary widgets, and the event chain.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::{App, EventCard, EventKind, Focus, LotDetailView, VerifyBadge};

use super::layout::pane_border;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Lot id input
            Constraint::Length(5), // Summary + metrics
            Constraint::Min(5),    // Event chain
        ])
        .split(area);

    render_lot_input(frame, chunks[0], app);
    render_summary(frame, chunks[1], app);
    render_chain(frame, chunks[2], app);
}

fn render_lot_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::LotInput;
    let cursor = if focused { "▏" } else { "" };

    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.input.as_str()),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(" LOT ID ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(pane_border(focused)),
    );

    frame.render_widget(input, area);
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" LOT ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    // Detail section is effectively hidden until the first successful load.
    let Some(view) = &app.detail.view else {
        let placeholder = Paragraph::new(Line::styled(
            " No lot loaded. Enter a lot id and press Enter.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let badge_style = match view.badge {
        VerifyBadge::Verified => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        VerifyBadge::Tampered => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                view.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(view.badge.label(), badge_style),
        ]),
        Line::styled(view.meta.clone(), Style::default().fg(Color::DarkGray)),
        metrics_line(view),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn metrics_line(view: &LotDetailView) -> Line<'static> {
    Line::from(vec![
        Span::raw("Quality "),
        Span::styled(
            view.quality_score.clone(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  Risk "),
        Span::styled(view.spoilage_risk.clone(), Style::default().fg(Color::Cyan)),
        Span::raw("  Temp "),
        Span::styled(
            format!("{}°C", view.latest_temperature),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  RH "),
        Span::styled(
            format!("{}%", view.latest_humidity),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  pH "),
        Span::styled(view.latest_ph.clone(), Style::default().fg(Color::Cyan)),
    ])
}

fn render_chain(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Chain;
    let block = Block::default()
        .title(" EVENT CHAIN ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(pane_border(focused));

    let Some(view) = &app.detail.view else {
        frame.render_widget(block, area);
        return;
    };

    let items: Vec<ListItem> = view
        .cards
        .iter()
        .enumerate()
        .map(|(idx, card)| card_item(card, app.expanded_cards.contains(&idx)))
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .block(block);

    let mut state = ListState::default();
    if !view.cards.is_empty() {
        state.select(Some(app.selected_card));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn kind_color(kind: EventKind) -> Color {
    match kind {
        EventKind::HarvestCreated => Color::Green,
        EventKind::SensorReading => Color::Cyan,
        EventKind::Transported => Color::Yellow,
        EventKind::Other => Color::Gray,
    }
}

fn card_item(card: &EventCard, expanded: bool) -> ListItem<'static> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                card.type_label.clone(),
                Style::default()
                    .fg(kind_color(card.kind))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(card.timestamp.clone(), Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::raw(card.highlight.clone()),
        ]),
        Line::from(vec![
            Span::styled("hash: ", Style::default().fg(Color::DarkGray)),
            Span::raw(card.hash_short.clone()),
            Span::styled("  prev: ", Style::default().fg(Color::DarkGray)),
            Span::raw(card.prev_hash_short.clone()),
        ]),
    ];

    if expanded {
        for payload_line in card.payload_pretty.lines() {
            lines.push(Line::styled(
                format!("  {payload_line}"),
                Style::default().fg(Color::Gray),
            ));
        }
        // Full hash values, retrievable on demand.
        lines.push(Line::styled(
            format!("  hash {}", card.hash),
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::styled(
            format!("  prev {}", card.prev_hash),
            Style::default().fg(Color::DarkGray),
        ));
    }

    lines.push(Line::raw(""));
    ListItem::new(lines)
}
