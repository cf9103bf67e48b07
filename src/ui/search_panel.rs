//! Search panel: query input plus the paginated results table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::domain::{App, Focus, VerifyBadge};

use super::layout::pane_border;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(5),    // Results
        ])
        .split(area);

    render_query_input(frame, chunks[0], app);
    render_results(frame, chunks[1], app);
}

fn render_query_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::SearchInput;
    let cursor = if focused { "▏" } else { "" };

    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.search.query.as_str()),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(" SEARCH ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(pane_border(focused)),
    );

    frame.render_widget(input, area);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Results;
    let title = if app.search.loading {
        format!(" LOTS • page {} • fetching... ", app.search.page)
    } else {
        format!(" LOTS • page {} ", app.search.page)
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(pane_border(focused));

    if app.search.is_empty() {
        let empty = Paragraph::new(vec![
            Line::raw(""),
            Line::styled(
                "  No lots found.",
                Style::default().fg(Color::DarkGray),
            ),
            Line::styled(
                "  Press [e] to seed demo data.",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["LOT", "CROP", "HARVEST", "EV", "✓"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .search
        .rows
        .iter()
        .map(|item| {
            let badge = VerifyBadge::from_flag(item.verified);
            let badge_cell = match badge {
                VerifyBadge::Verified => {
                    Cell::from("✓").style(Style::default().fg(Color::Green))
                }
                VerifyBadge::Tampered => Cell::from("✗").style(Style::default().fg(Color::Red)),
            };
            Row::new(vec![
                Cell::from(item.lot_id.clone()),
                Cell::from(item.crop.clone()),
                Cell::from(item.harvest_date.clone()),
                Cell::from(item.total_events.to_string()),
                badge_cell,
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(3),
            Constraint::Length(1),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .block(block);

    let mut state = TableState::default();
    if !app.search.rows.is_empty() {
        state.select(Some(app.search.selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
