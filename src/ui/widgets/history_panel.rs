// src/ui/widgets/history_panel.rs

use crate::app::{App, Focus};
use crate::ui::widgets::summary::risk_color;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Renders the list of recent scans, newest first.
pub fn render_history_panel(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_style = if app.focus == Focus::History {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Recent Scans");

    if app.history.is_empty() {
        let empty = Paragraph::new("No scans yet.")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .history
        .iter()
        .map(|report| {
            ListItem::new(vec![
                Line::from(report.url.as_str()),
                Line::from(vec![
                    Span::styled(
                        format!("{}/{} ", report.total_score, report.max_total_score),
                        Style::default().fg(risk_color(report.risk_level)).bold(),
                    ),
                    Span::styled(
                        report.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, area, &mut app.history_list_state);
}
