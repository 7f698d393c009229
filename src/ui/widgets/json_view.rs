// src/ui/widgets/json_view.rs

use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation},
};

/// Renders the current report as pretty-printed JSON, scrollable with ↑ ↓.
pub fn render_json_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title("JSON Report (scroll with ↑ ↓, [J] to close)")
        .borders(Borders::ALL);

    let json = match &app.scan_report {
        Some(report) => serde_json::to_string_pretty(report)
            .unwrap_or_else(|e| format!("Could not render report: {}", e)),
        None => String::from("No report yet."),
    };

    let lines: Vec<Line> = json
        .lines()
        .map(|line| match line.split_once(": ") {
            Some((key, value)) => Line::from(vec![
                Span::styled(key.to_string(), Style::default().fg(Color::Cyan)),
                Span::raw(": "),
                Span::styled(value.to_string(), Style::default().fg(Color::Yellow)),
            ]),
            None => Line::from(line.to_string()),
        })
        .collect();

    app.json_scroll_state = app.json_scroll_state.content_length(lines.len());

    let inner_area = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines).scroll((app.json_scroll, 0)), inner_area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
    frame.render_stateful_widget(scrollbar, inner_area, &mut app.json_scroll_state);
}
