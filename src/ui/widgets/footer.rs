// src/ui/widgets/footer.rs

use crate::app::{App, AppState, Focus};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let history_focused = app.focus == Focus::History && !matches!(app.state, AppState::Scanning);
    let spans = match app.state {
        _ if history_focused => Line::from(vec![
            key("[↑↓]"),
            Span::raw(" Select, "),
            key("[Enter]"),
            Span::raw(" Open, "),
            key("[C]"),
            Span::raw("lear, "),
            key("[Tab]"),
            Span::raw(" Close"),
        ]),
        AppState::Idle => Line::from(vec![
            Span::raw("Press "),
            key("Enter"),
            Span::raw(" to scan, "),
            key("Tab"),
            Span::raw(" for history, "),
            key("Esc"),
            Span::raw(" to quit."),
        ]),
        AppState::Finished => Line::from(vec![
            key("[N]"),
            Span::raw("ew Scan, "),
            key("[R]"),
            Span::raw("escan, "),
            key("[J]"),
            Span::raw("SON, "),
            key("[E]"),
            Span::raw("xport, "),
            key("[H]"),
            Span::raw("istory, "),
            key("[Q]"),
            Span::raw("uit"),
        ]),
        AppState::Scanning => Line::from("Scanning... Press Esc to quit."),
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
