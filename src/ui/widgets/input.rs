// src/ui/widgets/input.rs
use ratatui::{prelude::*, widgets::{Block, Borders, Paragraph}};
use crate::app::{App, AppState, ExportStatus};

/// Renders the input box widget.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_block = Block::default().borders(Borders::ALL).title("Target Domain or URL");
    let input_paragraph = Paragraph::new(app.input.as_str())
        .block(input_block)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(input_paragraph, area);

    // Show the cursor only when in the Idle state.
    if let AppState::Idle = app.state {
        frame.set_cursor_position((
            area.x + app.input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

/// Renders the one-line status row: fetch errors first, then export results.
pub fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = &app.error {
        Line::from(vec![
            Span::styled(" ✗ ", Style::default().fg(Color::Red).bold()),
            Span::styled(error.as_str(), Style::default().fg(Color::Red)),
        ])
    } else {
        match &app.export_status {
            ExportStatus::Idle => Line::from(""),
            ExportStatus::Success(path) => Line::from(vec![
                Span::styled(" ✓ ", Style::default().fg(Color::Green).bold()),
                Span::raw(format!("Report exported to {}", path)),
            ]),
            ExportStatus::Error(e) => Line::from(vec![
                Span::styled(" ✗ ", Style::default().fg(Color::Red).bold()),
                Span::raw(format!("Export failed: {}", e)),
            ]),
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
