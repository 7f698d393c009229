// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    text::Line,
};
use chrono::Local;
use websentinel::core::knowledge_base::opportunities;
use websentinel::core::models::RiskLevel;

pub fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

/// Renders the score card: hardening score, an animated gauge, capture time,
/// the risk classification, a count of families per status and the first few
/// hardening opportunities.
///
/// Nothing but the frame is drawn until a report is available.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Hardening Score");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Score
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Captured at
            Constraint::Length(4), // Risk label & description
            Constraint::Length(4), // Status breakdown
            Constraint::Min(0),    // Hardening opportunities
        ])
        .split(area);

    let report = match (&app.state, &app.scan_report) {
        (AppState::Finished, Some(report)) => report,
        _ => return,
    };

    // --- Score ---
    let color = risk_color(report.risk_level);
    let score_line = Line::from(vec![
        Span::styled(app.displayed_score.to_string(), Style::default().fg(color).bold()),
        Span::styled(format!(" / {}", report.max_total_score), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(
        Paragraph::new(vec![Line::from("Overall Score".bold()), score_line]).alignment(Alignment::Center),
        summary_chunks[0],
    );

    // --- Gauge (animated by on_tick) ---
    let percent = u16::from(app.displayed_score) * 100 / u16::from(report.max_total_score.max(1));
    let score_gauge = Gauge::default()
        .percent(percent.min(100))
        .label("")
        .style(Style::default().fg(color));
    frame.render_widget(score_gauge, summary_chunks[1]);

    let captured = report.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
    frame.render_widget(
        Paragraph::new(Line::from(format!("Captured at {}", captured)).fg(Color::DarkGray))
            .alignment(Alignment::Center),
        summary_chunks[2],
    );

    // --- Risk ---
    let risk_text = Text::from(vec![
        Line::from(Span::styled(report.risk_label.to_uppercase(), Style::default().fg(color).bold())),
        Line::from(report.risk_description.as_str()),
    ]);
    frame.render_widget(
        Paragraph::new(risk_text).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        summary_chunks[3],
    );

    // --- Status breakdown ---
    let (secure, weak, missing) = report.status_counts();
    let breakdown = Text::from(vec![
        Line::from(vec![Span::raw("Secure:  "), Span::styled(secure.to_string(), Style::default().fg(Color::Green))]),
        Line::from(vec![Span::raw("Weak:    "), Span::styled(weak.to_string(), Style::default().fg(Color::Yellow))]),
        Line::from(vec![Span::raw("Missing: "), Span::styled(missing.to_string(), Style::default().fg(Color::Red))]),
    ]);
    frame.render_widget(
        Paragraph::new(breakdown).block(Block::default().title("HEADERS".bold())),
        summary_chunks[4],
    );

    // --- Hardening opportunities ---
    let fixes = report.hardening_opportunities(opportunities::LIMIT);
    let mut lines: Vec<Line> = Vec::new();
    if fixes.is_empty() {
        lines.push(Line::from(opportunities::NONE.green().italic()));
    }
    for (family, analysis) in fixes {
        lines.push(Line::from(Span::styled(family.to_string(), Style::default().bold())));
        lines.push(Line::from(Span::styled(
            format!("  {}", analysis.recommendation),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP).title(Span::styled(opportunities::TITLE.to_uppercase(), Style::default().bold()))),
        summary_chunks[5],
    );
}
