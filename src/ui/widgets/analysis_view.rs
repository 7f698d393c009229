// src/ui/widgets/analysis_view.rs

use crate::app::{App, AppState, Focus, SPINNER_CHARS};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    text::Line,
};
use websentinel::core::knowledge_base;
use websentinel::core::models::HeaderStatus;

pub fn status_badge(status: HeaderStatus) -> Span<'static> {
    let (text, color) = match status {
        HeaderStatus::Secure => ("SECURE ", Color::Green),
        HeaderStatus::Weak => ("WEAK   ", Color::Yellow),
        HeaderStatus::Missing => ("MISSING", Color::Red),
    };
    Span::styled(text, Style::default().fg(color).bold())
}

pub fn render_analysis_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Security Headers (Navigate with ↑ ↓)");

    if !matches!(app.state, AppState::Finished) {
        let content = match app.state {
            AppState::Idle => Paragraph::new("Enter a domain and press Enter to analyze its security headers.")
                .alignment(Alignment::Center),
            AppState::Scanning => {
                let spinner_char = SPINNER_CHARS[app.spinner_frame];
                Paragraph::new(
                    Line::from(vec![
                        Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
                        Span::raw("Fetching headers... Please wait."),
                    ])
                ).alignment(Alignment::Center)
            },
            AppState::Finished => Paragraph::new(""),
        };
        frame.render_widget(content.block(main_block), area);
        return;
    }

    let Some(report) = app.scan_report.as_ref() else {
        frame.render_widget(main_block, area);
        return;
    };

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(app.families.len() as u16 + 1),
            Constraint::Min(0),
        ])
        .split(inner_area);

    let items: Vec<ListItem> = app.families.iter().map(|family| {
        let line = match report.header(*family) {
            Some(analysis) => Line::from(vec![
                status_badge(analysis.status),
                Span::raw(format!("  {:<28}", family.to_string())),
                Span::styled(
                    format!("{}/{}", analysis.score, analysis.max_score),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None => Line::from(family.to_string()),
        };
        ListItem::new(line)
    }).collect();

    let highlight = if app.focus == Focus::Headers {
        Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::new()
    };
    let header_list = List::new(items).highlight_style(highlight);

    frame.render_stateful_widget(header_list, chunks[0], &mut app.header_list_state);

    let detail_block = Block::default().borders(Borders::TOP).title("Details");
    let selected = app
        .selected_family()
        .and_then(|family| report.header(family).map(|analysis| (family, analysis)));

    let text = match selected {
        Some((family, analysis)) => {
            let detail = knowledge_base::family_detail(family);
            vec![
                Line::from(vec![
                    Span::styled(family.to_string(), Style::default().bold()),
                    Span::styled(format!("  [{}]", detail.category), Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(""),
                Line::from("OBSERVED VALUE:".yellow().bold()),
                Line::from(analysis.value.clone().unwrap_or_else(|| "(not sent)".to_string())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("SCORE: ", Style::default().fg(Color::Yellow).bold()),
                    Span::raw(format!("{}/{}", analysis.score, analysis.max_score)),
                ]),
                Line::from(""),
                Line::from("WHAT IT IS:".yellow().bold()),
                Line::from(analysis.description.as_str()),
                Line::from(""),
                Line::from("HOW TO FIX:".yellow().bold()),
                Line::from(analysis.recommendation.as_str()),
            ]
        }
        None => vec![Line::from("Select a header above to see details.")],
    };
    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(detail_block);
    frame.render_widget(p, chunks[1]);
}
