// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Defines the areas of the application's user interface.
///
/// This struct holds `Rect` objects, each representing a specific
/// widget area on the terminal screen.
pub struct AppLayout {
    pub input: Rect,
    pub status: Rect,
    pub report: Rect,
    pub score: Rect,
    pub history: Rect,
    pub footer: Rect,
}

/// Creates the complete application layout.
///
/// Vertically: input box, a one-line status row, the content area and the
/// footer. The content area is split into the report (left) and a side column
/// (right) holding the score card and, when toggled on, the history panel.
///
/// # Arguments
/// * `frame_size` - The `Rect` representing the total size of the terminal frame.
/// * `show_history` - Whether the history panel takes part of the side column.
pub fn create_layout(frame_size: Rect, show_history: bool) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[2]);

    let side_constraints = if show_history {
        vec![Constraint::Length(12), Constraint::Min(0)]
    } else {
        vec![Constraint::Min(0), Constraint::Length(0)]
    };
    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(side_constraints)
        .split(content_chunks[1]);

    AppLayout {
        input: main_chunks[0],
        status: main_chunks[1],
        report: content_chunks[0],
        score: side_chunks[0],
        history: if show_history { side_chunks[1] } else { Rect::default() },
        footer: main_chunks[3],
    }
}
