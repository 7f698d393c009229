// src/ui/mod.rs

use crate::app::App;
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area(), app.show_history);

    widgets::input::render_input(frame, app, layout.input);
    widgets::input::render_status(frame, app, layout.status);

    if app.show_json {
        widgets::json_view::render_json_view(frame, app, layout.report);
    } else {
        widgets::analysis_view::render_analysis_view(frame, app, layout.report);
    }

    widgets::summary::render_summary(frame, app, layout.score);
    if app.show_history {
        widgets::history_panel::render_history_panel(frame, app, layout.history);
    }
    widgets::footer::render_footer(frame, app, layout.footer);
}
