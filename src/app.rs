// src/app.rs

use ratatui::widgets::{ListState, ScrollbarState};
use strum::IntoEnumIterator;
use websentinel::core::export::export_report;
use websentinel::core::history::HistoryStore;
use websentinel::core::models::{HeaderFamily, SecurityReport};
use std::path::PathBuf;

pub const SPINNER_CHARS: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

pub enum ExportStatus {
    Idle,
    Success(String),
    Error(String),
}

pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

/// Which panel owns the arrow keys while a report is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Headers,
    History,
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub input: String,
    pub scan_report: Option<SecurityReport>,
    pub error: Option<String>,
    pub families: Vec<HeaderFamily>,
    pub header_list_state: ListState,
    pub show_json: bool,
    pub json_scroll: u16,
    pub json_scroll_state: ScrollbarState,
    pub show_history: bool,
    pub history: Vec<SecurityReport>,
    pub history_list_state: ListState,
    pub focus: Focus,
    pub spinner_frame: usize,
    pub displayed_score: u8,
    pub export_status: ExportStatus,
    pub export_dir: PathBuf,
}

impl App {
    pub fn new(history: Vec<SecurityReport>, export_dir: PathBuf) -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            input: String::new(),
            scan_report: None,
            error: None,
            families: HeaderFamily::iter().collect(),
            header_list_state: ListState::default(),
            show_json: false,
            json_scroll: 0,
            json_scroll_state: ScrollbarState::default(),
            show_history: false,
            history,
            history_list_state: ListState::default(),
            focus: Focus::Headers,
            spinner_frame: 0,
            displayed_score: 0,
            export_status: ExportStatus::Idle,
            export_dir,
        }
    }

    pub fn selected_family(&self) -> Option<HeaderFamily> {
        self.header_list_state
            .selected()
            .and_then(|i| self.families.get(i).copied())
    }

    /// Enters Scanning for `target`, keeping it in the input box.
    pub fn begin_scan(&mut self, target: &str) {
        self.input = target.to_string();
        self.state = AppState::Scanning;
        self.error = None;
        self.show_json = false;
        self.export_status = ExportStatus::Idle;
    }

    /// The url of the report on screen, to scan it again.
    pub fn rescan_target(&self) -> Option<String> {
        self.scan_report.as_ref().map(|report| report.url.clone())
    }

    /// Shows a finished report and starts the score count-up from zero.
    pub fn show_report(&mut self, report: SecurityReport) {
        self.scan_report = Some(report);
        self.error = None;
        self.state = AppState::Finished;
        self.displayed_score = 0;
        self.json_scroll = 0;
        self.json_scroll_state = ScrollbarState::default();
        self.header_list_state.select(Some(0));
        self.export_status = ExportStatus::Idle;
    }

    /// A failed fetch returns to input with the message; no report is kept.
    pub fn show_error(&mut self, message: String) {
        self.scan_report = None;
        self.error = Some(message);
        self.state = AppState::Idle;
    }

    /// Records a successful scan and refreshes the in-memory history list.
    pub fn record(&mut self, store: &dyn HistoryStore, report: &SecurityReport) {
        if let Err(e) = store.save(report) {
            tracing::warn!(error = %e, "Could not save report to history.");
        }
        self.history = store.load();
    }

    pub fn clear_history(&mut self, store: &dyn HistoryStore) {
        match store.clear() {
            Ok(()) => {
                self.history.clear();
                self.history_list_state.select(None);
            }
            Err(e) => tracing::warn!(error = %e, "Could not clear history."),
        }
    }

    pub fn open_selected_history(&mut self) {
        let selected = self
            .history_list_state
            .selected()
            .and_then(|i| self.history.get(i).cloned());
        if let Some(report) = selected {
            self.input = report.url.clone();
            self.show_report(report);
            self.show_history = false;
            self.focus = Focus::Headers;
        }
    }

    pub fn export_current(&mut self) {
        if let Some(report) = &self.scan_report {
            self.export_status = match export_report(report, &self.export_dir) {
                Ok(path) => ExportStatus::Success(path.display().to_string()),
                Err(e) => ExportStatus::Error(e.to_string()),
            };
        }
    }

    pub fn toggle_json(&mut self) {
        self.show_json = !self.show_json;
        self.json_scroll = 0;
        self.json_scroll_state = ScrollbarState::default();
    }

    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
        self.focus = if self.show_history && !self.history.is_empty() {
            if self.history_list_state.selected().is_none() {
                self.history_list_state.select(Some(0));
            }
            Focus::History
        } else {
            Focus::Headers
        };
    }

    pub fn scroll_up(&mut self) {
        if self.show_json && self.focus == Focus::Headers {
            self.json_scroll = self.json_scroll.saturating_sub(1);
            self.json_scroll_state = self.json_scroll_state.position(self.json_scroll as usize);
            return;
        }
        let (state, len) = self.focused_list();
        select_step(state, len, -1);
    }

    pub fn scroll_down(&mut self) {
        if self.show_json && self.focus == Focus::Headers {
            self.json_scroll = self.json_scroll.saturating_add(1);
            self.json_scroll_state = self.json_scroll_state.position(self.json_scroll as usize);
            return;
        }
        let (state, len) = self.focused_list();
        select_step(state, len, 1);
    }

    fn focused_list(&mut self) -> (&mut ListState, usize) {
        match self.focus {
            Focus::Headers => (&mut self.header_list_state, self.families.len()),
            Focus::History => (&mut self.history_list_state, self.history.len()),
        }
    }

    pub fn on_tick(&mut self) {
        if let AppState::Scanning = self.state {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
        if let Some(report) = &self.scan_report {
            if self.displayed_score < report.total_score {
                self.displayed_score += 1;
            }
        }
    }

    pub fn quit(&mut self) { self.should_quit = true; }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.scan_report = None;
        self.error = None;
        self.header_list_state = ListState::default();
        self.show_json = false;
        self.json_scroll = 0;
        self.json_scroll_state = ScrollbarState::default();
        self.show_history = false;
        self.focus = Focus::Headers;
        self.displayed_score = 0;
        self.export_status = ExportStatus::Idle;
    }
}

fn select_step(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    state.select(Some(next as usize));
}
