// src/main.rs

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{error, info};
use websentinel::cli::{Cli, Command};
use websentinel::config::Settings;
use websentinel::core::export::export_report;
use websentinel::core::knowledge_base::opportunities;
use websentinel::core::history::{HistoryStore, JsonFileHistory};
use websentinel::core::models::{HeaderFamily, SecurityReport};
use websentinel::core::scanner::headers_fetcher::{build_client, normalize_target};
use websentinel::core::scanner::run_scan;
use websentinel::logging::initialize_logging;

mod app;
mod ui;

use app::{App, AppState, Focus};

type ScanOutcome = std::result::Result<SecurityReport, String>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let settings = Settings::from_args(&cli.global);
    initialize_logging(&settings.data_dir)?;
    info!(data_dir = %settings.data_dir.display(), "Starting WebSentinel.");

    let store = JsonFileHistory::new(settings.history_path());

    match cli.command {
        None => run_tui(&settings, &store, cli.target).await,
        Some(Command::Scan { target, json, no_history }) => {
            scan_once(&settings, &store, &target, json, no_history).await
        }
        Some(Command::History { json, clear }) => show_history(&store, json, clear),
        Some(Command::Export { url, out }) => {
            let report = find_in_history(&store, &url)
                .ok_or_else(|| eyre!("No stored report for '{}'. Run `websentinel history` to list them.", url))?;
            let path = export_report(&report, &out)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

// --- Headless commands ---

async fn scan_once(
    settings: &Settings,
    store: &dyn HistoryStore,
    target: &str,
    json: bool,
    no_history: bool,
) -> Result<()> {
    let client = build_client(settings)?;
    let report = match run_scan(&client, target).await {
        Ok(report) => report,
        Err(e) => {
            error!(scan_target = target, error = %e, "Scan failed.");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if !no_history {
        store.save(&report)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SecurityReport) {
    println!("{}", report.url);
    println!(
        "Hardening score: {}/{}  {} ({})",
        report.total_score, report.max_total_score, report.risk_label, report.risk_level
    );
    println!("{}", report.risk_description);
    println!();
    for family in HeaderFamily::iter() {
        if let Some(analysis) = report.header(family) {
            println!(
                "  [{:<7}] {:<28} {}/{}  {}",
                analysis.status.to_string().to_uppercase(),
                family.to_string(),
                analysis.score,
                analysis.max_score,
                analysis.recommendation
            );
        }
    }

    println!();
    println!("{}:", opportunities::TITLE);
    let fixes = report.hardening_opportunities(opportunities::LIMIT);
    if fixes.is_empty() {
        println!("  {}", opportunities::NONE);
    }
    for (family, analysis) in fixes {
        println!("  - {}: {}", family, analysis.recommendation);
    }
}

fn show_history(store: &dyn HistoryStore, json: bool, clear: bool) -> Result<()> {
    if clear {
        store.clear()?;
        println!("History cleared.");
        return Ok(());
    }
    let history = store.load();
    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }
    if history.is_empty() {
        println!("No scans yet.");
    }
    for report in &history {
        println!(
            "{}  {:>2}/{}  {:<18} {}",
            report.timestamp.format("%Y-%m-%d %H:%M"),
            report.total_score,
            report.max_total_score,
            report.risk_label,
            report.url
        );
    }
    Ok(())
}

/// Matches the stored `url` as typed, or after the same normalization a scan applies.
fn find_in_history(store: &dyn HistoryStore, url: &str) -> Option<SecurityReport> {
    let normalized = normalize_target(url).ok().map(|u| u.to_string());
    store
        .load()
        .into_iter()
        .find(|r| r.url == url || normalized.as_deref() == Some(r.url.as_str()))
}

// --- Interactive UI ---

async fn run_tui(settings: &Settings, store: &JsonFileHistory, target: Option<String>) -> Result<()> {
    let client = build_client(settings)?;

    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let export_dir = std::env::current_dir().unwrap_or_else(|_| settings.data_dir.clone());
    let mut app = App::new(store.load(), export_dir);
    let (tx, mut rx) = mpsc::channel::<ScanOutcome>(1);
    if let Some(target) = target.filter(|t| !t.trim().is_empty()) {
        start_scan(&mut app, &tx, &client, target);
    }

    let result: Result<()> = loop {
        if app.should_quit {
            break Ok(());
        }
        if let Err(e) = terminal.draw(|frame| ui::render(&mut app, frame)) {
            break Err(e.into());
        }

        match event::poll(Duration::from_millis(100)) {
            Ok(true) => {
                if let Err(e) = handle_events(&mut app, &tx, &client, store) {
                    break Err(e);
                }
            }
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }
        app.on_tick();

        if let Ok(outcome) = rx.try_recv() {
            match outcome {
                Ok(report) => {
                    app.record(store, &report);
                    app.show_report(report);
                }
                Err(message) => app.show_error(message),
            }
        }
    };

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    result
}

fn handle_events(
    app: &mut App,
    tx: &mpsc::Sender<ScanOutcome>,
    client: &reqwest::Client,
    store: &JsonFileHistory,
) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            if app.focus == Focus::History && !matches!(app.state, AppState::Scanning) {
                handle_history_input(app, key.code, store);
                return Ok(());
            }
            match app.state {
                AppState::Idle => handle_idle_input(app, key.code, tx, client),
                AppState::Finished => handle_finished_input(app, key.code, tx, client),
                AppState::Scanning => {
                    if key.code == KeyCode::Esc { app.quit(); }
                }
            }
        }
    }
    Ok(())
}

fn handle_idle_input(
    app: &mut App,
    key_code: KeyCode,
    tx: &mpsc::Sender<ScanOutcome>,
    client: &reqwest::Client,
) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.toggle_history(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => { app.input.pop(); },
        KeyCode::Enter => {
            if app.input.trim().is_empty() { return; }
            let target = app.input.clone();
            start_scan(app, tx, client, target);
        }
        _ => {}
    }
}

/// Moves the app into Scanning and runs the scan on a background task; the
/// outcome comes back through `tx`.
fn start_scan(app: &mut App, tx: &mpsc::Sender<ScanOutcome>, client: &reqwest::Client, target: String) {
    app.begin_scan(&target);
    let tx_clone = tx.clone();
    let client = client.clone();

    tokio::spawn(async move {
        let outcome = run_scan(&client, &target).await.map_err(|e| e.to_string());
        let _ = tx_clone.send(outcome).await;
    });
}

fn handle_finished_input(
    app: &mut App,
    key_code: KeyCode,
    tx: &mpsc::Sender<ScanOutcome>,
    client: &reqwest::Client,
) {
    match key_code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Char('r') => {
            if let Some(target) = app.rescan_target() {
                start_scan(app, tx, client, target);
            }
        }
        KeyCode::Char('j') => app.toggle_json(),
        KeyCode::Char('e') => app.export_current(),
        KeyCode::Char('h') | KeyCode::Tab => app.toggle_history(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ => {}
    }
}

fn handle_history_input(app: &mut App, key_code: KeyCode, store: &JsonFileHistory) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab | KeyCode::Char('h') => app.toggle_history(),
        KeyCode::Char('c') => {
            app.clear_history(store);
            app.toggle_history();
        }
        KeyCode::Enter => app.open_selected_history(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ => {}
    }
}
