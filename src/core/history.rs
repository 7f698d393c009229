// src/core/history.rs

//! Persistence of recent reports.
//!
//! The analyzer knows nothing about storage; callers save through the small
//! `HistoryStore` capability. At most `HISTORY_LIMIT` reports are kept, one per
//! `url`, newest first.

use crate::core::error::StorageError;
use crate::core::models::SecurityReport;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info, warn};

pub const HISTORY_LIMIT: usize = 10;

pub trait HistoryStore {
    /// Stored reports, newest first. Unreadable data yields an empty list.
    fn load(&self) -> Vec<SecurityReport>;
    /// Records a report, replacing any earlier scan of the same `url`.
    fn save(&self, report: &SecurityReport) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Puts `report` in front, drops any older entry for the same `url`, and trims
/// the list to `HISTORY_LIMIT`.
pub fn merge_history(history: Vec<SecurityReport>, report: &SecurityReport) -> Vec<SecurityReport> {
    std::iter::once(report.clone())
        .chain(history.into_iter().filter(|h| h.url != report.url))
        .take(HISTORY_LIMIT)
        .collect()
}

// --- JSON file store ---

/// Keeps the history as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write(&self, reports: &[SecurityReport]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(reports)?;
        std::fs::write(&self.path, json).map_err(|e| StorageError::io(&self.path, e))
    }
}

impl HistoryStore for JsonFileHistory {
    fn load(&self) -> Vec<SecurityReport> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file yet.");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read history, treating it as empty.");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<SecurityReport>>(&raw) {
            Ok(reports) => reports,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed history, treating it as empty.");
                Vec::new()
            }
        }
    }

    fn save(&self, report: &SecurityReport) -> Result<(), StorageError> {
        let merged = merge_history(self.load(), report);
        self.write(&merged)?;
        info!(url = %report.url, entries = merged.len(), "Report saved to history.");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "History cleared.");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }
}

// --- In-memory store ---

/// A history that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    reports: Mutex<Vec<SecurityReport>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    // A poisoned lock still holds a valid list.
    fn load(&self) -> Vec<SecurityReport> {
        self.reports.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, report: &SecurityReport) -> Result<(), StorageError> {
        let mut guard = self.reports.lock().unwrap_or_else(|e| e.into_inner());
        let current = std::mem::take(&mut *guard);
        *guard = merge_history(current, report);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.reports.lock().unwrap_or_else(|e| e.into_inner()).clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analyzer::analyze;
    use crate::core::models::ResponseHeaders;

    fn report(url: &str) -> SecurityReport {
        analyze(url, &ResponseHeaders::new())
    }

    #[test]
    fn merge_puts_newest_first_and_dedupes() {
        let history = vec![report("https://b.example/"), report("https://a.example/")];
        let rescan = report("https://a.example/");
        let merged = merge_history(history, &rescan);
        let urls: Vec<&str> = merged.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.example/", "https://b.example/"]);
    }

    #[test]
    fn merge_keeps_at_most_ten() {
        let history: Vec<SecurityReport> = (0..HISTORY_LIMIT)
            .map(|i| report(&format!("https://{i}.example/")))
            .collect();
        let merged = merge_history(history, &report("https://new.example/"));
        assert_eq!(merged.len(), HISTORY_LIMIT);
        assert_eq!(merged[0].url, "https://new.example/");
        assert_eq!(merged[HISTORY_LIMIT - 1].url, "https://8.example/");
    }

    #[test]
    fn memory_store_replaces_same_url() {
        let store = MemoryHistory::new();
        store.save(&report("https://a.example/")).unwrap();
        store.save(&report("https://a.example/")).unwrap();
        assert_eq!(store.load().len(), 1);
        store.clear().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn memory_store_survives_a_poisoned_lock() {
        let store = std::sync::Arc::new(MemoryHistory::new());
        store.save(&report("https://a.example/")).unwrap();

        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.reports.lock().unwrap();
            panic!("poison the history lock");
        })
        .join();

        assert!(store.reports.is_poisoned());
        assert_eq!(store.load().len(), 1);
        store.save(&report("https://b.example/")).unwrap();
        assert_eq!(store.load()[0].url, "https://b.example/");
    }
}
