// src/core/export.rs

use crate::core::error::StorageError;
use crate::core::models::SecurityReport;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name used for an exported report: `scan-<capture time in unix millis>.json`.
pub fn export_file_name(report: &SecurityReport) -> String {
    format!("scan-{}.json", report.timestamp.timestamp_millis())
}

/// Writes `report` as pretty-printed JSON into `dir`, creating the directory if needed.
///
/// # Returns
/// The path of the written file.
pub fn export_report(report: &SecurityReport, dir: &Path) -> Result<PathBuf, StorageError> {
    std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
    let path = dir.join(export_file_name(report));
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json).map_err(|e| StorageError::io(&path, e))?;
    info!(url = %report.url, path = %path.display(), "Report exported.");
    Ok(path)
}
