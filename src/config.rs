// src/config.rs

use crate::cli::GlobalArgs;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;

pub const HISTORY_FILE: &str = "scan_history.json";

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "websentinel", env!("CARGO_PKG_NAME"))
}

/// Per-user data directory, or `./.data` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn default_user_agent() -> String {
    format!("WebSentinel/{}", env!("CARGO_PKG_VERSION"))
}

/// Runtime settings, resolved once from flags and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub request_timeout: Duration,
    pub user_agent: String,
    pub data_dir: PathBuf,
}

impl Settings {
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self {
            request_timeout: Duration::from_secs(args.timeout.max(1)),
            user_agent: args.user_agent.clone().unwrap_or_else(default_user_agent),
            data_dir: args.data_dir.clone().unwrap_or_else(default_data_dir),
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }
}
