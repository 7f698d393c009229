// src/cli.rs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "websentinel", version, about = "HTTP security header analyzer")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Domain or URL to scan as soon as the terminal UI opens.
    pub target: Option<String>,

    /// Without a subcommand the interactive terminal UI starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args, Clone)]
pub struct GlobalArgs {
    /// Request timeout in seconds.
    #[arg(long, global = true, env = "WEBSENTINEL_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Directory holding the history file and the log.
    #[arg(long, global = true, env = "WEBSENTINEL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// User-Agent sent with every request.
    #[arg(long, global = true, env = "WEBSENTINEL_USER_AGENT")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a domain or URL and print the report.
    Scan {
        target: String,
        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
        /// Do not record the scan in the history.
        #[arg(long)]
        no_history: bool,
    },
    /// Show or clear the recent scans.
    History {
        #[arg(long)]
        json: bool,
        #[arg(long, conflicts_with = "json")]
        clear: bool,
    },
    /// Write a stored report to a JSON file.
    Export {
        /// URL of the stored report, as shown by `history`.
        url: String,
        /// Output directory. Defaults to the current directory.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn scan_flags_parse() {
        let cli = Cli::parse_from(["websentinel", "scan", "example.com", "--json", "--timeout", "3"]);
        assert_eq!(cli.global.timeout, 3);
        match cli.command {
            Some(Command::Scan { target, json, no_history }) => {
                assert_eq!(target, "example.com");
                assert!(json);
                assert!(!no_history);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.target, None);
    }

    #[test]
    fn bare_target_opens_the_ui_on_it() {
        let cli = Cli::parse_from(["websentinel", "example.com"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.target.as_deref(), Some("example.com"));

        let cli = Cli::parse_from(["websentinel"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.target, None);
    }
}
