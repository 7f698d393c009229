// src/core/scanner/mod.rs

// Glue between the network and the analyzer: resolve the target, fetch its
// headers, hand them to `analyze`.
pub mod headers_fetcher;

use crate::core::analyzer::analyze;
use crate::core::error::FetchError;
use crate::core::models::SecurityReport;
use self::headers_fetcher::{fetch_headers, normalize_target};
use tracing::info;

/// Fetches the headers of `target` and analyzes them.
///
/// The report's `url` is the normalized target (scheme added if it was
/// omitted), so repeated scans of "example.com" and "https://example.com/"
/// share one history entry.
///
/// # Arguments
/// * `client` - A configured HTTP client (see `headers_fetcher::build_client`).
/// * `target` - A domain or URL as typed by the user.
///
/// # Returns
/// The finished `SecurityReport`, or the fetch error to show verbatim.
pub async fn run_scan(client: &reqwest::Client, target: &str) -> Result<SecurityReport, FetchError> {
    let url = normalize_target(target)?;
    let headers = fetch_headers(client, &url).await?;
    let report = analyze(url.as_str(), &headers);
    info!(
        url = %report.url,
        score = report.total_score,
        risk = %report.risk_level,
        "Scan finished."
    );
    Ok(report)
}
