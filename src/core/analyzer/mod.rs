// src/core/analyzer/mod.rs

//! The header-analysis rule engine.
//!
//! `analyze` is pure apart from reading the clock for the report timestamp:
//! no I/O, no shared state, and it never fails. A header that was not sent is
//! a valid, scored input.

pub mod families;
pub mod risk;

use crate::core::models::{HeaderFamily, ResponseHeaders, SecurityReport, MAX_TOTAL_SCORE};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

use self::families::{
    evaluate_content_type_options, evaluate_cross_origin_isolation, evaluate_csp,
    evaluate_frame_options, evaluate_hsts, evaluate_permissions_policy, evaluate_referrer_policy,
};
use self::risk::{classify, CriticalSignals};

/// Evaluates the seven header families of one response and assembles the report.
///
/// # Arguments
/// * `url` - Identifier of the analyzed origin, copied into the report as-is.
/// * `headers` - The complete, case-insensitive header mapping of the response.
pub fn analyze(url: &str, headers: &ResponseHeaders) -> SecurityReport {
    debug!(url, header_count = headers.len(), "Analyzing response headers.");

    let csp = evaluate_csp(headers);
    let hsts = evaluate_hsts(headers);
    let frame_options = evaluate_frame_options(headers, csp.has_frame_ancestors);
    let content_type_options = evaluate_content_type_options(headers);

    let signals = CriticalSignals::derive(
        &hsts,
        &frame_options,
        &content_type_options,
        csp.has_frame_ancestors,
    );
    let risk = classify(&signals);

    let results = BTreeMap::from([
        (HeaderFamily::ContentSecurityPolicy, csp.analysis),
        (HeaderFamily::StrictTransportSecurity, hsts),
        (HeaderFamily::XFrameOptions, frame_options),
        (HeaderFamily::XContentTypeOptions, content_type_options),
        (HeaderFamily::ReferrerPolicy, evaluate_referrer_policy(headers)),
        (HeaderFamily::PermissionsPolicy, evaluate_permissions_policy(headers)),
        (HeaderFamily::CrossOriginIsolation, evaluate_cross_origin_isolation(headers)),
    ]);

    let raw_total: u32 = results.values().map(|a| u32::from(a.score)).sum();
    let total_score = raw_total.min(u32::from(MAX_TOTAL_SCORE)) as u8;
    debug!(url, total_score, risk = %risk.level, "Header analysis finished.");

    SecurityReport {
        url: url.to_string(),
        total_score,
        max_total_score: MAX_TOTAL_SCORE,
        risk_level: risk.level,
        risk_label: risk.label,
        risk_description: risk.description,
        headers: results,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{HeaderStatus, RiskLevel};

    #[test]
    fn empty_response_is_all_missing_and_high_risk() {
        let report = analyze("https://bare.example", &ResponseHeaders::new());
        assert_eq!(report.url, "https://bare.example");
        assert_eq!(report.headers.len(), 7);
        assert!(report.headers.values().all(|a| a.status == HeaderStatus::Missing));
        assert_eq!(report.total_score, 0);
        assert_eq!(report.max_total_score, 20);
        assert_eq!(report.risk_level, RiskLevel::High);
        assert_eq!(report.risk_label, "Attention Required");
    }

    #[test]
    fn frame_ancestors_is_passed_to_frame_options() {
        let headers: ResponseHeaders = [("Content-Security-Policy", "frame-ancestors 'self'")]
            .into_iter()
            .collect();
        let report = analyze("https://framed.example", &headers);
        let xfo = report.header(HeaderFamily::XFrameOptions).unwrap();
        assert_eq!(xfo.status, HeaderStatus::Missing);
        assert!(xfo.recommendation.contains("frame-ancestors"));
    }
}
