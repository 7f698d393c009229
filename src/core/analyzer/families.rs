// src/core/analyzer/families.rs

//! One evaluator per header family. Each one is a pure function of the
//! response headers (and, for X-Frame-Options, the single cross-family signal
//! it needs) and returns a complete `HeaderAnalysis`.

use crate::core::knowledge_base as kb;
use crate::core::models::{HeaderAnalysis, HeaderFamily, HeaderStatus, ResponseHeaders};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// One year, in seconds. The minimum HSTS `max-age` considered secure.
pub const HSTS_MIN_MAX_AGE: u64 = 31_536_000;

const SAFE_REFERRER_POLICIES: &[&str] = &[
    "no-referrer",
    "same-origin",
    "strict-origin",
    "strict-origin-when-cross-origin",
];

static RE_MAX_AGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)max-age=(\d+)").unwrap());

/// The CSP outcome plus the `frame-ancestors` side signal consumed by the
/// X-Frame-Options evaluation and by risk classification.
#[derive(Debug, Clone)]
pub struct CspEvaluation {
    pub analysis: HeaderAnalysis,
    pub has_frame_ancestors: bool,
}

/// Content-Security-Policy, max 8 points.
pub fn evaluate_csp(headers: &ResponseHeaders) -> CspEvaluation {
    let family = HeaderFamily::ContentSecurityPolicy;
    let Some(csp) = headers.present("content-security-policy") else {
        debug!("CSP header missing.");
        return CspEvaluation {
            analysis: HeaderAnalysis::missing(family, kb::csp::MISSING),
            has_frame_ancestors: false,
        };
    };

    let has_frame_ancestors = csp.contains("frame-ancestors");
    let has_trusted_types = csp.contains("require-trusted-types-for");
    let core_directives = ["default-src", "script-src", "object-src"]
        .iter()
        .filter(|d| csp.contains(*d))
        .count();

    let (status, score, recommendation) = match core_directives {
        3 => (HeaderStatus::Secure, 8, kb::csp::COMPLETE),
        1 | 2 => (HeaderStatus::Weak, 5, kb::csp::PARTIAL),
        _ if has_frame_ancestors || has_trusted_types => (HeaderStatus::Weak, 2, kb::csp::NARROW),
        _ => (HeaderStatus::Weak, 2, kb::csp::FALLBACK),
    };
    debug!(%status, score, core_directives, has_frame_ancestors, "CSP evaluated.");

    CspEvaluation {
        analysis: HeaderAnalysis::observed(family, status, csp, score, recommendation),
        has_frame_ancestors,
    }
}

/// Extracts the numeric `max-age` directive. Absent means 0; values too large
/// for `u64` saturate.
pub fn parse_max_age(hsts: &str) -> u64 {
    RE_MAX_AGE
        .captures(hsts)
        .and_then(|caps| caps.get(1))
        .map(|digits| digits.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Strict-Transport-Security, max 6 points.
pub fn evaluate_hsts(headers: &ResponseHeaders) -> HeaderAnalysis {
    let family = HeaderFamily::StrictTransportSecurity;
    let Some(hsts) = headers.present("strict-transport-security") else {
        debug!("HSTS header missing.");
        return HeaderAnalysis::missing(family, kb::hsts::MISSING);
    };

    let max_age = parse_max_age(hsts);
    let has_subdomains = hsts.to_ascii_lowercase().contains("includesubdomains");
    debug!(max_age, has_subdomains, "HSTS evaluated.");

    if max_age >= HSTS_MIN_MAX_AGE {
        let recommendation = if has_subdomains {
            kb::hsts::COMPLETE
        } else {
            kb::hsts::NO_SUBDOMAINS
        };
        HeaderAnalysis::observed(family, HeaderStatus::Secure, hsts, 6, recommendation)
    } else {
        HeaderAnalysis::observed(family, HeaderStatus::Weak, hsts, 2, kb::hsts::SHORT_MAX_AGE)
    }
}

/// X-Frame-Options, max 1 point. `has_frame_ancestors` only changes the advice
/// given when the header is absent.
pub fn evaluate_frame_options(headers: &ResponseHeaders, has_frame_ancestors: bool) -> HeaderAnalysis {
    let family = HeaderFamily::XFrameOptions;
    let Some(xfo) = headers.present("x-frame-options") else {
        debug!(has_frame_ancestors, "X-Frame-Options header missing.");
        let recommendation = if has_frame_ancestors {
            kb::frame_options::MITIGATED
        } else {
            kb::frame_options::MISSING
        };
        return HeaderAnalysis::missing(family, recommendation);
    };

    let upper = xfo.to_ascii_uppercase();
    if upper.contains("DENY") || upper.contains("SAMEORIGIN") {
        HeaderAnalysis::observed(family, HeaderStatus::Secure, xfo, 1, kb::frame_options::ACTIVE)
    } else {
        debug!(value = xfo, "X-Frame-Options has no recognised directive.");
        HeaderAnalysis::observed(family, HeaderStatus::Weak, xfo, 0, kb::frame_options::INVALID)
    }
}

/// X-Content-Type-Options, max 1 point. Binary: `nosniff` or missing.
pub fn evaluate_content_type_options(headers: &ResponseHeaders) -> HeaderAnalysis {
    let family = HeaderFamily::XContentTypeOptions;
    match headers.present("x-content-type-options") {
        Some(xcto) if xcto.to_ascii_lowercase() == "nosniff" => HeaderAnalysis::observed(
            family,
            HeaderStatus::Secure,
            xcto,
            1,
            kb::content_type_options::SECURE,
        ),
        other => {
            debug!(value = ?other, "X-Content-Type-Options not set to nosniff.");
            HeaderAnalysis::missing(family, kb::content_type_options::MISSING)
        }
    }
}

/// Referrer-Policy, max 1 point. Secure if any listed policy is a safe one.
pub fn evaluate_referrer_policy(headers: &ResponseHeaders) -> HeaderAnalysis {
    let family = HeaderFamily::ReferrerPolicy;
    let Some(policy) = headers.present("referrer-policy") else {
        return HeaderAnalysis::missing(family, kb::referrer_policy::MISSING);
    };

    let lower = policy.to_ascii_lowercase();
    let is_safe = lower
        .split(',')
        .map(str::trim)
        .any(|token| SAFE_REFERRER_POLICIES.contains(&token));

    if is_safe {
        HeaderAnalysis::observed(family, HeaderStatus::Secure, policy, 1, kb::referrer_policy::SECURE)
    } else {
        HeaderAnalysis::observed(family, HeaderStatus::Weak, policy, 0, kb::referrer_policy::LEAKY)
    }
}

/// Permissions-Policy, max 1 point. Any non-empty policy counts.
pub fn evaluate_permissions_policy(headers: &ResponseHeaders) -> HeaderAnalysis {
    let family = HeaderFamily::PermissionsPolicy;
    match headers.present("permissions-policy") {
        Some(pp) => HeaderAnalysis::observed(
            family,
            HeaderStatus::Secure,
            pp,
            1,
            kb::permissions_policy::SECURE,
        ),
        None => HeaderAnalysis::missing(family, kb::permissions_policy::MISSING),
    }
}

/// Cross-Origin-Isolation (COOP + COEP), max 2 points.
pub fn evaluate_cross_origin_isolation(headers: &ResponseHeaders) -> HeaderAnalysis {
    let family = HeaderFamily::CrossOriginIsolation;
    let coop = headers.present("cross-origin-opener-policy");
    let coep = headers.present("cross-origin-embedder-policy");

    if coop.is_none() && coep.is_none() {
        return HeaderAnalysis::missing(family, kb::cross_origin::INCOMPLETE);
    }

    let value = format!(
        "COOP: {}, COEP: {}",
        coop.unwrap_or("None"),
        coep.unwrap_or("None")
    );
    let isolated = coep.is_some_and(|v| v.contains("require-corp")) && coop == Some("same-origin");
    debug!(isolated, %value, "Cross-origin isolation evaluated.");

    if isolated {
        HeaderAnalysis::observed(family, HeaderStatus::Secure, value, 2, kb::cross_origin::SECURE)
    } else {
        HeaderAnalysis::observed(family, HeaderStatus::Weak, value, 0, kb::cross_origin::INCOMPLETE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> ResponseHeaders {
        pairs.iter().copied().collect()
    }

    #[test]
    fn csp_with_all_core_directives_is_secure() {
        let eval = evaluate_csp(&headers(&[(
            "Content-Security-Policy",
            "default-src 'self'; script-src 'self'; object-src 'none'; upgrade-insecure-requests",
        )]));
        assert_eq!(eval.analysis.status, HeaderStatus::Secure);
        assert_eq!(eval.analysis.score, 8);
        assert!(!eval.has_frame_ancestors);
    }

    #[test]
    fn csp_with_some_core_directives_is_partial() {
        let eval = evaluate_csp(&headers(&[("content-security-policy", "default-src 'self'")]));
        assert_eq!(eval.analysis.status, HeaderStatus::Weak);
        assert_eq!(eval.analysis.score, 5);
        assert_eq!(eval.analysis.recommendation, kb::csp::PARTIAL);

        let eval = evaluate_csp(&headers(&[(
            "content-security-policy",
            "script-src 'self'; object-src 'none'",
        )]));
        assert_eq!(eval.analysis.score, 5);
    }

    #[test]
    fn csp_with_only_frame_ancestors_scores_two_and_raises_signal() {
        let eval = evaluate_csp(&headers(&[("content-security-policy", "frame-ancestors 'self'")]));
        assert_eq!(eval.analysis.status, HeaderStatus::Weak);
        assert_eq!(eval.analysis.score, 2);
        assert_eq!(eval.analysis.recommendation, kb::csp::NARROW);
        assert!(eval.has_frame_ancestors);
    }

    #[test]
    fn csp_with_only_trusted_types_scores_two() {
        let eval = evaluate_csp(&headers(&[(
            "content-security-policy",
            "require-trusted-types-for 'script'",
        )]));
        assert_eq!(eval.analysis.score, 2);
        assert_eq!(eval.analysis.recommendation, kb::csp::NARROW);
        assert!(!eval.has_frame_ancestors);
    }

    #[test]
    fn csp_without_known_directives_falls_back_to_two() {
        let eval = evaluate_csp(&headers(&[("content-security-policy", "upgrade-insecure-requests")]));
        assert_eq!(eval.analysis.status, HeaderStatus::Weak);
        assert_eq!(eval.analysis.score, 2);
        assert_eq!(eval.analysis.recommendation, kb::csp::FALLBACK);
    }

    #[test]
    fn csp_absent_or_empty_is_missing() {
        let eval = evaluate_csp(&ResponseHeaders::new());
        assert_eq!(eval.analysis.status, HeaderStatus::Missing);
        assert_eq!(eval.analysis.value, None);

        let eval = evaluate_csp(&headers(&[("content-security-policy", "")]));
        assert_eq!(eval.analysis.status, HeaderStatus::Missing);
    }

    #[test]
    fn max_age_parsing() {
        assert_eq!(parse_max_age("max-age=31536000; includeSubDomains"), 31_536_000);
        assert_eq!(parse_max_age("MAX-AGE=60"), 60);
        assert_eq!(parse_max_age("includeSubDomains"), 0);
        assert_eq!(parse_max_age("max-age=\"3600\""), 0);
        assert_eq!(parse_max_age("max-age=99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn hsts_one_year_without_subdomains_is_secure_with_advice() {
        let analysis = evaluate_hsts(&headers(&[("strict-transport-security", "max-age=31536000")]));
        assert_eq!(analysis.status, HeaderStatus::Secure);
        assert_eq!(analysis.score, 6);
        assert!(analysis.recommendation.contains("includeSubDomains"));
    }

    #[test]
    fn hsts_with_subdomains_is_fully_configured() {
        let analysis = evaluate_hsts(&headers(&[(
            "strict-transport-security",
            "max-age=63072000; includesubdomains; preload",
        )]));
        assert_eq!(analysis.score, 6);
        assert_eq!(analysis.recommendation, kb::hsts::COMPLETE);
    }

    #[test]
    fn hsts_short_max_age_is_weak() {
        let analysis = evaluate_hsts(&headers(&[("strict-transport-security", "max-age=3600")]));
        assert_eq!(analysis.status, HeaderStatus::Weak);
        assert_eq!(analysis.score, 2);
        assert_eq!(analysis.value.as_deref(), Some("max-age=3600"));
    }

    #[test]
    fn frame_options_values() {
        let secure = evaluate_frame_options(&headers(&[("x-frame-options", "sameorigin")]), false);
        assert_eq!(secure.status, HeaderStatus::Secure);
        assert_eq!(secure.score, 1);
        assert_eq!(secure.value.as_deref(), Some("sameorigin"));

        let weak = evaluate_frame_options(&headers(&[("x-frame-options", "ALLOW-FROM https://a.example")]), false);
        assert_eq!(weak.status, HeaderStatus::Weak);
        assert_eq!(weak.score, 0);
    }

    #[test]
    fn frame_options_missing_advice_depends_on_frame_ancestors() {
        let mitigated = evaluate_frame_options(&ResponseHeaders::new(), true);
        assert_eq!(mitigated.status, HeaderStatus::Missing);
        assert_eq!(mitigated.recommendation, kb::frame_options::MITIGATED);

        let bare = evaluate_frame_options(&ResponseHeaders::new(), false);
        assert_eq!(bare.recommendation, kb::frame_options::MISSING);
    }

    #[test]
    fn content_type_options_is_binary() {
        let secure = evaluate_content_type_options(&headers(&[("x-content-type-options", "NoSniff")]));
        assert_eq!(secure.status, HeaderStatus::Secure);
        assert_eq!(secure.score, 1);

        let other = evaluate_content_type_options(&headers(&[("x-content-type-options", "sniff")]));
        assert_eq!(other.status, HeaderStatus::Missing);
        assert_eq!(other.value, None);
        assert_eq!(other.score, 0);
    }

    #[test]
    fn referrer_policy_accepts_any_safe_token() {
        let secure = evaluate_referrer_policy(&headers(&[(
            "referrer-policy",
            "no-referrer-when-downgrade, Strict-Origin-When-Cross-Origin",
        )]));
        assert_eq!(secure.status, HeaderStatus::Secure);
        assert_eq!(secure.score, 1);

        let weak = evaluate_referrer_policy(&headers(&[("referrer-policy", "unsafe-url")]));
        assert_eq!(weak.status, HeaderStatus::Weak);
        assert_eq!(weak.score, 0);
    }

    #[test]
    fn permissions_policy_presence() {
        let secure = evaluate_permissions_policy(&headers(&[("permissions-policy", "camera=()")]));
        assert_eq!(secure.status, HeaderStatus::Secure);
        let missing = evaluate_permissions_policy(&ResponseHeaders::new());
        assert_eq!(missing.status, HeaderStatus::Missing);
    }

    #[test]
    fn cross_origin_isolation_requires_both_policies() {
        let secure = evaluate_cross_origin_isolation(&headers(&[
            ("cross-origin-opener-policy", "same-origin"),
            ("cross-origin-embedder-policy", "require-corp"),
        ]));
        assert_eq!(secure.status, HeaderStatus::Secure);
        assert_eq!(secure.score, 2);
        assert_eq!(
            secure.value.as_deref(),
            Some("COOP: same-origin, COEP: require-corp")
        );

        let weak = evaluate_cross_origin_isolation(&headers(&[(
            "cross-origin-opener-policy",
            "same-origin-allow-popups",
        )]));
        assert_eq!(weak.status, HeaderStatus::Weak);
        assert_eq!(weak.score, 0);
        assert_eq!(
            weak.value.as_deref(),
            Some("COOP: same-origin-allow-popups, COEP: None")
        );

        let missing = evaluate_cross_origin_isolation(&ResponseHeaders::new());
        assert_eq!(missing.status, HeaderStatus::Missing);
        assert_eq!(missing.value, None);
    }
}
