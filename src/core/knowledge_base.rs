//! Static, read-only texts attached to a report: what each header family is for,
//! the remediation advice for every evaluation branch, and the risk wording.
//!
//! Keeping the wording here, away from the evaluators, lets the decision logic
//! read as a plain decision table.

use crate::core::models::HeaderFamily;
use std::fmt;

/// Whether a family is one of the critical signals that gate the risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FamilyCategory {
    /// HSTS, frame protection and MIME-sniffing protection.
    Critical,
    /// Everything that only adds to the hardening score.
    Hardening,
}

impl fmt::Display for FamilyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FamilyCategory::Critical => write!(f, "Critical"),
            FamilyCategory::Hardening => write!(f, "Hardening"),
        }
    }
}

/// Everything static that is known about one header family.
pub struct FamilyDetail {
    pub family: HeaderFamily,
    pub category: FamilyCategory,
    /// Fixed description carried by every `HeaderAnalysis` of this family.
    pub description: &'static str,
}

static FAMILIES: &[FamilyDetail] = &[
    FamilyDetail {
        family: HeaderFamily::ContentSecurityPolicy,
        category: FamilyCategory::Hardening,
        description: "Controls which resources the browser is allowed to load.",
    },
    FamilyDetail {
        family: HeaderFamily::StrictTransportSecurity,
        category: FamilyCategory::Critical,
        description: "Forces the browser to use HTTPS only.",
    },
    FamilyDetail {
        family: HeaderFamily::XFrameOptions,
        category: FamilyCategory::Critical,
        description: "Prevents clickjacking.",
    },
    FamilyDetail {
        family: HeaderFamily::XContentTypeOptions,
        category: FamilyCategory::Critical,
        description: "Prevents MIME-sniffing.",
    },
    FamilyDetail {
        family: HeaderFamily::ReferrerPolicy,
        category: FamilyCategory::Hardening,
        description: "Controls referrer information.",
    },
    FamilyDetail {
        family: HeaderFamily::PermissionsPolicy,
        category: FamilyCategory::Hardening,
        description: "Restricts browser features.",
    },
    FamilyDetail {
        family: HeaderFamily::CrossOriginIsolation,
        category: FamilyCategory::Hardening,
        description: "Process isolation.",
    },
];

/// Looks up the static detail of a family. Every family has an entry.
pub fn family_detail(family: HeaderFamily) -> &'static FamilyDetail {
    FAMILIES
        .iter()
        .find(|d| d.family == family)
        .unwrap_or(&FAMILIES[0])
}

pub fn description_for(family: HeaderFamily) -> &'static str {
    family_detail(family).description
}

// --- Recommendations, one per evaluation branch ---

pub mod csp {
    pub const MISSING: &str = "Implement a strict CSP to prevent XSS and data injection attacks.";
    pub const COMPLETE: &str = "Excellent CSP configuration.";
    pub const PARTIAL: &str = "Your CSP is partial. Add missing default-src, script-src, or object-src.";
    pub const NARROW: &str = "CSP only covers specific protections. Enhance it with a default policy.";
    pub const FALLBACK: &str = "Your CSP is weak. Ensure default-src, script-src, and object-src are defined.";
}

pub mod hsts {
    pub const MISSING: &str = "Enable HSTS with a long max-age (e.g., 1 year).";
    pub const COMPLETE: &str = "HSTS is correctly configured.";
    pub const NO_SUBDOMAINS: &str = "Secure, but adding includeSubDomains is recommended.";
    pub const SHORT_MAX_AGE: &str = "Ensure max-age is ≥ 31536000 (1 year).";
}

pub mod frame_options {
    pub const MISSING: &str = "Set to DENY or SAMEORIGIN.";
    pub const MITIGATED: &str = "Missing, but mitigated by CSP frame-ancestors.";
    pub const ACTIVE: &str = "Frame protection active.";
    pub const INVALID: &str = "Use DENY or SAMEORIGIN.";
}

pub mod content_type_options {
    pub const SECURE: &str = "Secure.";
    pub const MISSING: &str = "Set to nosniff.";
}

pub mod referrer_policy {
    pub const MISSING: &str = "Implement a secure policy.";
    pub const SECURE: &str = "Secure.";
    pub const LEAKY: &str = "Use strict-origin-when-cross-origin.";
}

pub mod permissions_policy {
    pub const SECURE: &str = "Secure.";
    pub const MISSING: &str = "Define a policy.";
}

pub mod cross_origin {
    pub const SECURE: &str = "Secure.";
    pub const INCOMPLETE: &str = "Set COOP: same-origin and COEP: require-corp.";
}

// --- Report-level advice ---

pub mod opportunities {
    /// How many non-secure families are suggested at once.
    pub const LIMIT: usize = 4;
    pub const TITLE: &str = "Hardening Opportunities";
    pub const NONE: &str = "Perfect configuration detected. No immediate fixes required!";
}

// --- Risk wording ---

pub mod risk {
    pub const LOW_LABEL: &str = "Low Risk";
    pub const LOW_DESCRIPTION: &str =
        "Core security protections are enabled. Some advanced hardening headers are missing.";
    pub const MEDIUM_LABEL: &str = "Medium Risk";
    pub const MEDIUM_DESCRIPTION: &str =
        "Core security headers are present but have minor configuration weaknesses.";
    pub const ATTENTION_LABEL: &str = "Attention Required";
    pub const ATTENTION_PREFIX: &str = "One or more critical core protections are missing";

    pub const HSTS_PROTECTION: &str = "HSTS";
    pub const FRAME_PROTECTION: &str = "Frame Protection";
    pub const SNIFFING_PROTECTION: &str = "Sniffing Protection";
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_family_has_its_own_entry() {
        for family in HeaderFamily::iter() {
            assert_eq!(family_detail(family).family, family);
        }
    }

    #[test]
    fn critical_families_are_the_three_gating_signals() {
        let critical: Vec<HeaderFamily> = HeaderFamily::iter()
            .filter(|f| family_detail(*f).category == FamilyCategory::Critical)
            .collect();
        assert_eq!(
            critical,
            vec![
                HeaderFamily::StrictTransportSecurity,
                HeaderFamily::XFrameOptions,
                HeaderFamily::XContentTypeOptions,
            ]
        );
    }
}
