// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Upper bound of the hardening score. The per-family maxima add up to exactly this.
pub const MAX_TOTAL_SCORE: u8 = 20;

// --- Header Evaluation Models ---

// The outcome of evaluating one header family. Exactly one applies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HeaderStatus {
    Secure,
    Weak,
    Missing,
}

// The seven fixed header families. Declaration order is the report order.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
pub enum HeaderFamily {
    #[serde(rename = "Content-Security-Policy")]
    #[strum(serialize = "Content-Security-Policy")]
    ContentSecurityPolicy,
    #[serde(rename = "Strict-Transport-Security")]
    #[strum(serialize = "Strict-Transport-Security")]
    StrictTransportSecurity,
    #[serde(rename = "X-Frame-Options")]
    #[strum(serialize = "X-Frame-Options")]
    XFrameOptions,
    #[serde(rename = "X-Content-Type-Options")]
    #[strum(serialize = "X-Content-Type-Options")]
    XContentTypeOptions,
    #[serde(rename = "Referrer-Policy")]
    #[strum(serialize = "Referrer-Policy")]
    ReferrerPolicy,
    #[serde(rename = "Permissions-Policy")]
    #[strum(serialize = "Permissions-Policy")]
    PermissionsPolicy,
    #[serde(rename = "Cross-Origin-Isolation")]
    #[strum(serialize = "Cross-Origin-Isolation")]
    CrossOriginIsolation,
}

impl HeaderFamily {
    /// Points this family contributes when fully hardened.
    pub fn max_score(self) -> u8 {
        match self {
            HeaderFamily::ContentSecurityPolicy => 8,
            HeaderFamily::StrictTransportSecurity => 6,
            HeaderFamily::XFrameOptions => 1,
            HeaderFamily::XContentTypeOptions => 1,
            HeaderFamily::ReferrerPolicy => 1,
            HeaderFamily::PermissionsPolicy => 1,
            HeaderFamily::CrossOriginIsolation => 2,
        }
    }
}

/// The evaluation of a single header family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeaderAnalysis {
    pub status: HeaderStatus,
    pub value: Option<String>,
    pub score: u8,
    pub max_score: u8,
    pub recommendation: String,
    pub description: String,
}

impl HeaderAnalysis {
    /// Builds the `missing` outcome. No value is carried and nothing is scored.
    pub fn missing(family: HeaderFamily, recommendation: &str) -> Self {
        Self {
            status: HeaderStatus::Missing,
            value: None,
            score: 0,
            max_score: family.max_score(),
            recommendation: recommendation.to_string(),
            description: crate::core::knowledge_base::description_for(family).to_string(),
        }
    }

    /// Builds a `secure` or `weak` outcome for a header that was observed.
    /// The score is clamped to the family maximum.
    pub fn observed(
        family: HeaderFamily,
        status: HeaderStatus,
        value: impl Into<String>,
        score: u8,
        recommendation: &str,
    ) -> Self {
        Self {
            status,
            value: Some(value.into()),
            score: score.min(family.max_score()),
            max_score: family.max_score(),
            recommendation: recommendation.to_string(),
            description: crate::core::knowledge_base::description_for(family).to_string(),
        }
    }
}

// --- Risk Models ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

// The classification plus the text shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub label: String,
    pub description: String,
}

// --- Main Report ---

/// The result of analyzing the headers of one origin. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub url: String,
    pub total_score: u8,
    pub max_total_score: u8,
    pub risk_level: RiskLevel,
    pub risk_label: String,
    pub risk_description: String,
    pub headers: BTreeMap<HeaderFamily, HeaderAnalysis>,
    pub timestamp: DateTime<Utc>,
}

impl SecurityReport {
    pub fn header(&self, family: HeaderFamily) -> Option<&HeaderAnalysis> {
        self.headers.get(&family)
    }

    /// Families that are not `secure`, in report order, at most `limit` of them.
    /// Empty when every family is secure.
    pub fn hardening_opportunities(&self, limit: usize) -> Vec<(HeaderFamily, &HeaderAnalysis)> {
        self.headers
            .iter()
            .filter(|(_, analysis)| analysis.status != HeaderStatus::Secure)
            .map(|(family, analysis)| (*family, analysis))
            .take(limit)
            .collect()
    }

    /// Counts families per status, in `(secure, weak, missing)` order.
    pub fn status_counts(&self) -> (usize, usize, usize) {
        self.headers.values().fold((0, 0, 0), |(s, w, m), a| match a.status {
            HeaderStatus::Secure => (s + 1, w, m),
            HeaderStatus::Weak => (s, w + 1, m),
            HeaderStatus::Missing => (s, w, m + 1),
        })
    }
}

// --- Input Model ---

/// A case-insensitive view of one HTTP response's headers.
///
/// Names are folded to lowercase. A name seen more than once keeps every value,
/// joined with `", "` in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: BTreeMap<String, String>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Raw lookup. An empty value is still returned here.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Lookup used by the evaluators: an empty value counts as not sent.
    pub fn present(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = ResponseHeaders::new();
        for (name, value) in iter {
            headers.insert(name.as_ref(), value.as_ref());
        }
        headers
    }
}
