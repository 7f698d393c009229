// src/core/analyzer/risk.rs

use crate::core::knowledge_base::risk as text;
use crate::core::models::{HeaderAnalysis, HeaderStatus, RiskAssessment, RiskLevel};

/// The three critical signals and their weaknesses, derived from the scored families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriticalSignals {
    pub has_hsts: bool,
    pub has_frame_protection: bool,
    pub has_sniffing_protection: bool,
    pub hsts_weak: bool,
    pub frame_protection_weak: bool,
}

impl CriticalSignals {
    /// CSP `frame-ancestors` stands in for X-Frame-Options, both for presence and weakness.
    pub fn derive(
        hsts: &HeaderAnalysis,
        frame_options: &HeaderAnalysis,
        content_type_options: &HeaderAnalysis,
        has_frame_ancestors: bool,
    ) -> Self {
        Self {
            has_hsts: hsts.status != HeaderStatus::Missing,
            has_frame_protection: frame_options.status != HeaderStatus::Missing || has_frame_ancestors,
            has_sniffing_protection: content_type_options.status != HeaderStatus::Missing,
            hsts_weak: hsts.status == HeaderStatus::Weak,
            frame_protection_weak: frame_options.status == HeaderStatus::Weak && !has_frame_ancestors,
        }
    }

    fn all_present(&self) -> bool {
        self.has_hsts && self.has_frame_protection && self.has_sniffing_protection
    }

    /// Names of the absent critical protections, in a fixed order.
    pub fn missing_protections(&self) -> Vec<&'static str> {
        [
            (self.has_hsts, text::HSTS_PROTECTION),
            (self.has_frame_protection, text::FRAME_PROTECTION),
            (self.has_sniffing_protection, text::SNIFFING_PROTECTION),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, name)| name)
        .collect()
    }
}

/// Maps the critical signals to a risk level with its label and description.
pub fn classify(signals: &CriticalSignals) -> RiskAssessment {
    if signals.all_present() {
        if signals.hsts_weak || signals.frame_protection_weak {
            RiskAssessment {
                level: RiskLevel::Medium,
                label: text::MEDIUM_LABEL.to_string(),
                description: text::MEDIUM_DESCRIPTION.to_string(),
            }
        } else {
            RiskAssessment {
                level: RiskLevel::Low,
                label: text::LOW_LABEL.to_string(),
                description: text::LOW_DESCRIPTION.to_string(),
            }
        }
    } else {
        RiskAssessment {
            level: RiskLevel::High,
            label: text::ATTENTION_LABEL.to_string(),
            description: format!(
                "{}: {}.",
                text::ATTENTION_PREFIX,
                signals.missing_protections().join(", ")
            ),
        }
    }
}
