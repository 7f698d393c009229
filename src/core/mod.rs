// src/core/mod.rs

/// Data structures shared by every layer: `SecurityReport`, `HeaderAnalysis`,
/// the header families and the case-insensitive `ResponseHeaders` input.
pub mod models;

/// Static descriptions, remediation advice and risk wording.
pub mod knowledge_base;

/// The header-analysis rule engine.
pub mod analyzer;

/// Network collaborator that retrieves headers and feeds the analyzer.
pub mod scanner;

pub mod history;
pub mod export;
pub mod error;
