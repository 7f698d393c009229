// src/lib.rs

//! WebSentinel: scores the HTTP security headers of a web origin.
//!
//! The decision logic lives in [`core::analyzer::analyze`]; fetching, history
//! and export are thin collaborators around it.

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;

pub use crate::core::analyzer::analyze;
pub use crate::core::models::{
    HeaderAnalysis, HeaderFamily, HeaderStatus, ResponseHeaders, RiskLevel, SecurityReport,
};
