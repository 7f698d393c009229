// src/ui/widgets/mod.rs

pub mod analysis_view;  // Header list plus the detail pane of the selected family.
pub mod footer;         // Key hints for the current state.
pub mod history_panel;  // Recent scans.
pub mod input;          // Target input and status line.
pub mod json_view;      // Raw JSON of the current report.
pub mod summary;        // Score card and risk classification.
