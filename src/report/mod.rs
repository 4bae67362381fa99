// src/report/mod.rs
// =============================================================================
// Findings, scoring and output.
//
// Submodules:
// - finding: The Finding type and its penalty table
// - score: Orphan detection, score and the AuditReport
// - render: Text and JSON output
// =============================================================================

mod finding;
mod render;
mod score;

pub use finding::{DeadLinkReason, Finding, WarningKind};
pub use render::print_report;
pub use score::{aggregate, AuditReport, DEFAULT_TOP_PAGES};
