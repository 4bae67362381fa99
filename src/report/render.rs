// src/report/render.rs
// =============================================================================
// Prints the audit report, either as a coloured text report or as JSON.
//
// The report goes to stdout. Logs go to stderr, so `--json` output can be
// piped straight into another tool.
// =============================================================================

use super::finding::Finding;
use super::score::AuditReport;
use anyhow::Result;
use colored::Colorize;

const RULE_WIDTH: usize = 60;

// Prints the report either as text or JSON
// Parameters:
//   report: the finished audit
//   json: whether to output JSON format
//   max_warnings: how many warnings the text report lists before summarising
pub fn print_report(report: &AuditReport, json: bool, max_warnings: usize) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_text(report, max_warnings));
    }
    Ok(())
}

pub fn render_text(report: &AuditReport, max_warnings: usize) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("\n{}\n{}\n{}\n", rule, "SEO AUDIT REPORT".bold(), rule));
    let base_url = match &report.base_url {
        Some(url) => url.green(),
        None => "Not Detected".yellow(),
    };
    out.push_str(&format!("Base URL: {}\n", base_url));
    out.push_str(&format!("Files Scanned: {}\n", report.files_scanned));
    if report.files_failed > 0 {
        out.push_str(&format!("Files Failed: {}\n", report.files_failed.to_string().red()));
    }
    let external_note = if report.external_checked { "" } else { " (not checked)" };
    out.push_str(&format!(
        "External Links: {}{}\n",
        report.external_links, external_note
    ));
    out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));

    // 1. Dead links
    let dead: Vec<&Finding> = report.dead_links().collect();
    if dead.is_empty() {
        out.push_str(&format!("\n{}\n", "[SUCCESS] No dead links found.".green()));
    } else {
        out.push_str(&format!(
            "\n{}\n",
            format!("[ERROR] Dead Links Found ({}):", dead.len()).red()
        ));
        for finding in dead {
            if let Finding::DeadLink { source, href, reason } = finding {
                out.push_str(&format!(
                    "  - In {}: {} ({})\n",
                    source.yellow(),
                    href.red(),
                    reason
                ));
            }
        }
    }

    // 2. Warnings (semantics, URL structure, orphans)
    let warnings: Vec<&Finding> = report.warnings().collect();
    if warnings.is_empty() {
        out.push_str(&format!("\n{}\n", "[SUCCESS] No warnings found.".green()));
    } else {
        out.push_str(&format!(
            "\n{}\n",
            format!("[WARN] Issues Found ({}):", warnings.len()).yellow()
        ));
        for finding in warnings.iter().take(max_warnings) {
            if let Finding::Warning { source, message, .. } = finding {
                out.push_str(&format!("  - {}: {}\n", source, message));
            }
        }
        if warnings.len() > max_warnings {
            out.push_str(&format!(
                "  ... and {} more warnings.\n",
                warnings.len() - max_warnings
            ));
        }
    }

    // 3. Most linked pages
    out.push_str(&format!("\n{}\n", "[INFO] Top Pages by Internal Links:".blue()));
    for page in &report.top_pages {
        out.push_str(&format!("  - {}: {} links\n", page.path, page.inbound_count));
    }

    // 4. Final score
    let score = format!("{}/100", report.score);
    let score = match report.score {
        90..=100 => score.green(),
        60..=89 => score.yellow(),
        _ => score.red(),
    };
    out.push_str(&format!("\n{}\nFINAL SCORE: {}\n{}\n", rule, score.bold(), rule));

    if report.score < 100 {
        out.push_str(&format!(
            "{} fix the dead links and warnings listed above, then run the audit again.\n",
            "Actionable Advice:".magenta()
        ));
    }

    out.push_str(&format!(
        "\nAudit completed in {:.2} seconds.\n",
        report.elapsed_secs
    ));
    out
}
