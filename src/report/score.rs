// src/report/score.rs
// =============================================================================
// Turns the crawl results and the external verdicts into the final report.
//
// Order of findings in the report:
//   1. everything the crawl pass found (page by page, link by link)
//   2. dead external links, in the order the URLs were first seen
//   3. orphan pages, in discovery order
//
// The score starts at 100 and every finding subtracts its penalty. The raw
// value may go below zero; only the displayed value is clamped to 0..=100.
// =============================================================================

use super::finding::{Finding, WarningKind};
use crate::checker::ExternalVerdict;
use crate::config::SiteConfig;
use crate::crawl::{AuditContext, PageIndex, PageRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

pub const BASELINE_SCORE: i64 = 100;
pub const DEFAULT_TOP_PAGES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    raw: i64,
}

impl Score {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let penalties: i64 = findings.iter().map(|f| i64::from(f.penalty())).sum();
        Self {
            raw: BASELINE_SCORE - penalties,
        }
    }

    /// Unclamped value, negative when penalties exceed the baseline.
    pub fn raw(&self) -> i64 {
        self.raw
    }

    /// The value shown to users, always within 0..=100.
    pub fn display(&self) -> u8 {
        // clamp keeps the value in 0..=100, so the cast is lossless
        self.raw.clamp(0, BASELINE_SCORE) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopPage {
    pub path: String,
    pub inbound_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub root_dir: PathBuf,
    pub base_url: Option<String>,
    pub keywords: Vec<String>,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub external_links: usize,
    pub external_checked: bool,
    pub findings: Vec<Finding>,
    pub pages: Vec<PageRecord>,
    pub top_pages: Vec<TopPage>,
    pub score: u8,
    pub raw_score: i64,
    pub elapsed_secs: f64,
}

impl AuditReport {
    pub fn dead_links(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_dead_link())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_dead_link())
    }
}

/// One orphan warning per non-index page without inbound links.
///
/// Must run after every link has been resolved.
pub fn orphan_findings(index: &PageIndex) -> Vec<Finding> {
    index
        .orphans()
        .map(|page| {
            Finding::warning(
                page.rel_path.clone(),
                WarningKind::Orphan,
                "Orphan page (No inbound links)",
            )
        })
        .collect()
}

/// Builds the report once the crawl and every external check are done.
pub fn aggregate(
    config: &SiteConfig,
    ctx: AuditContext,
    verdicts: &[ExternalVerdict],
    top_n: usize,
) -> AuditReport {
    let AuditContext {
        index,
        mut findings,
        external,
        failed_pages,
    } = ctx;

    let by_url: HashMap<&str, &ExternalVerdict> =
        verdicts.iter().map(|v| (v.url.as_str(), v)).collect();
    findings.extend(
        external
            .as_slice()
            .iter()
            .filter_map(|url| by_url.get(url.as_str()))
            .filter_map(|verdict| verdict.to_finding()),
    );

    findings.extend(orphan_findings(&index));

    let score = Score::from_findings(&findings);
    let top_pages = index
        .most_linked(top_n)
        .into_iter()
        .map(|page| TopPage {
            path: page.rel_path.clone(),
            inbound_count: page.inbound_count,
        })
        .collect();

    AuditReport {
        root_dir: config.root_dir.clone(),
        base_url: config.base_url.clone(),
        keywords: config.keywords.clone(),
        files_scanned: index.pages().len(),
        files_failed: failed_pages,
        external_links: external.len(),
        external_checked: config.check_external,
        findings,
        pages: index.pages().to_vec(),
        top_pages,
        score: score.display(),
        raw_score: score.raw(),
        elapsed_secs: 0.0,
    }
}
