// src/audit.rs
// =============================================================================
// Runs a whole audit, phase by phase:
//
//   crawl (sequential) -> external checks (concurrent, joined) -> aggregate
//
// Each phase hands its results to the next as plain values; nothing is
// shared between phases except the read-only SiteConfig.
// =============================================================================

use crate::checker::{check_external_links, is_breadcrumb, Prober};
use crate::config::SiteConfig;
use crate::crawl::CrawlPass;
use crate::error::AuditError;
use crate::report::{aggregate, AuditReport};
use log::info;
use std::time::Instant;

pub async fn run_audit<P: Prober>(
    config: &SiteConfig,
    prober: &P,
    top_n: usize,
) -> Result<AuditReport, AuditError> {
    let start = Instant::now();

    let breadcrumb = is_breadcrumb;
    let ctx = CrawlPass::new(config, &breadcrumb).run()?;

    let verdicts = if !config.check_external {
        info!("Skipping {} external links", ctx.external.len());
        Vec::new()
    } else if ctx.external.is_empty() {
        Vec::new()
    } else {
        info!("Checking {} external links...", ctx.external.len());
        check_external_links(prober, ctx.external.as_slice(), config.concurrency).await
    };

    let mut report = aggregate(config, ctx, &verdicts, top_n);
    report.elapsed_secs = start.elapsed().as_secs_f64();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{ProbeError, ProbeMethod, UnreachableKind};
    use crate::report::{DeadLinkReason, Finding, WarningKind, DEFAULT_TOP_PAGES};
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Answers from a fixed table; unknown URLs are unreachable.
    #[derive(Default)]
    struct TableProber {
        answers: HashMap<(ProbeMethod, String), u16>,
        calls: Mutex<Vec<String>>,
    }

    impl TableProber {
        fn with(mut self, url: &str, head: u16, get: u16) -> Self {
            self.answers.insert((ProbeMethod::Head, url.to_string()), head);
            self.answers.insert((ProbeMethod::Get, url.to_string()), get);
            self
        }
    }

    impl Prober for TableProber {
        async fn probe(&self, method: ProbeMethod, url: &str) -> Result<u16, ProbeError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.answers
                .get(&(method, url.to_string()))
                .copied()
                .ok_or_else(|| ProbeError {
                    kind: UnreachableKind::Dns,
                    message: "dns error".to_string(),
                })
        }
    }

    // A page with one H1 and structured data, so only link findings remain
    fn page(root: &Path, file: &str, body: &str) {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let html = format!(
            r#"<html><head><script type="application/ld+json">{{}}</script></head>
               <body><h1>Title</h1>{}</body></html>"#,
            body
        );
        fs::write(path, html).unwrap();
    }

    async fn audit(root: &Path, prober: &TableProber) -> AuditReport {
        let config = SiteConfig::new(root);
        run_audit(&config, prober, DEFAULT_TOP_PAGES).await.unwrap()
    }

    #[tokio::test]
    async fn test_unlinked_page_is_orphan() {
        let dir = TempDir::new().unwrap();
        page(dir.path(), "index.html", "");
        page(dir.path(), "about.html", "");

        let report = audit(dir.path(), &TableProber::default()).await;

        assert_eq!(report.dead_links().count(), 0);
        assert_eq!(
            report.findings,
            vec![Finding::warning(
                "about.html",
                WarningKind::Orphan,
                "Orphan page (No inbound links)"
            )]
        );
        assert_eq!(report.score, 95);
    }

    #[tokio::test]
    async fn test_missing_clean_url_target_is_dead() {
        let dir = TempDir::new().unwrap();
        page(dir.path(), "index.html", r#"<a href="/blog/missing">x</a>"#);

        let report = audit(dir.path(), &TableProber::default()).await;

        assert_eq!(
            report.findings,
            vec![Finding::dead_internal("index.html", "/blog/missing")]
        );
        assert_eq!(report.score, 90);
    }

    #[tokio::test]
    async fn test_external_links_good_and_dead() {
        let dir = TempDir::new().unwrap();
        page(
            dir.path(),
            "index.html",
            r#"<a href="https://good.example.com">good</a>
               <a href="https://dead.example.com">dead</a>"#,
        );
        let prober = TableProber::default()
            .with("https://good.example.com", 200, 200)
            .with("https://dead.example.com", 404, 404);

        let report = audit(dir.path(), &prober).await;

        assert_eq!(
            report.findings,
            vec![Finding::dead_external(
                "https://dead.example.com",
                DeadLinkReason::HttpStatus(404)
            )]
        );
        assert_eq!(report.score, 95);
    }

    #[tokio::test]
    async fn test_relative_html_link_gets_two_warnings() {
        let dir = TempDir::new().unwrap();
        page(dir.path(), "index.html", r#"<a href="about.html">about</a>"#);
        page(dir.path(), "about.html", "");

        let report = audit(dir.path(), &TableProber::default()).await;

        let kinds: Vec<WarningKind> = report
            .findings
            .iter()
            .filter_map(|f| match f {
                Finding::Warning { kind, .. } => Some(*kind),
                Finding::DeadLink { .. } => None,
            })
            .collect();
        assert_eq!(kinds, vec![WarningKind::HtmlExtension, WarningKind::RelativePath]);
        assert_eq!(report.score, 96);
    }

    #[tokio::test]
    async fn test_warnings_fire_even_when_link_is_dead() {
        let dir = TempDir::new().unwrap();
        page(dir.path(), "index.html", r#"<a href="missing.html">x</a>"#);

        let report = audit(dir.path(), &TableProber::default()).await;

        assert_eq!(report.findings.len(), 3);
        assert_eq!(report.dead_links().count(), 1);
        assert_eq!(report.raw_score, 86);
    }

    #[tokio::test]
    async fn test_shared_external_url_is_checked_once() {
        let dir = TempDir::new().unwrap();
        let link = r#"<a href="https://shared.example.com">s</a><a href="/">home</a>"#;
        page(dir.path(), "index.html", link);
        page(dir.path(), "a.html", link);
        page(dir.path(), "b.html", link);
        let prober = TableProber::default().with("https://shared.example.com", 200, 200);

        let report = audit(dir.path(), &prober).await;

        assert_eq!(report.external_links, 1);
        assert_eq!(*prober.calls.lock().unwrap(), vec!["https://shared.example.com"]);
        assert_eq!(report.top_pages[0].path, "index.html");
        assert_eq!(report.top_pages[0].inbound_count, 3);
    }

    #[tokio::test]
    async fn test_unreachable_external_link() {
        let dir = TempDir::new().unwrap();
        page(dir.path(), "index.html", r#"<a href="https://nowhere.invalid">x</a>"#);

        let report = audit(dir.path(), &TableProber::default()).await;

        assert_eq!(report.findings.len(), 1);
        assert!(matches!(
            &report.findings[0],
            Finding::DeadLink { reason: DeadLinkReason::Unreachable(_), .. }
        ));
        assert_eq!(report.score, 95);
    }

    #[tokio::test]
    async fn test_skip_external_never_probes() {
        let dir = TempDir::new().unwrap();
        page(dir.path(), "index.html", r#"<a href="https://nowhere.invalid">x</a>"#);
        let prober = TableProber::default();

        let mut config = SiteConfig::new(dir.path());
        config.check_external = false;
        let report = run_audit(&config, &prober, DEFAULT_TOP_PAGES).await.unwrap();

        assert!(prober.calls.lock().unwrap().is_empty());
        assert!(report.findings.is_empty());
        assert_eq!(report.external_links, 1);
        assert!(!report.external_checked);
    }

    #[tokio::test]
    async fn test_many_dead_links_floor_the_score() {
        let dir = TempDir::new().unwrap();
        let links: String = (0..15)
            .map(|i| format!(r#"<a href="/gone-{}">x</a>"#, i))
            .collect();
        page(dir.path(), "index.html", &links);

        let report = audit(dir.path(), &TableProber::default()).await;

        assert_eq!(report.raw_score, -50);
        assert_eq!(report.score, 0);
    }

    #[tokio::test]
    async fn test_missing_root_fails_the_run() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::new(dir.path().join("missing"));
        let result = run_audit(&config, &TableProber::default(), DEFAULT_TOP_PAGES).await;
        assert!(matches!(result, Err(AuditError::RootInaccessible { .. })));
    }

    #[tokio::test]
    async fn test_empty_site_still_reports() {
        let dir = TempDir::new().unwrap();
        let report = audit(dir.path(), &TableProber::default()).await;
        assert_eq!(report.files_scanned, 0);
        assert_eq!(report.score, 100);
    }
}
