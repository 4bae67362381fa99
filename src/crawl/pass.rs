// src/crawl/pass.rs
// =============================================================================
// The crawl pass: discover pages, parse each one, route every link.
//
// How it works:
// 1. Discover all pages and index them (so links can target pages that are
//    parsed later)
// 2. For each page, in discovery order:
//    - read and parse it
//    - record heading / structured data / breadcrumb findings
//    - classify each link: ignored, external (collected for the HTTP phase),
//      or internal (warn about URL conventions, then resolve on disk)
// 3. Hand everything over as one AuditContext
//
// This whole phase is sequential. A page that cannot be read is logged and
// skipped; it never stops the crawl.
// =============================================================================

use super::discover::{discover_pages, relative_path};
use super::index::{PageIndex, PageRecord};
use crate::checker::{
    extract_page_signals, ElementPredicate, LinkClass, LinkClassifier, PathResolver, Resolution,
};
use crate::config::SiteConfig;
use crate::error::AuditError;
use crate::report::{Finding, WarningKind};
use log::{debug, error, info};
use std::collections::HashSet;
use std::path::Path;

/// External URLs in first-seen order, each stored once.
#[derive(Debug, Default)]
pub struct ExternalLinkSet {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl ExternalLinkSet {
    pub fn insert(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string());
        self.urls.push(url.to_string());
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Everything the crawl pass found, handed to the aggregation step.
#[derive(Debug, Default)]
pub struct AuditContext {
    pub index: PageIndex,
    /// In discovery order
    pub findings: Vec<Finding>,
    pub external: ExternalLinkSet,
    /// Pages that could not be read
    pub failed_pages: usize,
}

pub struct CrawlPass<'a> {
    config: &'a SiteConfig,
    resolver: PathResolver,
    classifier: LinkClassifier<'a>,
    breadcrumb: &'a dyn ElementPredicate,
}

impl<'a> CrawlPass<'a> {
    pub fn new(config: &'a SiteConfig, breadcrumb: &'a dyn ElementPredicate) -> Self {
        Self {
            config,
            resolver: PathResolver::new(&config.root_dir),
            classifier: LinkClassifier::new(config),
            breadcrumb,
        }
    }

    pub fn run(&self) -> Result<AuditContext, AuditError> {
        info!("Scanning files in {}...", self.config.root_dir.display());
        let files = discover_pages(self.config)?;

        let mut ctx = AuditContext::default();
        for path in &files {
            let rel_path = relative_path(&self.config.root_dir, path);
            ctx.index.insert(PageRecord::new(path.clone(), rel_path));
        }

        info!("Parsing {} files...", files.len());
        for path in &files {
            if let Err(e) = self.audit_page(path, &mut ctx) {
                error!("Processing file {}: {}", path.display(), e);
                ctx.failed_pages += 1;
            }
        }

        Ok(ctx)
    }

    /// Parses one indexed page and records its findings and links.
    pub fn audit_page(&self, path: &Path, ctx: &mut AuditContext) -> Result<(), AuditError> {
        let bytes = std::fs::read(path).map_err(|source| AuditError::ReadPage {
            path: path.to_path_buf(),
            source,
        })?;
        let html = String::from_utf8_lossy(&bytes);
        let signals = extract_page_signals(&html, self.breadcrumb);

        let rel_path = match ctx.index.get(path) {
            Some(record) => record.rel_path.clone(),
            None => relative_path(&self.config.root_dir, path),
        };
        if let Some(record) = ctx.index.get_mut(path) {
            record.h1_count = signals.h1_count;
            record.has_schema = signals.has_schema;
            record.has_breadcrumb = signals.has_breadcrumb;
        }

        match signals.h1_count {
            0 => ctx.findings.push(Finding::warning(
                &rel_path,
                WarningKind::MissingH1,
                "Missing H1 tag",
            )),
            1 => {}
            _ => ctx.findings.push(Finding::warning(
                &rel_path,
                WarningKind::MultipleH1,
                "Multiple H1 tags found",
            )),
        }

        if !signals.has_schema {
            ctx.findings.push(Finding::warning(
                &rel_path,
                WarningKind::MissingSchema,
                "Missing Schema (application/ld+json)",
            ));
        }

        if self.config.check_breadcrumbs && !signals.has_breadcrumb {
            ctx.findings.push(Finding::warning(
                &rel_path,
                WarningKind::MissingBreadcrumb,
                "Missing breadcrumb navigation",
            ));
        }

        debug!("{}: {} links", rel_path, signals.links.len());
        for href in &signals.links {
            self.route_link(path, &rel_path, href, ctx);
        }

        Ok(())
    }

    /// Classifies one href from `source` and records what follows from it.
    pub fn route_link(&self, source: &Path, source_rel: &str, href: &str, ctx: &mut AuditContext) {
        let class = self.classifier.classify(href);

        let target = match &class {
            LinkClass::Ignored => return,
            LinkClass::External(url) => {
                ctx.external.insert(url);
                return;
            }
            LinkClass::InternalAbsolute { path, .. } => path.as_str(),
            LinkClass::InternalRelative(href) => href.as_str(),
        };

        ctx.findings.extend(class.structural_findings(source_rel));

        match self.resolver.resolve(source, target) {
            Resolution::Skipped => {}
            Resolution::Found(file) => {
                ctx.index.record_resolution(source, href, &file);
            }
            Resolution::Missing => ctx.findings.push(Finding::dead_internal(source_rel, href)),
        }
    }
}
