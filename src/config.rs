// src/config.rs
// =============================================================================
// Site configuration.
//
// The configuration is built exactly once before the crawl starts:
// 1. Defaults (the constants below)
// 2. Command-line overrides and additions
// 3. Auto-detection from the landing page (root/index.html) for anything the
//    command line left unset
//
// After that it is only ever borrowed (&SiteConfig) by the audit phases.
// =============================================================================

use crate::checker::normalize_path;
use crate::error::AuditError;
use log::{debug, warn};
use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Page used for base URL and keyword auto-detection.
pub const LANDING_PAGE: &str = "index.html";

/// Directory names that are never descended into.
pub const DEFAULT_IGNORE_PATHS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".idea",
    ".vscode",
    "venv",
    "env",
];

/// hrefs starting with one of these are skipped without any finding.
pub const DEFAULT_IGNORE_URL_PREFIXES: &[&str] =
    &["/go/", "/cdn-cgi/", "javascript:", "mailto:", "tel:", "#"];

/// HTML files whose name contains one of these are not audited
/// (search console verification files, error pages).
pub const DEFAULT_IGNORE_FILES_CONTAIN: &[&str] = &["google", "404.html"];

pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct SiteConfig {
    pub root_dir: PathBuf,
    /// Canonical site URL without trailing slash, e.g. "https://example.com"
    pub base_url: Option<String>,
    pub keywords: Vec<String>,
    pub ignore_paths: BTreeSet<String>,
    pub ignore_url_prefixes: Vec<String>,
    pub ignore_files_contain: Vec<String>,
    pub concurrency: usize,
    pub timeout_secs: u64,
    /// Probe external links over the network
    pub check_external: bool,
    pub check_breadcrumbs: bool,
}

impl SiteConfig {
    /// Creates a configuration with all defaults for the given root.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            base_url: None,
            keywords: Vec::new(),
            ignore_paths: DEFAULT_IGNORE_PATHS.iter().map(|s| s.to_string()).collect(),
            ignore_url_prefixes: DEFAULT_IGNORE_URL_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_files_contain: DEFAULT_IGNORE_FILES_CONTAIN
                .iter()
                .map(|s| s.to_string())
                .collect(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            check_external: true,
            check_breadcrumbs: false,
        }
    }

    /// Sets the base URL, stripping trailing slashes. Empty input unsets it.
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        self.base_url = base_url.and_then(normalize_base_url);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fills the base URL and keywords from the landing page.
    ///
    /// A base URL given on the command line always wins. A missing or
    /// unreadable landing page is not fatal: the audit just runs without a
    /// base URL, so absolute links to the site itself count as external.
    pub fn detect_from_landing_page(&mut self) {
        let info = match read_landing_page(&self.root_dir) {
            Ok(info) => info,
            Err(e) => {
                warn!("Landing page auto-detection skipped: {}", e);
                return;
            }
        };

        if self.base_url.is_none() {
            match info.base_url {
                Some(url) => {
                    debug!("Detected base URL {}", url);
                    self.base_url = Some(url);
                }
                None => warn!(
                    "Could not detect base URL from {} (canonical or og:url)",
                    LANDING_PAGE
                ),
            }
        }

        if self.keywords.is_empty() {
            self.keywords = info.keywords;
        }
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_paths.contains(name)
    }

    pub fn is_ignored_file(&self, file_name: &str) -> bool {
        self.ignore_files_contain
            .iter()
            .any(|needle| file_name.contains(needle.as_str()))
    }

    pub fn is_ignored_href(&self, href: &str) -> bool {
        self.ignore_url_prefixes
            .iter()
            .any(|prefix| href.starts_with(prefix.as_str()))
    }
}

/// What the landing page tells us about the site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandingPageInfo {
    pub base_url: Option<String>,
    pub keywords: Vec<String>,
}

pub fn read_landing_page(root: &Path) -> Result<LandingPageInfo, AuditError> {
    let path = root.join(LANDING_PAGE);
    let bytes = std::fs::read(&path).map_err(|source| AuditError::ReadPage {
        path: path.clone(),
        source,
    })?;
    Ok(parse_landing_page(&String::from_utf8_lossy(&bytes)))
}

/// Reads the canonical URL (falling back to og:url) and the keyword list.
pub fn parse_landing_page(html: &str) -> LandingPageInfo {
    let document = Html::parse_document(html);

    let canonical = Selector::parse(r#"link[rel~="canonical"][href]"#).unwrap();
    let og_url = Selector::parse(r#"meta[property="og:url"][content]"#).unwrap();
    let keywords = Selector::parse(r#"meta[name="keywords"][content]"#).unwrap();

    let base_url = document
        .select(&canonical)
        .find_map(|el| el.value().attr("href").and_then(normalize_base_url))
        .or_else(|| {
            document
                .select(&og_url)
                .find_map(|el| el.value().attr("content").and_then(normalize_base_url))
        });

    let keywords = document
        .select(&keywords)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| {
            content
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    LandingPageInfo { base_url, keywords }
}

/// Turns the root argument into an absolute, lexically normalised path.
pub fn absolute_root(root: &Path) -> Result<PathBuf, AuditError> {
    let absolute = if root.is_absolute() {
        root.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|source| AuditError::RootInaccessible {
            path: root.to_path_buf(),
            source,
        })?;
        cwd.join(root)
    };
    Ok(normalize_path(&absolute))
}

fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
