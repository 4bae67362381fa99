// src/checker/classify.rs
// =============================================================================
// Sorts every href found on a page into one of four buckets:
//
//   Ignored           - anchors, javascript:, mailto:, tel:, tracking paths
//   External          - http(s) links to another site (checked over HTTP)
//   InternalAbsolute  - http(s) links that start with our own base URL
//   InternalRelative  - everything else ("/blog/post", "about", "../x")
//
// Internal links also get URL-convention warnings here. Those warnings do not
// depend on whether the link resolves.
// =============================================================================

use super::resolve::clean_href;
use crate::config::SiteConfig;
use crate::report::{Finding, WarningKind};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClass {
    Ignored,
    External(String),
    /// `href` is the original absolute URL, `path` the part after the base URL
    InternalAbsolute { href: String, path: String },
    InternalRelative(String),
}

impl LinkClass {
    /// The href handed to the PathResolver, if the link is internal.
    pub fn resolution_href(&self) -> Option<&str> {
        match self {
            LinkClass::InternalAbsolute { path, .. } => Some(path),
            LinkClass::InternalRelative(href) => Some(href),
            LinkClass::Ignored | LinkClass::External(_) => None,
        }
    }

    /// URL-convention warnings for an internal link found on `source`.
    ///
    /// A link that is only a fragment or a query string once cleaned gets no
    /// warnings at all, same as it gets no resolution.
    pub fn structural_findings(&self, source: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        let Some(target) = self.resolution_href() else {
            return findings;
        };
        let cleaned = clean_href(target);
        if cleaned.is_empty() {
            return findings;
        }

        if let LinkClass::InternalAbsolute { href, .. } = self {
            findings.push(Finding::warning(
                source,
                WarningKind::AbsoluteInternalUrl,
                format!(
                    "Internal link using absolute URL: {} (should be relative or root-relative)",
                    href
                ),
            ));
        }

        if cleaned.ends_with(".html") || cleaned.ends_with(".htm") {
            findings.push(Finding::warning(
                source,
                WarningKind::HtmlExtension,
                format!("Link contains .html extension: {} (should use Clean URL)", target),
            ));
        }

        if let LinkClass::InternalRelative(href) = self {
            if !href.starts_with('/') {
                findings.push(Finding::warning(
                    source,
                    WarningKind::RelativePath,
                    format!("Relative path used: {} (recommend starting with /)", href),
                ));
            }
        }

        findings
    }
}

pub struct LinkClassifier<'a> {
    config: &'a SiteConfig,
}

impl<'a> LinkClassifier<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, raw_href: &str) -> LinkClass {
        if self.config.is_ignored_href(raw_href) {
            return LinkClass::Ignored;
        }

        if !is_web_url(raw_href) {
            return LinkClass::InternalRelative(raw_href.to_string());
        }

        match self.config.base_url.as_deref() {
            Some(base) if raw_href.starts_with(base) => {
                let rest = &raw_href[base.len()..];
                let path = if rest.is_empty() { "/" } else { rest };
                LinkClass::InternalAbsolute {
                    href: raw_href.to_string(),
                    path: path.to_string(),
                }
            }
            _ => LinkClass::External(raw_href.to_string()),
        }
    }
}

/// True for http:// and https:// URLs (scheme compared case-insensitively).
fn is_web_url(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        // e.g. "https://" with an empty host still has a web scheme
        Err(_) => {
            let lower = href.to_ascii_lowercase();
            lower.starts_with("http://") || lower.starts_with("https://")
        }
    }
}
