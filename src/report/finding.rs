// src/report/finding.rs
// =============================================================================
// Findings and their penalties.
//
// Every problem the audit discovers becomes one Finding. Findings are never
// changed after they are created; the report keeps them in the order they
// were discovered, and the score is simply 100 minus the sum of penalties.
// =============================================================================

use serde::Serialize;
use std::fmt;

/// Source label used for dead external links. External URLs are checked once
/// per site, not once per page, so they have no single source page.
pub const EXTERNAL_SOURCE: &str = "External";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "finding", rename_all = "snake_case")]
pub enum Finding {
    DeadLink {
        source: String,
        href: String,
        reason: DeadLinkReason,
    },
    Warning {
        source: String,
        kind: WarningKind,
        message: String,
    },
}

/// Why a link is considered dead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum DeadLinkReason {
    /// Internal link with no matching file
    NotFound,
    /// External link answered with a status >= 400 to both HEAD and GET
    HttpStatus(u16),
    /// External link could not be reached at all
    Unreachable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    AbsoluteInternalUrl,
    HtmlExtension,
    RelativePath,
    MissingH1,
    MultipleH1,
    MissingSchema,
    MissingBreadcrumb,
    Orphan,
}

impl WarningKind {
    pub fn penalty(self) -> u32 {
        match self {
            WarningKind::AbsoluteInternalUrl => 2,
            WarningKind::HtmlExtension => 2,
            WarningKind::RelativePath => 2,
            WarningKind::MissingH1 => 5,
            WarningKind::MissingSchema => 2,
            WarningKind::Orphan => 5,
            // informational only
            WarningKind::MultipleH1 | WarningKind::MissingBreadcrumb => 0,
        }
    }
}

impl Finding {
    pub fn dead_internal(source: impl Into<String>, href: impl Into<String>) -> Self {
        Finding::DeadLink {
            source: source.into(),
            href: href.into(),
            reason: DeadLinkReason::NotFound,
        }
    }

    pub fn dead_external(url: impl Into<String>, reason: DeadLinkReason) -> Self {
        Finding::DeadLink {
            source: EXTERNAL_SOURCE.to_string(),
            href: url.into(),
            reason,
        }
    }

    pub fn warning(source: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Finding::Warning {
            source: source.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn penalty(&self) -> u32 {
        match self {
            Finding::DeadLink {
                reason: DeadLinkReason::NotFound,
                ..
            } => 10,
            Finding::DeadLink { .. } => 5,
            Finding::Warning { kind, .. } => kind.penalty(),
        }
    }

    pub fn is_dead_link(&self) -> bool {
        matches!(self, Finding::DeadLink { .. })
    }
}

impl fmt::Display for DeadLinkReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadLinkReason::NotFound => write!(f, "no matching file"),
            DeadLinkReason::HttpStatus(code) => write!(f, "Status: {}", code),
            DeadLinkReason::Unreachable(cause) => write!(f, "Status: Connection Error ({})", cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_table() {
        assert_eq!(Finding::dead_internal("index.html", "/x").penalty(), 10);
        assert_eq!(
            Finding::dead_external("https://x.test", DeadLinkReason::HttpStatus(404)).penalty(),
            5
        );
        assert_eq!(
            Finding::dead_external("https://x.test", DeadLinkReason::Unreachable("timeout".into()))
                .penalty(),
            5
        );
        assert_eq!(Finding::warning("a.html", WarningKind::MissingH1, "").penalty(), 5);
        assert_eq!(Finding::warning("a.html", WarningKind::MultipleH1, "").penalty(), 0);
        assert_eq!(Finding::warning("a.html", WarningKind::MissingSchema, "").penalty(), 2);
        assert_eq!(Finding::warning("a.html", WarningKind::Orphan, "").penalty(), 5);
    }

    #[test]
    fn test_dead_external_source_label() {
        let finding = Finding::dead_external("https://gone.test", DeadLinkReason::HttpStatus(410));
        assert!(matches!(&finding, Finding::DeadLink { source, .. } if source == EXTERNAL_SOURCE));
        assert!(finding.is_dead_link());
    }

    #[test]
    fn test_serializes_with_tags() {
        let finding = Finding::warning("about.html", WarningKind::Orphan, "Orphan page");
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["finding"], "warning");
        assert_eq!(json["kind"], "orphan");
        assert_eq!(json["source"], "about.html");
    }
}
