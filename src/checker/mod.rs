// src/checker/mod.rs
// =============================================================================
// This module contains the per-link and per-page checking logic.
//
// Submodules:
// - resolve: Maps internal hrefs to files on disk (clean URL conventions)
// - classify: Decides whether an href is ignored, internal or external
// - html: Reads headings, structured data, breadcrumbs and links from a page
// - http: Checks external URLs concurrently (HEAD, then GET)
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers write `checker::PathResolver` instead of
// `checker::resolve::PathResolver`.
// =============================================================================

mod classify;
mod html;
mod http;
mod resolve;

pub use classify::{LinkClass, LinkClassifier};
pub use html::{extract_page_signals, is_breadcrumb, ElementPredicate};
pub use http::{check_external_links, ExternalVerdict, HttpProber, Prober};
pub use resolve::{normalize_path, PathResolver, Resolution};

#[cfg(test)]
pub use http::{ProbeError, ProbeMethod, UnreachableKind, Verdict};
