// src/crawl/mod.rs
// =============================================================================
// This module handles crawling the site folder.
//
// Features:
// - Discovers every HTML page under the root, skipping ignored folders/files
// - Keeps the page graph (inbound link counts per page)
// - Parses each page and routes its links through the checker
//
// Unlike a web crawler there is no queue or depth: every page on disk is
// visited exactly once, in a stable order.
// =============================================================================

mod discover;
mod index;
mod pass;

pub use index::{PageIndex, PageRecord};
pub use pass::{AuditContext, CrawlPass};
