// src/crawl/index.rs
// =============================================================================
// The in-memory link graph of the site.
//
// Nodes are the discovered pages (PageRecord). Edges are not stored; each
// page only keeps how many distinct (source page, href) pairs resolved to it.
// That inbound count is all the orphan check and the "most linked" ranking
// need.
// =============================================================================

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Name of the page a folder URL ("/blog/") is served from.
pub const DIRECTORY_INDEX: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// Absolute path, the identity of the page
    #[serde(skip)]
    pub path: PathBuf,
    pub rel_path: String,
    pub h1_count: usize,
    pub has_schema: bool,
    pub has_breadcrumb: bool,
    pub inbound_count: usize,
}

impl PageRecord {
    pub fn new(path: PathBuf, rel_path: String) -> Self {
        Self {
            path,
            rel_path,
            h1_count: 0,
            has_schema: false,
            has_breadcrumb: false,
            inbound_count: 0,
        }
    }

    pub fn is_directory_index(&self) -> bool {
        self.path
            .file_name()
            .is_some_and(|name| name == DIRECTORY_INDEX)
    }
}

#[derive(Debug, Default)]
pub struct PageIndex {
    pages: Vec<PageRecord>,
    by_path: HashMap<PathBuf, usize>,
    resolved: HashSet<(PathBuf, String)>,
}

impl PageIndex {
    /// Adds a page. Returns false (and keeps the first record) if a page with
    /// the same path is already indexed.
    pub fn insert(&mut self, record: PageRecord) -> bool {
        if self.by_path.contains_key(&record.path) {
            return false;
        }
        self.by_path.insert(record.path.clone(), self.pages.len());
        self.pages.push(record);
        true
    }

    pub fn get(&self, path: &Path) -> Option<&PageRecord> {
        self.by_path.get(path).map(|&i| &self.pages[i])
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut PageRecord> {
        self.by_path.get(path).map(|&i| &mut self.pages[i])
    }

    /// Counts a successful resolution of `href` on `source` to `target`.
    ///
    /// Repeating the same href on the same page counts once. Links to files
    /// that are not indexed pages (images, PDFs) are not counted. Returns
    /// whether the target's inbound count changed.
    pub fn record_resolution(&mut self, source: &Path, href: &str, target: &Path) -> bool {
        let Some(&i) = self.by_path.get(target) else {
            return false;
        };
        if !self
            .resolved
            .insert((source.to_path_buf(), href.to_string()))
        {
            return false;
        }
        self.pages[i].inbound_count += 1;
        true
    }

    /// Pages in discovery order.
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// Pages nothing links to, directory index pages excepted.
    pub fn orphans(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages
            .iter()
            .filter(|page| !page.is_directory_index() && page.inbound_count == 0)
    }

    /// The `n` most linked pages; equal counts keep discovery order.
    pub fn most_linked(&self, n: usize) -> Vec<&PageRecord> {
        let mut ranked: Vec<&PageRecord> = self.pages.iter().collect();
        ranked.sort_by(|a, b| b.inbound_count.cmp(&a.inbound_count));
        ranked.truncate(n);
        ranked
    }
}
