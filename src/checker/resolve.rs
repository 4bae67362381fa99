// src/checker/resolve.rs
// =============================================================================
// Resolves internal links to files on disk.
//
// A static host serves the same file under several URLs, so one href has up
// to three candidate files, tried in this order:
//   1. <path>.html          "/blog/post"  -> blog/post.html   (clean URL)
//   2. <path>/index.html    "/blog/post"  -> blog/post/index.html
//   3. <path>               "/img/a.png"  -> img/a.png        (exact file)
//
// Root-relative hrefs ("/...") are resolved against the site root, all other
// hrefs against the folder of the page that contains the link.
// =============================================================================

use std::path::{Component, Path, PathBuf};

/// Outcome of resolving one href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing left after removing "#fragment" and "?query"
    Skipped,
    /// The highest-priority candidate that exists as a regular file
    Found(PathBuf),
    /// No candidate exists, so the link is dead
    Missing,
}

#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the candidate files for an already cleaned href, in priority
    /// order. All candidates are lexically normalised.
    pub fn candidates(&self, source_file: &Path, cleaned: &str) -> [PathBuf; 3] {
        let (base, path_part) = match cleaned.strip_prefix('/') {
            Some(_) => (self.root.as_path(), cleaned.trim_start_matches('/')),
            None => (source_file.parent().unwrap_or(&self.root), cleaned),
        };

        [
            normalize_path(&base.join(format!("{}.html", path_part))),
            normalize_path(&base.join(path_part).join("index.html")),
            normalize_path(&base.join(path_part)),
        ]
    }

    pub fn resolve(&self, source_file: &Path, raw_href: &str) -> Resolution {
        let cleaned = clean_href(raw_href);
        if cleaned.is_empty() {
            return Resolution::Skipped;
        }

        self.candidates(source_file, cleaned)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .map_or(Resolution::Missing, Resolution::Found)
    }
}

/// Strips the fragment and then the query string from an href.
pub fn clean_href(href: &str) -> &str {
    let without_fragment = href.split('#').next().unwrap_or_default();
    without_fragment.split('?').next().unwrap_or_default()
}

/// Collapses "." and ".." components without touching the filesystem.
///
/// ".." never climbs above the filesystem root; on a relative path leading
/// ".." components are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "<html></html>").unwrap();
        }
        dir
    }

    #[test]
    fn test_clean_href_strips_fragment_and_query() {
        assert_eq!(clean_href("/blog/post?ref=nav#top"), "/blog/post");
        assert_eq!(clean_href("/blog/post#a?b"), "/blog/post");
        assert_eq!(clean_href("?page=2"), "");
        assert_eq!(clean_href("#section"), "");
    }

    #[test]
    fn test_extension_guess_beats_directory_index_and_exact_file() {
        let dir = site(&["blog/post.html", "blog/post/index.html"]);
        fs::write(dir.path().join("blog/post/raw"), "x").unwrap();
        let resolver = PathResolver::new(dir.path());
        let source = dir.path().join("index.html");

        assert_eq!(
            resolver.resolve(&source, "/blog/post"),
            Resolution::Found(dir.path().join("blog/post.html"))
        );
    }

    #[test]
    fn test_directory_index_beats_exact_match() {
        let dir = site(&["docs/index.html"]);
        let resolver = PathResolver::new(dir.path());
        let source = dir.path().join("index.html");

        assert_eq!(
            resolver.resolve(&source, "/docs/"),
            Resolution::Found(dir.path().join("docs/index.html"))
        );
        assert_eq!(
            resolver.resolve(&source, "/docs"),
            Resolution::Found(dir.path().join("docs/index.html"))
        );
    }

    #[test]
    fn test_exact_match_for_non_html_target() {
        let dir = site(&[]);
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/logo.png"), [0u8; 4]).unwrap();
        let resolver = PathResolver::new(dir.path());

        assert_eq!(
            resolver.resolve(&dir.path().join("index.html"), "/img/logo.png"),
            Resolution::Found(dir.path().join("img/logo.png"))
        );
    }

    #[test]
    fn test_relative_href_uses_source_folder() {
        let dir = site(&["blog/a.html", "blog/b.html", "about.html"]);
        let resolver = PathResolver::new(dir.path());
        let source = dir.path().join("blog/a.html");

        assert_eq!(
            resolver.resolve(&source, "b"),
            Resolution::Found(dir.path().join("blog/b.html"))
        );
        assert_eq!(
            resolver.resolve(&source, "../about.html"),
            Resolution::Found(dir.path().join("about.html"))
        );
        // "about" is not in blog/, so it is dead from there
        assert_eq!(resolver.resolve(&source, "about"), Resolution::Missing);
    }

    #[test]
    fn test_missing_and_skipped() {
        let dir = site(&["index.html"]);
        let resolver = PathResolver::new(dir.path());
        let source = dir.path().join("index.html");

        assert_eq!(resolver.resolve(&source, "/blog/missing"), Resolution::Missing);
        assert_eq!(resolver.resolve(&source, "?utm=1"), Resolution::Skipped);
        // a directory is not a regular file
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        assert_eq!(resolver.resolve(&source, "/empty"), Resolution::Missing);
    }

    #[test]
    fn test_root_href_finds_index() {
        let dir = site(&["index.html"]);
        let resolver = PathResolver::new(dir.path());
        assert_eq!(
            resolver.resolve(&dir.path().join("index.html"), "/"),
            Resolution::Found(dir.path().join("index.html"))
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_path(Path::new("../a/../../b")), PathBuf::from("../../b"));
    }
}
