// src/crawl/discover.rs
// =============================================================================
// Finds every HTML page below the site root.
//
// Rules:
// - only regular files ending in ".html"
// - ignored folders (.git, node_modules, ...) are pruned, never entered
// - files whose name contains an ignored substring ("google", "404.html")
//   are skipped
//
// Entries are visited sorted by file name, so two runs over the same folder
// discover pages in the same order.
// =============================================================================

use crate::config::SiteConfig;
use crate::error::AuditError;
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Lists the pages to audit, or fails if the root itself is unusable.
pub fn discover_pages(config: &SiteConfig) -> Result<Vec<PathBuf>, AuditError> {
    let root = config.root_dir.as_path();

    let metadata = std::fs::metadata(root).map_err(|source| AuditError::RootInaccessible {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(AuditError::NotADirectory(root.to_path_buf()));
    }

    let mut pages = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(config, entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let path = source.path().unwrap_or(root).to_path_buf();
                warn!("{}", AuditError::Walk { path, source });
                continue;
            }
        };

        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !file_name.ends_with(".html") || config.is_ignored_file(&file_name) {
            continue;
        }
        if has_ignored_segment(config, root, entry.path()) {
            continue;
        }

        pages.push(entry.into_path());
    }

    Ok(pages)
}

/// The page path relative to the root, always with "/" separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_ignored_dir(config: &SiteConfig, entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && config.is_ignored_dir(&entry.file_name().to_string_lossy())
}

fn has_ignored_segment(config: &SiteConfig, root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .any(|c| config.is_ignored_dir(&c.as_os_str().to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, file: &str) {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<html></html>").unwrap();
    }

    #[test]
    fn test_discovers_html_only_and_skips_ignored() {
        let dir = TempDir::new().unwrap();
        for file in [
            "index.html",
            "about.html",
            "blog/post.html",
            "blog/notes.htm",
            "style.css",
            "google1234abcd.html",
            "404.html",
            "node_modules/pkg/readme.html",
            ".git/hooks/page.html",
        ] {
            touch(dir.path(), file);
        }

        let config = SiteConfig::new(dir.path());
        let found: Vec<String> = discover_pages(&config)
            .unwrap()
            .iter()
            .map(|p| relative_path(dir.path(), p))
            .collect();

        assert_eq!(found, vec!["about.html", "blog/post.html", "index.html"]);
    }

    #[test]
    fn test_extra_ignored_folder() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.html");
        touch(dir.path(), "drafts/wip.html");

        let mut config = SiteConfig::new(dir.path());
        config.ignore_paths.insert("drafts".to_string());
        assert_eq!(discover_pages(&config).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::new(dir.path().join("nope"));
        assert!(matches!(
            discover_pages(&config),
            Err(AuditError::RootInaccessible { .. })
        ));
    }

    #[test]
    fn test_file_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.html");
        let config = SiteConfig::new(dir.path().join("index.html"));
        assert!(matches!(discover_pages(&config), Err(AuditError::NotADirectory(_))));
    }

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = Path::new("/site");
        assert_eq!(relative_path(root, Path::new("/site/blog/post.html")), "blog/post.html");
    }
}
