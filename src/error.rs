// src/error.rs
// =============================================================================
// Typed errors for the audit.
//
// Only a few of these are fatal (the root folder is missing, the HTTP client
// cannot be built). Everything that goes wrong with a single page or a single
// link is turned into a finding or a log line instead, so one bad page never
// stops the audit.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    /// The configured root directory cannot be read at all.
    #[error("cannot access root directory {path}: {source}")]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured root exists but is a file.
    #[error("root path {0} is not a directory")]
    NotADirectory(PathBuf),

    /// A single page could not be read. Recovered by skipping the page.
    #[error("failed to read page {path}: {source}")]
    ReadPage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An entry below the root could not be visited during the walk.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The HTTP client used for external checks could not be created.
    #[error("HTTP client initialization error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
