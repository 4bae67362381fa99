// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Subcommands:
// - audit:  crawl a site folder and print the health report
// - detect: show the configuration the audit would use
// =============================================================================

use crate::config::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use crate::report::DEFAULT_TOP_PAGES;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "site-guardian",
    version,
    about = "Audit a static HTML site for broken links, orphan pages and SEO hygiene",
    long_about = "site-guardian walks a folder of HTML pages, resolves every internal link the way \
                  a static host would (clean URLs, folder index pages, exact files), checks external \
                  links over HTTP and prints a 0-100 health score."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit a site folder
    ///
    /// Example: site-guardian audit ./public --base-url https://example.com
    Audit(AuditArgs),

    /// Print the auto-detected site configuration (base URL, keywords, ignore rules)
    Detect {
        /// Site root folder
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output the configuration as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Site root folder (defaults to the current directory)
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Canonical site URL; absolute links starting with it count as internal.
    /// Detected from index.html (canonical link or og:url) when omitted.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Maximum number of external links checked at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Timeout in seconds for each external request
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = parse_timeout)]
    pub timeout: u64,

    /// Number of most-linked pages to list
    #[arg(long, default_value_t = DEFAULT_TOP_PAGES)]
    pub top: usize,

    /// Number of warnings listed in the text report
    #[arg(long, default_value_t = 20)]
    pub max_warnings: usize,

    /// Additional folder name to skip (repeatable)
    #[arg(long = "ignore-path", value_name = "NAME")]
    pub ignore_paths: Vec<String>,

    /// Additional href prefix to ignore (repeatable)
    #[arg(long = "ignore-prefix", value_name = "PREFIX")]
    pub ignore_prefixes: Vec<String>,

    /// Skip HTML files whose name contains this text (repeatable)
    #[arg(long = "ignore-file", value_name = "TEXT")]
    pub ignore_files: Vec<String>,

    /// Do not check external links over the network
    #[arg(long)]
    pub skip_external: bool,

    /// Warn (without penalty) about pages without breadcrumb navigation
    #[arg(long)]
    pub check_breadcrumbs: bool,
}

// At least one request has to be allowed in flight
fn parse_concurrency(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("concurrency must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

// A zero timeout would fail every external request
fn parse_timeout(value: &str) -> Result<u64, String> {
    match value.parse::<u64>() {
        Ok(0) => Err("timeout must be at least 1 second".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
