// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Initialize logging (env_logger, RUST_LOG aware, info by default)
// 2. Parse command-line arguments using clap
// 3. Build the site configuration and dispatch to the subcommand handler
// 4. Exit with proper code (0 = audit completed, 2 = the audit could not run)
//
// The health score never changes the exit code: a low score is a result,
// not an error.
// =============================================================================

mod audit; // src/audit.rs - runs the audit phases in order
mod checker; // src/checker/ - link classification, resolution and HTTP checks
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - site configuration and auto-detection
mod crawl; // src/crawl/ - page discovery, page graph and crawl pass
mod error; // src/error.rs - typed errors
mod report; // src/report/ - findings, scoring and output

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use cli::{AuditArgs, Cli, Commands};
use config::SiteConfig;
use log::info;
use std::path::Path;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit(args) => handle_audit(args).await,
        Commands::Detect { root, json } => handle_detect(&root, json),
    }
}

// Handles the 'audit' subcommand
async fn handle_audit(args: AuditArgs) -> Result<i32> {
    let root = config::absolute_root(&args.root)?;

    let mut config = SiteConfig::new(root).with_base_url(args.base_url.as_deref());
    config.ignore_paths.extend(args.ignore_paths);
    config.ignore_url_prefixes.extend(args.ignore_prefixes);
    config.ignore_files_contain.extend(args.ignore_files);
    config.concurrency = args.concurrency;
    config.timeout_secs = args.timeout;
    config.check_external = !args.skip_external;
    config.check_breadcrumbs = args.check_breadcrumbs;
    config.detect_from_landing_page();

    info!(
        "Base URL: {}",
        config.base_url.as_deref().unwrap_or("Not Detected")
    );

    let prober = checker::HttpProber::new(config.timeout())
        .context("failed to set up external link checks")?;

    let report = audit::run_audit(&config, &prober, args.top)
        .await
        .with_context(|| format!("audit of {} failed", config.root_dir.display()))?;

    report::print_report(&report, args.json, args.max_warnings)?;

    Ok(0)
}

// Handles the 'detect' subcommand
fn handle_detect(root: &Path, json: bool) -> Result<i32> {
    let mut config = SiteConfig::new(config::absolute_root(root)?);
    config.detect_from_landing_page();

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("Root: {}", config.root_dir.display());
        println!(
            "Base URL: {}",
            config.base_url.as_deref().unwrap_or("Not Detected")
        );
        if config.keywords.is_empty() {
            println!("Keywords: (none)");
        } else {
            println!("Keywords: {}", config.keywords.join(", "));
        }
        let ignore_paths: Vec<&str> = config.ignore_paths.iter().map(String::as_str).collect();
        println!("Ignored folders: {}", ignore_paths.join(", "));
        println!("Ignored href prefixes: {}", config.ignore_url_prefixes.join(", "));
        println!("Ignored file names containing: {}", config.ignore_files_contain.join(", "));
    }

    Ok(0)
}
