// src/checker/http.rs
// =============================================================================
// This module checks if external URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests first (lightweight, no body download)
// - Retries once with GET when HEAD answers >= 400, because some servers
//   refuse or mishandle HEAD
// - Turns network failures (DNS, refused connection, timeout) into an
//   "unreachable" verdict instead of an error
// - Runs checks concurrently with a fixed limit on requests in flight
//
// The HTTP transport sits behind the `Prober` trait so the checking logic can
// be exercised without a network.
// =============================================================================

use crate::error::AuditError;
use crate::report::{DeadLinkReason, Finding};
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Sent with every probe so site owners can recognise the audit in their logs.
pub const USER_AGENT: &str = concat!("site-guardian/", env!("CARGO_PKG_VERSION"));

/// Redirects followed before a probe gives up.
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeMethod {
    Head,
    Get,
}

/// Why a URL could not be reached at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnreachableKind {
    Timeout,
    Dns,
    Connect,
    TooManyRedirects,
    Tls,
    Other,
}

/// A network-level failure of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeError {
    pub kind: UnreachableKind,
    pub message: String,
}

/// Issues one request and reports the final HTTP status code
/// (after redirects).
pub trait Prober {
    async fn probe(&self, method: ProbeMethod, url: &str) -> Result<u16, ProbeError>;
}

/// Liveness of one external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Answered with a status below 400
    Alive { status: u16 },
    /// Answered with a status of 400 or more to both HEAD and GET
    Dead { status: u16 },
    /// No HTTP answer at all
    Unreachable { kind: UnreachableKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalVerdict {
    pub url: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl ExternalVerdict {
    /// Dead and unreachable URLs each become one dead-link finding.
    pub fn to_finding(&self) -> Option<Finding> {
        let reason = match &self.verdict {
            Verdict::Alive { .. } => return None,
            Verdict::Dead { status } => DeadLinkReason::HttpStatus(*status),
            Verdict::Unreachable { kind, .. } => DeadLinkReason::Unreachable(kind.to_string()),
        };
        Some(Finding::dead_external(self.url.clone(), reason))
    }
}

// Checks all external URLs with at most `concurrency` requests in flight
//
// This is a fan-out/fan-in barrier: the returned Vec only exists once every
// check has finished, and it holds exactly one verdict per input URL.
// Completion order is not preserved.
pub async fn check_external_links<P: Prober>(
    prober: &P,
    urls: &[String],
    concurrency: usize,
) -> Vec<ExternalVerdict> {
    let checks = urls
        .iter()
        .cloned()
        .map(move |url| check_single_link(prober, url));

    // .buffer_unordered(n) runs up to n checks at once and yields results
    // as they complete
    stream::iter(checks)
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}

// HEAD first, GET once if HEAD says >= 400
async fn check_single_link<P: Prober>(prober: &P, url: String) -> ExternalVerdict {
    let verdict = match prober.probe(ProbeMethod::Head, &url).await {
        Ok(status) if status < 400 => Verdict::Alive { status },
        Ok(head_status) => {
            log::debug!("HEAD {} returned {}, retrying with GET", url, head_status);
            match prober.probe(ProbeMethod::Get, &url).await {
                Ok(status) if status < 400 => Verdict::Alive { status },
                Ok(status) => Verdict::Dead { status },
                Err(e) => unreachable_verdict(e),
            }
        }
        Err(e) => unreachable_verdict(e),
    };

    ExternalVerdict { url, verdict }
}

fn unreachable_verdict(error: ProbeError) -> Verdict {
    Verdict::Unreachable {
        kind: error.kind,
        message: error.message,
    }
}

/// The real prober, backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> Result<Self, AuditError> {
        // One client for all requests (connection pooling)
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Prober for HttpProber {
    async fn probe(&self, method: ProbeMethod, url: &str) -> Result<u16, ProbeError> {
        let request = match method {
            ProbeMethod::Head => self.client.head(url),
            // Only the status line and headers are read; the body is dropped
            ProbeMethod::Get => self.client.get(url),
        };

        request
            .send()
            .await
            .map(|response| response.status().as_u16())
            .map_err(categorize_error)
    }
}

// Categorizes the different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
fn categorize_error(error: reqwest::Error) -> ProbeError {
    let message = error.to_string();
    let lower = message.to_lowercase();

    let kind = if error.is_timeout() {
        UnreachableKind::Timeout
    } else if error.is_redirect() {
        UnreachableKind::TooManyRedirects
    } else if error.is_connect() {
        if lower.contains("dns") {
            UnreachableKind::Dns
        } else {
            UnreachableKind::Connect
        }
    } else if lower.contains("certificate") || lower.contains("ssl") || lower.contains("tls") {
        UnreachableKind::Tls
    } else {
        UnreachableKind::Other
    };

    ProbeError { kind, message }
}

impl fmt::Display for UnreachableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnreachableKind::Timeout => "request timed out",
            UnreachableKind::Dns => "could not resolve hostname",
            UnreachableKind::Connect => "connection failed",
            UnreachableKind::TooManyRedirects => "too many redirects",
            UnreachableKind::Tls => "SSL certificate error",
            UnreachableKind::Other => "request failed",
        };
        f.write_str(text)
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a Prober trait?
//    - check_external_links only needs "give me a status for this URL"
//    - The tests plug in an in-memory fake that counts calls and requests
//      in flight, so they never touch the network
//
// 2. Why no locks?
//    - Every check returns a plain ExternalVerdict value
//    - Only the caller looks at the collected Vec, after all checks finished
//
// 3. What if one URL hangs?
//    - The client timeout ends that request
//    - Until then it only occupies one of the `concurrency` slots
// -----------------------------------------------------------------------------
