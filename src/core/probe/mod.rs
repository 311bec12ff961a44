//! Reachability Probe Module
//!
//! Single-shot HTTP GET diagnostics for a remote endpoint:
//! - Pluggable client behind the `ProbeClient` trait (isahc in production)
//! - Tagged outcome classification (success, HTTP error, transport error, other)
//! - Flat `FetchResult` view for rendering and JSON output
//! - Never fails to its caller: every outcome is returned as data

pub mod classify;
pub mod client;
pub mod prober;
pub mod types;
pub mod target;

// Re-export public API
pub use classify::{classify_response, collect_headers};
pub use client::{ClientError, IsahcProbeClient, ProbeClient, RawResponse};
pub use prober::{default_client, get_local_timestamp, probe, probe_report, probe_with};
pub use types::{
    FetchOutcome, FetchResult, ProbeOptions, ProbeReport, TransportKind, BODY_SAMPLE_LIMIT,
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, MAX_PROBE_TIMEOUT,
};
pub use target::{parse_target_url, redact_userinfo, UrlError};
