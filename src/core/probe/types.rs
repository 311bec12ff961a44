// Core types for reachability probing
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Maximum number of body bytes kept in a probe result
pub const BODY_SAMPLE_LIMIT: usize = 1024;

/// Default time allowed for connecting, receiving the response and reading the body sample
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest timeout handed to the HTTP stack; larger values overflow its millisecond clock
pub const MAX_PROBE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Default redirect hop limit when redirects are followed
pub const DEFAULT_MAX_REDIRECTS: u32 = 10;

/// Fixed diagnostic user agent sent with every probe
pub const DEFAULT_USER_AGENT: &str = concat!("reachprobe/", env!("CARGO_PKG_VERSION"), " (diagnostic)");

/// Cause of a failure below the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Connect or transfer exceeded the configured timeout
    Timeout,
    /// Host name could not be resolved
    NameResolution,
    /// TCP connection refused or unreachable
    ConnectionFailed,
    /// TLS handshake or certificate failure
    Tls,
    /// Malformed response, redirect loop or bad content encoding
    Protocol,
    /// Any other I/O failure on the connection
    Other,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::NameResolution => write!(f, "name_resolution"),
            TransportKind::ConnectionFailed => write!(f, "connection_failed"),
            TransportKind::Tls => write!(f, "tls"),
            TransportKind::Protocol => write!(f, "protocol"),
            TransportKind::Other => write!(f, "other"),
        }
    }
}

/// Classified outcome of a single probe
///
/// This is the source of truth for branching; `FetchResult` is derived from it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Server answered with a non-error status (2xx, or 3xx that was not followed)
    Success {
        status: u16,
        headers: BTreeMap<String, String>,
        body_sample: String,
    },
    /// Server answered with a status of 400 or above
    HttpError {
        code: u16,
        reason: String,
        headers: BTreeMap<String, String>,
    },
    /// No status line was received
    TransportError { kind: TransportKind, reason: String },
    /// Anything else: malformed URL, request construction, body read failure
    OtherError { message: String },
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    /// Stable category label used in logs and JSON output
    pub fn category(&self) -> &'static str {
        match self {
            FetchOutcome::Success { .. } => "success",
            FetchOutcome::HttpError { .. } => "http_error",
            FetchOutcome::TransportError { .. } => "transport_error",
            FetchOutcome::OtherError { .. } => "other_error",
        }
    }

    /// HTTP status if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchOutcome::Success { status, .. } => Some(*status),
            FetchOutcome::HttpError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Human-readable error line, `None` on success
    ///
    /// Formats:
    /// - `HTTPError <code>: <reason>`
    /// - `URLError: <reason>`
    /// - `Exception: <message>`
    pub fn error_message(&self) -> Option<String> {
        match self {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::HttpError { code, reason, .. } => {
                Some(format!("HTTPError {}: {}", code, reason))
            }
            FetchOutcome::TransportError { reason, .. } => Some(format!("URLError: {}", reason)),
            FetchOutcome::OtherError { message } => Some(format!("Exception: {}", message)),
        }
    }
}

/// Normalized report of a probe outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_sample: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<FetchOutcome> for FetchResult {
    fn from(outcome: FetchOutcome) -> Self {
        let error = outcome.error_message();
        match outcome {
            FetchOutcome::Success {
                status,
                headers,
                body_sample,
            } => FetchResult {
                ok: true,
                status: Some(status),
                headers: Some(headers),
                body_sample: Some(body_sample),
                error: None,
            },
            FetchOutcome::HttpError { headers, .. } => FetchResult {
                ok: false,
                status: None,
                headers: if headers.is_empty() { None } else { Some(headers) },
                body_sample: None,
                error,
            },
            FetchOutcome::TransportError { .. } | FetchOutcome::OtherError { .. } => FetchResult {
                ok: false,
                status: None,
                headers: None,
                body_sample: None,
                error,
            },
        }
    }
}

/// Per-probe request options
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Upper bound for the whole exchange
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Redirect hop limit; `None` disables redirect following
    pub max_redirects: Option<u32>,
    /// Honor proxy settings from the environment
    pub use_proxy: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: Some(DEFAULT_MAX_REDIRECTS),
            use_proxy: true,
        }
    }
}

impl ProbeOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Copy with the timeout capped at `MAX_PROBE_TIMEOUT`
    pub fn bounded(&self) -> Self {
        Self {
            timeout: self.timeout.min(MAX_PROBE_TIMEOUT),
            ..self.clone()
        }
    }
}

/// Probe result with the context needed to display it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    /// URL as supplied by the caller, credentials redacted
    pub url: String,
    /// Local timezone RFC 3339 timestamp of probe start
    pub checked_at: String,
    /// Wall-clock duration of the probe
    pub elapsed_ms: u64,
    /// Outcome category: success | http_error | transport_error | other_error
    pub category: String,
    /// Transport failure cause, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_kind: Option<TransportKind>,
    pub result: FetchResult,
    /// Troubleshooting suggestions for failed probes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}
