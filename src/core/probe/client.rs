//! Probe Client Implementations
//!
//! Provides the HTTP client abstraction used by the prober: a single GET with
//! timeout, redirect policy and a bounded body read.

use crate::core::probe::classify::collect_headers;
use crate::core::probe::types::{ProbeOptions, TransportKind, BODY_SAMPLE_LIMIT};
use futures::io::AsyncReadExt;
use isahc::config::{Configurable, RedirectPolicy};
use isahc::error::ErrorKind;
use isahc::{HttpClient, Request};
use std::collections::BTreeMap;

/// Raw HTTP exchange as seen by the client, before classification
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Final HTTP status code (after redirects, if followed)
    pub status_code: u16,
    /// Response headers, lower-case names, repeated values joined with ", "
    pub headers: BTreeMap<String, String>,
    /// Leading bytes of the response body, at most `BODY_SAMPLE_LIMIT`
    pub body_sample: Vec<u8>,
}

/// Client-side failure where no usable response was produced
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// Failure below the HTTP layer; no status line was received
    #[error("{reason}")]
    Transport { kind: TransportKind, reason: String },
    /// Request could not be built or the response could not be read
    #[error("{0}")]
    Other(String),
}

/// HTTP client used to execute probes
///
/// # Implementation Requirements
/// * Must use GET with the configured User-Agent
/// * Must bound the whole exchange by `options.timeout`
/// * Must read no more than `BODY_SAMPLE_LIMIT` body bytes
/// * Must return any received status as `Ok`, including 4xx/5xx
#[async_trait::async_trait]
pub trait ProbeClient: Send + Sync {
    async fn get(&self, url: &str, options: &ProbeOptions) -> Result<RawResponse, ClientError>;
}

/// Production probe client implementation using isahc
pub struct IsahcProbeClient {
    client: HttpClient,
}

#[async_trait::async_trait]
impl ProbeClient for IsahcProbeClient {
    async fn get(&self, url: &str, options: &ProbeOptions) -> Result<RawResponse, ClientError> {
        let redirect_policy = match options.max_redirects {
            Some(limit) if limit > 0 => RedirectPolicy::Limit(limit),
            _ => RedirectPolicy::None,
        };

        let mut builder = Request::get(url)
            .timeout(options.timeout)
            .redirect_policy(redirect_policy)
            .header("User-Agent", options.user_agent.as_str())
            .header("Accept", "*/*");
        if !options.use_proxy {
            builder = builder.proxy(None::<isahc::http::Uri>);
        }

        let request = builder
            .body(())
            .map_err(|e| ClientError::Other(format!("request creation failed: {}", e)))?;

        let mut response = self
            .client
            .send_async(request)
            .await
            .map_err(|e| classify_isahc_error(&e, options))?;

        let status_code = response.status().as_u16();
        let headers = collect_headers(response.headers());

        // Only the sample is pulled off the wire; the rest is discarded with the response
        let mut body_sample = Vec::with_capacity(BODY_SAMPLE_LIMIT);
        response
            .body_mut()
            .take(BODY_SAMPLE_LIMIT as u64)
            .read_to_end(&mut body_sample)
            .await
            .map_err(|e| classify_body_error(&e, options))?;

        Ok(RawResponse {
            status_code,
            headers,
            body_sample,
        })
    }
}

impl IsahcProbeClient {
    pub fn new() -> Result<Self, ClientError> {
        let client = HttpClient::builder()
            .build()
            .map_err(|e| ClientError::Other(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

/// Map an isahc error to a transport failure or an unexpected one
fn classify_isahc_error(error: &isahc::Error, options: &ProbeOptions) -> ClientError {
    let kind = match error.kind() {
        ErrorKind::Timeout => TransportKind::Timeout,
        ErrorKind::NameResolution => TransportKind::NameResolution,
        ErrorKind::ConnectionFailed => TransportKind::ConnectionFailed,
        ErrorKind::BadServerCertificate | ErrorKind::BadClientCertificate | ErrorKind::TlsEngine => {
            TransportKind::Tls
        }
        ErrorKind::ProtocolViolation
        | ErrorKind::TooManyRedirects
        | ErrorKind::InvalidContentEncoding => TransportKind::Protocol,
        ErrorKind::Io => TransportKind::Other,
        _ => return ClientError::Other(error.to_string()),
    };

    ClientError::Transport {
        kind,
        reason: transport_reason(kind, &error.to_string(), options),
    }
}

/// Body read failures after the status line are either timeouts or unexpected
fn classify_body_error(error: &std::io::Error, options: &ProbeOptions) -> ClientError {
    if error.kind() == std::io::ErrorKind::TimedOut {
        let kind = TransportKind::Timeout;
        return ClientError::Transport {
            kind,
            reason: transport_reason(kind, &error.to_string(), options),
        };
    }
    ClientError::Other(format!("failed to read response body: {}", error))
}

fn transport_reason(kind: TransportKind, detail: &str, options: &ProbeOptions) -> String {
    match kind {
        TransportKind::Timeout => {
            format!("timed out after {}ms", options.timeout.as_millis())
        }
        _ => detail.to_string(),
    }
}
