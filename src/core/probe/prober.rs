/*!
Reachability probe execution.

Runs a single diagnostic GET against a target and classifies what happened.
Every exit path produces a value: malformed targets, client construction
failures, transport failures and HTTP errors are all reported through
`FetchOutcome` / `FetchResult`, never propagated.

## Entry points

- [`probe`]: blocking, default client, returns the flat `FetchResult`
- [`probe_with`]: async, caller-supplied client, returns the tagged outcome
- [`probe_report`]: async, wraps the outcome with timing and troubleshooting hints
*/

use crate::core::debug_logger::get_debug_logger;
use crate::core::probe::classify::classify_response;
use crate::core::probe::client::{ClientError, IsahcProbeClient, ProbeClient, RawResponse};
use crate::core::probe::target::{parse_target_url, redact_userinfo};
use crate::core::probe::types::*;
use crate::core::troubleshoot::hints_for;
use std::time::{Duration, Instant};

/// Probe `url` once, blocking the calling thread for at most about `timeout`
///
/// Uses the production client with default options apart from the timeout.
pub fn probe(url: &str, timeout: Duration) -> FetchResult {
    let options = ProbeOptions::with_timeout(timeout);
    let client = default_client();
    futures::executor::block_on(probe_with(client.as_ref(), url, &options)).into()
}

/// Probe `url` once with the given client
pub async fn probe_with(
    client: &dyn ProbeClient,
    url: &str,
    options: &ProbeOptions,
) -> FetchOutcome {
    let logger = get_debug_logger();
    let correlation_id = uuid::Uuid::new_v4().to_string()[..8].to_string();
    let start = Instant::now();

    let bounded = options.bounded();
    if bounded.timeout != options.timeout {
        logger.debug_sync(
            "Prober",
            "timeout_capped",
            &format!("Timeout capped at {}s", bounded.timeout.as_secs()),
        );
    }

    logger.probe_start(
        &redact_userinfo(url),
        bounded.timeout.as_millis() as u64,
        correlation_id.clone(),
    );

    let outcome = match parse_target_url(url) {
        // The HTTP stack reads a zero timeout as "no limit"
        Ok(_) if bounded.timeout.is_zero() => FetchOutcome::TransportError {
            kind: TransportKind::Timeout,
            reason: "timed out after 0ms".to_string(),
        },
        Ok(target) => classify_response(client.get(target.as_str(), &bounded).await),
        Err(e) => FetchOutcome::OtherError {
            message: e.to_string(),
        },
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    logger.probe_end(
        outcome.category(),
        outcome.status(),
        duration_ms,
        correlation_id,
    );
    logger.performance_sync("Prober", "probe", duration_ms);
    if let Some(error) = outcome.error_message() {
        logger.error_sync("Prober", "probe_failed", &error);
    }

    outcome
}

/// Probe `url` once and wrap the result for display
pub async fn probe_report(
    client: &dyn ProbeClient,
    url: &str,
    options: &ProbeOptions,
) -> ProbeReport {
    let checked_at = get_local_timestamp();
    let start = Instant::now();

    let outcome = probe_with(client, url, options).await;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let transport_kind = match &outcome {
        FetchOutcome::TransportError { kind, .. } => Some(*kind),
        _ => None,
    };
    let hints = hints_for(&outcome)
        .into_iter()
        .map(str::to_string)
        .collect();

    ProbeReport {
        url: redact_userinfo(url),
        checked_at,
        elapsed_ms,
        category: outcome.category().to_string(),
        transport_kind,
        result: outcome.into(),
        hints,
    }
}

/// Production client, or a stand-in that reports why it could not be created
pub fn default_client() -> Box<dyn ProbeClient> {
    match IsahcProbeClient::new() {
        Ok(client) => Box::new(client),
        Err(error) => Box::new(UnavailableClient { error }),
    }
}

/// Client that fails every request with its construction error
struct UnavailableClient {
    error: ClientError,
}

#[async_trait::async_trait]
impl ProbeClient for UnavailableClient {
    async fn get(&self, _url: &str, _options: &ProbeOptions) -> Result<RawResponse, ClientError> {
        Err(self.error.clone())
    }
}

/// Local timezone RFC 3339 timestamp
///
/// ```text
/// "2025-01-25T10:30:45-08:00"
/// ```
pub fn get_local_timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}
