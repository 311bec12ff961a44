//! Outcome classification
//!
//! Maps raw client results onto the tagged `FetchOutcome`:
//! - status < 400 → `Success` with a lossily decoded body sample
//! - status ≥ 400 → `HttpError` carrying the canonical reason phrase
//! - transport failure → `TransportError`
//! - anything else → `OtherError`

use crate::core::probe::client::{ClientError, RawResponse};
use crate::core::probe::types::{FetchOutcome, BODY_SAMPLE_LIMIT};
use isahc::http::{HeaderMap, StatusCode};
use std::collections::BTreeMap;

/// Classify a raw client result
pub fn classify_response(result: Result<RawResponse, ClientError>) -> FetchOutcome {
    match result {
        Ok(response) => classify_status(response),
        Err(ClientError::Transport { kind, reason }) => FetchOutcome::TransportError { kind, reason },
        Err(ClientError::Other(message)) => FetchOutcome::OtherError { message },
    }
}

fn classify_status(response: RawResponse) -> FetchOutcome {
    let RawResponse {
        status_code,
        headers,
        mut body_sample,
    } = response;

    if status_code >= 400 {
        return FetchOutcome::HttpError {
            code: status_code,
            reason: reason_phrase(status_code),
            headers,
        };
    }

    body_sample.truncate(BODY_SAMPLE_LIMIT);
    FetchOutcome::Success {
        status: status_code,
        headers,
        body_sample: String::from_utf8_lossy(&body_sample).into_owned(),
    }
}

/// Canonical reason phrase for a status code, `Unknown` for unregistered codes
pub fn reason_phrase(status_code: u16) -> String {
    StatusCode::from_u16(status_code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown")
        .to_string()
}

/// Flatten a header map into name → value
///
/// Repeated headers are joined with ", " in arrival order. Values that are not
/// valid UTF-8 are decoded lossily rather than dropped.
pub fn collect_headers(header_map: &HeaderMap) -> BTreeMap<String, String> {
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in header_map.iter() {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        headers
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    headers
}
