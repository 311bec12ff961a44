use reachprobe::core::hints_for;
use reachprobe::core::probe::{FetchOutcome, TransportKind};
use std::collections::BTreeMap;

fn http_error(code: u16) -> FetchOutcome {
    FetchOutcome::HttpError {
        code,
        reason: "test".to_string(),
        headers: BTreeMap::new(),
    }
}

fn transport(kind: TransportKind) -> FetchOutcome {
    FetchOutcome::TransportError {
        kind,
        reason: "test".to_string(),
    }
}

#[test]
fn test_no_hints_on_success() {
    let outcome = FetchOutcome::Success {
        status: 200,
        headers: BTreeMap::new(),
        body_sample: String::new(),
    };
    assert!(hints_for(&outcome).is_empty());
}

#[test]
fn test_every_failure_has_hints() {
    let mut failures = vec![
        http_error(400),
        http_error(401),
        http_error(403),
        http_error(404),
        http_error(407),
        http_error(429),
        http_error(502),
        FetchOutcome::OtherError {
            message: "bad".to_string(),
        },
    ];
    for kind in [
        TransportKind::Timeout,
        TransportKind::NameResolution,
        TransportKind::ConnectionFailed,
        TransportKind::Tls,
        TransportKind::Protocol,
        TransportKind::Other,
    ] {
        failures.push(transport(kind));
    }

    for outcome in failures {
        assert!(!hints_for(&outcome).is_empty(), "no hints for {:?}", outcome);
    }
}

#[test]
fn test_auth_hint_for_forbidden() {
    let hints = hints_for(&http_error(403));
    assert!(hints.iter().any(|h| h.contains("refused access")));
}

#[test]
fn test_dns_hint_suggests_ip_address() {
    let hints = hints_for(&transport(TransportKind::NameResolution));
    assert!(hints.iter().any(|h| h.contains("IP address")));
}

#[test]
fn test_timeout_hint_mentions_firewall() {
    let hints = hints_for(&transport(TransportKind::Timeout));
    assert!(hints.iter().any(|h| h.contains("firewall")));
}
