// Troubleshooting guidance for failed probes
use crate::core::probe::{FetchOutcome, TransportKind};

const HINT_CHECK_URL: &str = "Check the URL: it must be absolute, e.g. http://192.168.1.10:5000/";
const HINT_SAME_NETWORK: &str =
    "Make sure this machine is on the same network (or VPN) as the target host";
const HINT_FIREWALL: &str = "Check that no firewall blocks the port between here and the target";

/// Suggestions for the user, empty when the probe succeeded
pub fn hints_for(outcome: &FetchOutcome) -> Vec<&'static str> {
    match outcome {
        FetchOutcome::Success { .. } => Vec::new(),
        FetchOutcome::HttpError { code, .. } => http_hints(*code),
        FetchOutcome::TransportError { kind, .. } => transport_hints(*kind),
        FetchOutcome::OtherError { .. } => vec![
            HINT_CHECK_URL,
            "Only http:// and https:// targets can be probed",
        ],
    }
}

fn http_hints(code: u16) -> Vec<&'static str> {
    match code {
        401 | 403 => vec![
            "The host is reachable but refused access",
            "Log in through the host's own web UI or check its access control settings",
        ],
        404 => vec![
            "The host is reachable but the path does not exist",
            "Try the root URL of the service",
        ],
        407 => vec!["A proxy between here and the target requires authentication"],
        429 => vec!["The host is rate limiting requests; wait before probing again"],
        500..=599 => vec![
            "The host is reachable but the service behind it is failing",
            "Restart the service or check its logs",
        ],
        _ => vec!["The host is reachable but rejected the request"],
    }
}

fn transport_hints(kind: TransportKind) -> Vec<&'static str> {
    match kind {
        TransportKind::Timeout => vec![
            "The host did not answer in time: it may be asleep, overloaded or filtered",
            HINT_FIREWALL,
            HINT_SAME_NETWORK,
        ],
        TransportKind::NameResolution => vec![
            "The host name could not be resolved",
            "Use the host's IP address instead of its name",
        ],
        TransportKind::ConnectionFailed => vec![
            "Nothing accepted the connection: the service may not be running or listens on another port",
            HINT_FIREWALL,
            HINT_SAME_NETWORK,
        ],
        TransportKind::Tls => vec![
            "The TLS handshake failed: the host may use a self-signed certificate",
            "Try http:// if the service does not serve HTTPS",
        ],
        TransportKind::Protocol => vec![
            "The host answered with something that is not valid HTTP or redirected too often",
            "Check that the port belongs to a web service",
        ],
        TransportKind::Other => vec![HINT_SAME_NETWORK, HINT_FIREWALL],
    }
}
