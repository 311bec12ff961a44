use reachprobe::core::probe::{FetchResult, ProbeReport, TransportKind};
use reachprobe::core::ReportRenderer;
use std::collections::BTreeMap;

fn success_report() -> ProbeReport {
    let mut headers = BTreeMap::new();
    headers.insert("server".to_string(), "nas-web".to_string());
    headers.insert("content-type".to_string(), "text/html".to_string());

    ProbeReport {
        url: "http://192.168.1.10:5000/".to_string(),
        checked_at: "2025-01-25T10:30:45-08:00".to_string(),
        elapsed_ms: 42,
        category: "success".to_string(),
        transport_kind: None,
        result: FetchResult {
            ok: true,
            status: Some(200),
            headers: Some(headers),
            body_sample: Some("<html>\n<body>NAS</body>\n</html>".to_string()),
            error: None,
        },
        hints: Vec::new(),
    }
}

fn timeout_report() -> ProbeReport {
    ProbeReport {
        url: "http://192.168.1.10:5000/".to_string(),
        checked_at: "2025-01-25T10:30:45-08:00".to_string(),
        elapsed_ms: 5003,
        category: "transport_error".to_string(),
        transport_kind: Some(TransportKind::Timeout),
        result: FetchResult {
            ok: false,
            status: None,
            headers: None,
            body_sample: None,
            error: Some("URLError: timed out after 5000ms".to_string()),
        },
        hints: vec!["Check the firewall".to_string()],
    }
}

#[test]
fn test_success_rendering() {
    let renderer = ReportRenderer::new(false);
    let text = renderer.render_text(&success_report());

    assert!(text.contains("Target: http://192.168.1.10:5000/"));
    assert!(text.contains("✓ Reachable: HTTP 200 (42ms)"));
    assert!(text.contains("Headers:"));
    assert!(text.contains("Body sample:"));
    assert!(text.contains("  <body>NAS</body>"));
    assert!(!text.contains("Troubleshooting:"));
}

#[test]
fn test_headers_are_sorted() {
    let renderer = ReportRenderer::new(false);
    let text = renderer.render_text(&success_report());

    let content_type = text.find("content-type: text/html").unwrap();
    let server = text.find("server: nas-web").unwrap();
    assert!(content_type < server);
}

#[test]
fn test_failure_rendering_omits_body_and_shows_hints() {
    let renderer = ReportRenderer::new(false);
    let text = renderer.render_text(&timeout_report());

    assert!(text.contains("✗ Unreachable: URLError: timed out after 5000ms"));
    assert!(!text.contains("Body sample:"));
    assert!(!text.contains("Headers:"));
    assert!(text.contains("Troubleshooting:"));
    assert!(text.contains("  - Check the firewall"));
}

#[test]
fn test_empty_body_is_marked() {
    let mut report = success_report();
    report.result.body_sample = Some(String::new());

    let text = ReportRenderer::new(false).render_text(&report);
    assert!(text.contains("(empty)"));
}

#[test]
fn test_long_body_lines_are_wrapped() {
    let mut report = success_report();
    report.result.body_sample = Some("y".repeat(250));

    let text = ReportRenderer::new(false).render_text(&report);
    let body_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("  y")).collect();
    assert_eq!(body_lines.len(), 3);
}

#[test]
fn test_plain_output_has_no_escape_codes() {
    let text = ReportRenderer::new(false).render_text(&timeout_report());
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn test_colored_output_has_escape_codes() {
    let text = ReportRenderer::new(true).render_text(&timeout_report());
    assert!(text.contains('\u{1b}'));
}

#[test]
fn test_json_rendering() {
    let renderer = ReportRenderer::default();
    let json = renderer.render_json(&timeout_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["category"], "transport_error");
    assert_eq!(value["transportKind"], "timeout");
    assert_eq!(value["elapsedMs"], 5003);
    assert_eq!(value["result"]["ok"], false);
    assert_eq!(value["result"]["error"], "URLError: timed out after 5000ms");
    assert!(value["result"].get("headers").is_none());
    assert_eq!(value["hints"][0], "Check the firewall");
}

#[test]
fn test_json_success_omits_empty_hints() {
    let json = ReportRenderer::default().render_json(&success_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(value.get("hints").is_none());
    assert!(value.get("transportKind").is_none());
    assert_eq!(value["result"]["bodySample"], "<html>\n<body>NAS</body>\n</html>");
}
