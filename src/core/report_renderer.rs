// Terminal and JSON rendering for probe reports
use crate::core::probe::ProbeReport;
use ansi_term::Colour::{Green, Red, Yellow};
use ansi_term::Style;

/// Longest body excerpt line shown before wrapping
const MAX_LINE_LENGTH: usize = 100;

/// Renders a `ProbeReport` for display
pub struct ReportRenderer {
    color: bool,
}

impl ReportRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Human readable report
    ///
    /// Layout:
    /// - `✓ Reachable: HTTP <status> (<elapsed>ms)` or `✗ Unreachable: <error>`
    /// - `Headers:` block, one `name: value` per line, sorted by name
    /// - `Body sample:` block, success only
    /// - `Troubleshooting:` block, failures only
    pub fn render_text(&self, report: &ProbeReport) -> String {
        let result = &report.result;
        let mut out = Vec::new();

        out.push(format!("Target: {}", report.url));

        if result.ok {
            let status = result.status.unwrap_or_default();
            let line = format!("✓ Reachable: HTTP {} ({}ms)", status, report.elapsed_ms);
            out.push(self.paint(Style::new().fg(Green).bold(), &line));
        } else {
            let error = result.error.as_deref().unwrap_or("unknown error");
            let line = format!("✗ Unreachable: {}", error);
            out.push(self.paint(Style::new().fg(Red).bold(), &line));
        }

        if let Some(headers) = result.headers.as_ref().filter(|h| !h.is_empty()) {
            out.push(String::new());
            out.push(self.paint(Style::new().bold(), "Headers:"));
            for (name, value) in headers {
                out.push(format!("  {}: {}", name, value));
            }
        }

        if let Some(body) = &result.body_sample {
            out.push(String::new());
            out.push(self.paint(Style::new().bold(), "Body sample:"));
            if body.trim().is_empty() {
                out.push("  (empty)".to_string());
            } else {
                out.extend(wrap_excerpt(body));
            }
        }

        if !report.hints.is_empty() {
            out.push(String::new());
            out.push(self.paint(Style::new().fg(Yellow).bold(), "Troubleshooting:"));
            for hint in &report.hints {
                out.push(format!("  - {}", hint));
            }
        }

        out.join("\n")
    }

    /// Pretty-printed JSON report
    pub fn render_json(&self, report: &ProbeReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Indent body lines and break overly long ones on char boundaries
fn wrap_excerpt(body: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for line in body.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(MAX_LINE_LENGTH) {
            lines.push(format!("  {}", chunk.iter().collect::<String>()));
        }
    }
    lines
}
