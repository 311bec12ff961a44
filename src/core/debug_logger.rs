use std::collections::HashMap;
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Local;
use flate2::{write::GzEncoder, Compression};
use fs2::FileExt;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Hardcoded rotation policy
const LOG_ROTATION_SIZE_MB: u64 = 8;
const MAX_ARCHIVES: u32 = 5;
const ROTATION_CHECK_INTERVAL: u32 = 200;

pub const DEBUG_ENV_VAR: &str = "REACHPROBE_DEBUG";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,                            // ISO-8601 with timezone
    pub level: String,                                // DEBUG, ERROR, PERF, PROBE
    pub component: String,                            // Component name
    pub event: String,                                // Event type
    pub message: String,                              // Human readable message (redacted)
    pub correlation_id: Option<String>,               // Ties probe_start to probe_end
    pub fields: HashMap<String, serde_json::Value>,   // Structured data
}

struct RotatingLogger {
    log_path: PathBuf,
    write_count: AtomicU32,
}

impl RotatingLogger {
    fn new(log_path: PathBuf) -> Self {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        Self {
            log_path,
            write_count: AtomicU32::new(0),
        }
    }

    fn write_with_rotation(&self, json_line: &str) -> Result<(), std::io::Error> {
        if self.write_count.fetch_add(1, Ordering::Relaxed) % ROTATION_CHECK_INTERVAL == 0 {
            let _ = self.rotate_if_needed(); // Rotation errors must not stop logging
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        writeln!(file, "{}", json_line)?;
        Ok(())
    }

    fn rotate_if_needed(&self) -> Result<(), std::io::Error> {
        if !self.needs_rotation()? {
            return Ok(());
        }

        // Another process may be rotating the same file
        let lock_path = self.log_path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        match lock_file.try_lock_exclusive() {
            Ok(()) => {
                if self.needs_rotation()? {
                    self.perform_rotation()?;
                }
                let _ = std::fs::remove_file(&lock_path);
                Ok(())
            }
            Err(_) => Ok(()),
        }
    }

    fn needs_rotation(&self) -> Result<bool, std::io::Error> {
        if !self.log_path.exists() {
            return Ok(false);
        }

        let metadata = std::fs::metadata(&self.log_path)?;
        Ok(metadata.len() >= LOG_ROTATION_SIZE_MB * 1024 * 1024)
    }

    fn base_name(&self) -> String {
        self.log_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "reachprobe-debug".to_string())
    }

    fn log_dir(&self) -> &Path {
        self.log_path.parent().unwrap_or_else(|| Path::new("."))
    }

    fn perform_rotation(&self) -> Result<(), std::io::Error> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let archive_name = format!("{}.{}.gz", self.base_name(), timestamp);
        let archive_path = self.log_dir().join(archive_name);

        // Move aside first so writers start a fresh file immediately
        let temp_path = self.log_path.with_extension("rotating");
        std::fs::rename(&self.log_path, &temp_path)?;

        let source_file = File::open(&temp_path)?;
        let target_file = File::create(&archive_path)?;
        let mut encoder = GzEncoder::new(target_file, Compression::default());
        std::io::copy(&mut BufReader::new(source_file), &mut encoder)?;
        encoder.finish()?;

        std::fs::remove_file(&temp_path)?;

        let _ = self.cleanup_old_archives();

        Ok(())
    }

    fn cleanup_old_archives(&self) -> Result<(), std::io::Error> {
        let prefix = format!("{}.", self.base_name());

        let mut archives = Vec::new();
        for entry in std::fs::read_dir(self.log_dir())? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();

            if name.starts_with(&prefix) && name.ends_with(".gz") {
                archives.push((entry.path(), entry.metadata()?.modified()?));
            }
        }

        // Keep only the most recent MAX_ARCHIVES
        archives.sort_by_key(|(_, modified)| *modified);
        if archives.len() > MAX_ARCHIVES as usize {
            let to_remove = archives.len() - MAX_ARCHIVES as usize;
            for (path, _) in archives.iter().take(to_remove) {
                let _ = std::fs::remove_file(path);
            }
        }

        Ok(())
    }
}

/// Opt-in JSON Lines debug logger
///
/// Disabled unless `REACHPROBE_DEBUG` is truthy. All write failures are
/// swallowed: a broken log never affects a probe.
pub struct DebugLogger {
    enabled: bool,
    rotating_logger: Option<Arc<Mutex<RotatingLogger>>>,
    session_id: String,
    redaction_patterns: Vec<(Regex, &'static str)>,
}

impl DebugLogger {
    pub fn new() -> Self {
        let enabled = Self::parse_debug_enabled();
        let log_path = if enabled { Some(Self::get_log_path()) } else { None };
        Self::build(log_path)
    }

    /// Logger that always writes to `log_path`, regardless of environment
    pub fn with_path(log_path: PathBuf) -> Self {
        Self::build(Some(log_path))
    }

    fn build(log_path: Option<PathBuf>) -> Self {
        let session_id = Uuid::new_v4().to_string()[..8].to_string();
        let rotating_logger =
            log_path.map(|path| Arc::new(Mutex::new(RotatingLogger::new(path))));

        Self {
            enabled: rotating_logger.is_some(),
            rotating_logger,
            session_id,
            redaction_patterns: Self::compile_redaction_patterns(),
        }
    }

    /// Supports: true/false, 1/0, yes/no, on/off (case insensitive)
    fn parse_debug_enabled() -> bool {
        env::var(DEBUG_ENV_VAR)
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
            .unwrap_or(false)
    }

    /// `~/.reachprobe/reachprobe-debug.log`, falling back to the working directory
    pub fn get_log_path() -> PathBuf {
        let mut log_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        log_path.push(".reachprobe");
        log_path.push("reachprobe-debug.log");
        log_path
    }

    fn compile_redaction_patterns() -> Vec<(Regex, &'static str)> {
        let patterns = [
            (r"(?i)(https?://)[^/\s@]+@", "${1}[REDACTED]@"),
            (r"(?i)bearer[:\s]+[^\s]+", "[REDACTED]"),
            (r"(?i)authorization[:=\s]+[^\s]+", "[REDACTED]"),
            (r"(?i)token[:=\s]+[^\s]+", "[REDACTED]"),
            (r"(?i)password[:=\s]+[^\s]+", "[REDACTED]"),
            (r"(?i)api[_-]?key[:=\s]+[^\s]+", "[REDACTED]"),
            (r"(?i)secret[:=\s]+[^\s]+", "[REDACTED]"),
        ];

        patterns
            .iter()
            .filter_map(|(pattern, replacement)| {
                Regex::new(pattern).ok().map(|regex| (regex, *replacement))
            })
            .collect()
    }

    /// Scrub credentials and token-like strings from a message
    pub fn redact_sensitive_data(&self, text: &str) -> String {
        let mut redacted = text.to_string();

        for (regex, replacement) in &self.redaction_patterns {
            redacted = regex.replace_all(&redacted, *replacement).to_string();
        }

        // Long opaque strings are probably tokens
        if redacted.len() > 100
            && !redacted.contains(' ')
            && redacted
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-_".contains(c))
        {
            redacted = format!("[REDACTED_LONG_STRING_{}chars]", redacted.len());
        }

        redacted
    }

    fn log_sync(
        &self,
        level: &str,
        component: &str,
        event: &str,
        message: &str,
        correlation_id: Option<String>,
        fields: HashMap<String, serde_json::Value>,
    ) {
        if !self.enabled {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            level: level.to_string(),
            component: component.to_string(),
            event: event.to_string(),
            message: self.redact_sensitive_data(message),
            correlation_id: correlation_id.or_else(|| Some(self.session_id.clone())),
            fields,
        };

        if let Some(logger) = &self.rotating_logger {
            if let Ok(logger) = logger.lock() {
                if let Ok(json_line) = serde_json::to_string(&entry) {
                    let _ = logger.write_with_rotation(&json_line);
                }
            }
        }
    }

    pub fn debug_sync(&self, component: &str, event: &str, message: &str) {
        self.log_sync("DEBUG", component, event, message, None, HashMap::new());
    }

    pub fn error_sync(&self, component: &str, event: &str, message: &str) {
        self.log_sync("ERROR", component, event, message, None, HashMap::new());
    }

    pub fn performance_sync(&self, component: &str, operation: &str, duration_ms: u64) {
        let mut fields = HashMap::new();
        fields.insert("duration_ms".to_string(), serde_json::Value::Number(duration_ms.into()));

        self.log_sync("PERF", component, "operation_complete", operation, None, fields);
    }

    pub fn probe_start(&self, url: &str, timeout_ms: u64, correlation_id: String) {
        let mut fields = HashMap::new();
        fields.insert(
            "url".to_string(),
            serde_json::Value::String(self.redact_sensitive_data(url)),
        );
        fields.insert("timeout_ms".to_string(), serde_json::Value::Number(timeout_ms.into()));

        self.log_sync(
            "PROBE",
            "Prober",
            "probe_start",
            &format!("Probing {} (timeout {}ms)", url, timeout_ms),
            Some(correlation_id),
            fields,
        );
    }

    pub fn probe_end(
        &self,
        category: &str,
        http_status: Option<u16>,
        duration_ms: u64,
        correlation_id: String,
    ) {
        let mut fields = HashMap::new();
        fields.insert("category".to_string(), serde_json::Value::String(category.to_string()));
        fields.insert("duration_ms".to_string(), serde_json::Value::Number(duration_ms.into()));

        if let Some(code) = http_status {
            fields.insert("http_status".to_string(), serde_json::Value::Number(code.into()));
        }

        self.log_sync(
            "PROBE",
            "Prober",
            "probe_end",
            &format!("Probe completed: {} ({}ms)", category, duration_ms),
            Some(correlation_id),
            fields,
        );
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn get_session_id(&self) -> &str {
        &self.session_id
    }
}

impl Default for DebugLogger {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_debug_logger() -> DebugLogger {
    DebugLogger::new()
}
