//! Structured JSONL logging for the tracing layer.
//!
//! Provides:
//! - [`LogEntry`]: one JSONL record with required and optional fields.
//! - [`LogEmitter`]: writes records to stderr, a file, or an in-memory buffer.
//! - [`validate_log_line`]: checks a single JSONL line against the schema.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::api::EntryPoint;
use crate::result::ZeResult;

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

/// Severity level, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    const ORDERED: [Self; 5] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
    ];

    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ORDERED.get(usize::from(rank)).copied()
    }

    /// Whether a record at `self` passes a `threshold` filter.
    #[must_use]
    pub fn passes(self, threshold: Self) -> bool {
        self >= threshold
    }
}

/// One structured log record.
///
/// Required fields: `timestamp`, `correlation_id`, `level`, `event`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub correlation_id: u64,
    pub level: LogLevel,
    pub event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracer: Option<u64>,
    /// Symbolic result name, e.g. `ZE_RESULT_SUCCESS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    #[must_use]
    pub fn new(correlation_id: u64, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            correlation_id,
            level,
            event: event.into(),
            entry_point: None,
            tracer: None,
            result: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_entry_point(mut self, entry_point: EntryPoint) -> Self {
        self.entry_point = Some(entry_point.name().to_string());
        self
    }

    #[must_use]
    pub fn with_tracer(mut self, tracer: u64) -> Self {
        self.tracer = Some(tracer);
        self
    }

    #[must_use]
    pub fn with_result(mut self, result: ZeResult) -> Self {
        self.result = Some(result.name().to_string());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Log emitter
// ---------------------------------------------------------------------------

/// Cloneable in-memory sink; every clone sees the same bytes.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Parse every line back into a [`LogEntry`], skipping malformed ones.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Writes JSONL records at or above a threshold level.
pub struct LogEmitter {
    writer: Box<dyn Write + Send>,
    threshold: LogLevel,
    emitted: u64,
}

impl LogEmitter {
    #[must_use]
    pub fn to_writer(writer: impl Write + Send + 'static, threshold: LogLevel) -> Self {
        Self {
            writer: Box::new(writer),
            threshold,
            emitted: 0,
        }
    }

    #[must_use]
    pub fn to_stderr(threshold: LogLevel) -> Self {
        Self::to_writer(std::io::stderr(), threshold)
    }

    /// Create an emitter that appends to a file.
    pub fn to_file(path: &Path, threshold: LogLevel) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self::to_writer(std::io::LineWriter::new(file), threshold))
    }

    /// Create an emitter backed by a [`SharedBuffer`] (for testing).
    #[must_use]
    pub fn to_shared_buffer(threshold: LogLevel) -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Self::to_writer(buffer.clone(), threshold), buffer)
    }

    #[must_use]
    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.passes(self.threshold)
    }

    /// Number of records written (filtered records are not counted).
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Write `entry` if its level passes the threshold.
    pub fn emit_entry(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        if !self.enabled(entry.level) {
            return Ok(());
        }
        let line = entry.to_jsonl().map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")?;
        self.emitted += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl std::fmt::Debug for LogEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogEmitter")
            .field("threshold", &self.threshold)
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct LogValidationError {
    pub line_number: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: field '{}': {}",
            self.line_number, self.field, self.message
        )
    }
}

/// Validate a single JSONL line against the schema.
pub fn validate_log_line(
    line: &str,
    line_number: usize,
) -> Result<LogEntry, Vec<LogValidationError>> {
    let err = |field: &str, message: String| LogValidationError {
        line_number,
        field: field.to_string(),
        message,
    };

    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return Err(vec![err("<json>", format!("invalid JSON: {e}"))]),
    };

    let mut errors = Vec::new();
    for field in ["timestamp", "correlation_id", "level", "event"] {
        if value.get(field).is_none() {
            errors.push(err(field, "required field missing".to_string()));
        }
    }
    if let Some(name) = value.get("entry_point").and_then(|v| v.as_str()) {
        if EntryPoint::from_name(name).is_none() {
            errors.push(err("entry_point", format!("unknown entry point '{name}'")));
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(value).map_err(|e| vec![err("<schema>", e.to_string())])
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn now_utc() -> String {
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    let (year, month, day) = civil_from_days(secs / 86_400);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{:03}Z",
        (secs % 86_400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
        duration.subsec_millis(),
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day).
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_entry_serializes_required_fields() {
        let entry = LogEntry::new(7, LogLevel::Debug, "tracer_created");
        let json = entry.to_jsonl().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["timestamp"].is_string());
        assert_eq!(parsed["correlation_id"], 7);
        assert_eq!(parsed["level"], "debug");
        assert_eq!(parsed["event"], "tracer_created");
        assert!(parsed.get("entry_point").is_none());
        assert!(parsed.get("tracer").is_none());
        assert!(parsed.get("result").is_none());
    }

    #[test]
    fn optional_fields_use_api_names() {
        let entry = LogEntry::new(3, LogLevel::Trace, "call")
            .with_entry_point(EntryPoint::FenceCreate)
            .with_tracer(2)
            .with_result(ZeResult::ErrorInvalidArgument)
            .with_details(serde_json::json!({"prologues": 4}));
        let parsed: serde_json::Value = serde_json::from_str(&entry.to_jsonl().unwrap()).unwrap();
        assert_eq!(parsed["entry_point"], "zeFenceCreate");
        assert_eq!(parsed["tracer"], 2);
        assert_eq!(parsed["result"], "ZE_RESULT_ERROR_INVALID_ARGUMENT");
        assert_eq!(parsed["details"]["prologues"], 4);
    }

    #[test]
    fn emitter_filters_below_threshold() {
        let (mut emitter, buffer) = LogEmitter::to_shared_buffer(LogLevel::Warn);
        emitter
            .emit_entry(&LogEntry::new(1, LogLevel::Trace, "call"))
            .unwrap();
        emitter
            .emit_entry(&LogEntry::new(2, LogLevel::Warn, "orphaned_instance_data"))
            .unwrap();
        assert_eq!(emitter.emitted(), 1);
        let entries = buffer.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "orphaned_instance_data");
    }

    #[test]
    fn validate_accepts_emitted_lines() {
        let line = LogEntry::new(9, LogLevel::Info, "layer_up")
            .with_entry_point(EntryPoint::Init)
            .to_jsonl()
            .unwrap();
        let entry = validate_log_line(&line, 1).unwrap();
        assert_eq!(entry.correlation_id, 9);
    }

    #[test]
    fn validate_reports_missing_and_unknown_fields() {
        let errors =
            validate_log_line(r#"{"level":"info","entry_point":"zeBogus"}"#, 4).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"timestamp"));
        assert!(fields.contains(&"correlation_id"));
        assert!(fields.contains(&"event"));
        assert!(fields.contains(&"entry_point"));
        assert!(errors.iter().all(|e| e.line_number == 4));
    }

    #[test]
    fn validate_rejects_invalid_json() {
        let errors = validate_log_line("not json", 2).unwrap_err();
        assert_eq!(errors[0].field, "<json>");
    }

    #[test]
    fn level_ordering_and_rank() {
        assert!(LogLevel::Error.passes(LogLevel::Warn));
        assert!(!LogLevel::Debug.passes(LogLevel::Info));
        for level in LogLevel::ORDERED {
            assert_eq!(LogLevel::from_rank(level.rank()), Some(level));
        }
        assert_eq!(LogLevel::from_rank(9), None);
    }

    #[test]
    fn civil_dates_are_exact() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(19_723), (2024, 1, 1));
    }

    #[test]
    fn file_emitter_appends_valid_lines() {
        let path = std::env::temp_dir().join(format!(
            "zetrace-log-{}-{}.jsonl",
            std::process::id(),
            now_utc().replace(':', "-")
        ));
        for event in ["layer_up", "layer_down"] {
            let mut emitter = LogEmitter::to_file(&path, LogLevel::Debug).unwrap();
            emitter
                .emit_entry(&LogEntry::new(0, LogLevel::Debug, event))
                .unwrap();
            emitter.flush().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let events: Vec<String> = contents
            .lines()
            .enumerate()
            .map(|(i, line)| validate_log_line(line, i + 1).unwrap().event)
            .collect();
        assert_eq!(events, ["layer_up", "layer_down"]);
    }
}
