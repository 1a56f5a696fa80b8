//! # Logger Service
//!
//! This crate implements structured logging for the file manager.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Components receive a [`LogSink`] and hand it [`LogEntry`] values; where the
//! entries end up (memory, `tracing`, nowhere) is the caller's decision.

use core_types::SessionId;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Source session (if known)
    pub source: Option<SessionId>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Shorthand for a debug entry
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Debug, message)
    }

    /// Shorthand for an info entry
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    /// Shorthand for a warning entry
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, message)
    }

    /// Sets the source session
    pub fn with_source(mut self, source: SessionId) -> Self {
        self.source = Some(source);
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((key.into(), value.to_string()));
        self
    }

    /// Looks up a field value by key
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the fields as space-separated `key=value` pairs
    pub fn render_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Destination for structured log entries
///
/// Sinks are shared between components, so recording takes `&self`.
pub trait LogSink: Send + Sync {
    /// Records a log entry
    fn log(&self, entry: LogEntry);
}

/// Sink that keeps every entry in memory
///
/// Clones share one history, so a test can hold a clone while the component
/// under test owns another.
#[derive(Debug, Default, Clone)]
pub struct MemoryLogSink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryLogSink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Returns entries whose message matches exactly
    pub fn with_message(&self, message: &str) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| e.message == message)
            .cloned()
            .collect()
    }

    /// Returns entries at or above the given level
    pub fn at_least(&self, level: LogLevel) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| e.level >= level)
            .cloned()
            .collect()
    }

    /// Drops all recorded entries
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        // A panic while holding the lock cannot leave a Vec half-pushed.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemoryLogSink {
    fn log(&self, entry: LogEntry) {
        self.lock().push(entry);
    }
}

/// Sink that forwards entries to the `tracing` macros
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, entry: LogEntry) {
        let fields = entry.render_fields();
        let source = entry
            .source
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        match entry.level {
            LogLevel::Debug => {
                tracing::debug!(target: "file_manager", %source, %fields, "{}", entry.message)
            }
            LogLevel::Info => {
                tracing::info!(target: "file_manager", %source, %fields, "{}", entry.message)
            }
            LogLevel::Warn => {
                tracing::warn!(target: "file_manager", %source, %fields, "{}", entry.message)
            }
            LogLevel::Error => {
                tracing::error!(target: "file_manager", %source, %fields, "{}", entry.message)
            }
        }
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogSink;

impl LogSink for NullLogSink {
    fn log(&self, _entry: LogEntry) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_entry_creation() {
        let entry = LogEntry::new(LogLevel::Info, "test message");
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "test message");
        assert!(entry.source.is_none());
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_log_entry_with_source() {
        let session = SessionId::new();
        let entry = LogEntry::info("test").with_source(session);
        assert_eq!(entry.source, Some(session));
    }

    #[test]
    fn test_log_entry_with_fields() {
        let entry = LogEntry::info("folder created")
            .with_field("name", "Docs")
            .with_field("count", 3);

        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.field("name"), Some("Docs"));
        assert_eq!(entry.field("count"), Some("3"));
        assert_eq!(entry.field("missing"), None);
        assert_eq!(entry.render_fields(), "name=Docs count=3");
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemoryLogSink::new();
        sink.log(LogEntry::debug("first"));
        sink.log(LogEntry::warn("second"));

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(sink.at_least(LogLevel::Warn).len(), 1);
        assert_eq!(sink.with_message("second").len(), 1);

        sink.clear();
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_memory_sink_clones_share_history() {
        let sink = MemoryLogSink::new();
        let shared: Arc<dyn LogSink> = Arc::new(sink.clone());

        shared.log(LogEntry::info("from component"));
        assert_eq!(sink.with_message("from component").len(), 1);
    }

    #[test]
    fn test_null_sink_discards() {
        let sink = NullLogSink;
        sink.log(LogEntry::info("ignored"));
    }

    #[test]
    fn test_tracing_sink_accepts_every_level() {
        let sink = TracingLogSink;
        for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            sink.log(LogEntry::new(level, "message").with_field("k", "v"));
        }
    }
}
