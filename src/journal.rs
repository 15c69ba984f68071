//! Injected diagnostic sink for apply-time events
//!
//! The journal is an observer: transactors write structured entries into it,
//! but nothing correctness-relevant may depend on its contents. Entries are
//! collected in memory with no side effects, so journaling never perturbs
//! deterministic execution.

use serde::{Deserialize, Serialize};

/// Severity of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// A structured diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Additional structured context.
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: String) -> Self {
        self.fields.push((key.to_string(), value));
        self
    }
}

/// Collecting sink for diagnostic events, filtered by level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<LogEntry>,
    min_level: LogLevel,
}

impl Journal {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            entries: Vec::new(),
            min_level,
        }
    }

    /// A journal capturing every level.
    pub fn all() -> Self {
        Self::new(LogLevel::Trace)
    }

    /// A journal capturing warnings and errors only.
    pub fn with_warn_level() -> Self {
        Self::new(LogLevel::Warn)
    }

    pub fn log(&mut self, entry: LogEntry) {
        if entry.level >= self.min_level {
            self.entries.push(entry);
        }
    }

    pub fn trace(&mut self, message: String) {
        self.log(LogEntry::new(LogLevel::Trace, message));
    }

    pub fn debug(&mut self, message: String) {
        self.log(LogEntry::new(LogLevel::Debug, message));
    }

    pub fn info(&mut self, message: String) {
        self.log(LogEntry::new(LogLevel::Info, message));
    }

    pub fn warn(&mut self, message: String) {
        self.log(LogEntry::new(LogLevel::Warn, message));
    }

    pub fn error(&mut self, message: String) {
        self.log(LogEntry::new(LogLevel::Error, message));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn filter_by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::all()
    }
}
