//! Sinks that receive suppression decisions
//!
//! The construct hands every decision to a [`Logger`] as a finished message
//! at the `exception` level. What the sink does with it is up to the sink.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Level a record was emitted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Error with exception context. Every suppression decision uses this level.
    Exception,
}

impl LogLevel {
    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exception => "exception",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of suppression decisions.
pub trait Logger: Send + Sync {
    /// Record `message` at the `exception` level.
    fn exception(&self, message: &str);
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn exception(&self, message: &str) {
        (**self).exception(message);
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn exception(&self, message: &str) {
        (**self).exception(message);
    }
}

/// Forwards every record to `tracing` under the `escape` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new tracing logger.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn exception(&self, message: &str) {
        tracing::error!(target: "escape", category = LogLevel::Exception.as_str(), "{message}");
    }
}

/// One record kept by [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Level of the record.
    pub level: LogLevel,
    /// Message exactly as received.
    pub message: String,
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    /// Create an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Messages of records at the `exception` level, oldest first.
    #[must_use]
    pub fn exceptions(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.level == LogLevel::Exception)
            .map(|record| record.message.clone())
            .collect()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Drop all records.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Logger for MemoryLogger {
    fn exception(&self, message: &str) {
        self.records.lock().push(LogRecord {
            level: LogLevel::Exception,
            message: message.to_owned(),
        });
    }
}
