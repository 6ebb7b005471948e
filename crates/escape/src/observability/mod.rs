//! Logging of suppression decisions

pub mod logger;
pub mod message;

pub use logger::{LogLevel, LogRecord, Logger, MemoryLogger, TracingLogger};
pub use message::{CallShape, Outcome, format_message};
