//! # Escape
//!
//! Selective exception suppression for functions, async functions and
//! scoped blocks.
//!
//! ## Features
//!
//! - **Wrappers**: guard sync and async functions, substituting a default
//!   value for suppressed exceptions
//! - **Scoped blocks**: guard a region of code that returns nothing
//! - **Class filters**: suppress named exception classes and their subclasses,
//!   or the whole `Exception` branch
//! - **Logging**: one `exception`-level record per decision, to `tracing` or
//!   any [`Logger`]
//!
//! ## Quick Start
//!
//! ```rust
//! use escape::{Escape, Exception, MemoryLogger, builtins};
//! use std::sync::Arc;
//!
//! fn divide(a: i32, b: i32) -> Result<i32, Exception> {
//!     a.checked_div(b)
//!         .ok_or_else(|| Exception::with_message(&builtins::ZERO_DIVISION_ERROR, "division by zero"))
//! }
//!
//! let logger = Arc::new(MemoryLogger::new());
//! let divide = Escape::catching([&builtins::ARITHMETIC_ERROR])?
//!     .logger(Arc::clone(&logger))
//!     .default_return(0)
//!     .wrap("divide", divide);
//!
//! assert_eq!(divide.call((10, 2)).unwrap(), 5);
//! assert_eq!(divide.call((10, 0)).unwrap(), 0);
//! assert_eq!(
//!     logger.exceptions(),
//!     [r#"When executing function "divide", the exception "ZeroDivisionError" ("division by zero") was suppressed."#]
//! );
//! # Ok::<(), escape::WrongUsageError>(())
//! ```
//!
//! Errors are classified through [`Raise`]. Implement it for your own error
//! types, or use the ready-made [`Exception`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Exception model
pub mod core;

// Wrappers and blocks
pub mod patterns;

// Decision logging
pub mod observability;

mod config;
mod error;
mod macros;
mod settings;

use std::borrow::Cow;

pub use config::{DefaultReturn, Escape, FilterArg, NoDefault, ReturnPolicy, Substitute};
pub use error::{SetDefaultReturnValueError, UsageError, WrongUsageError};
pub use settings::{EscapeSettings, ExceptionNames};

pub use crate::core::{ClassRegistry, Exception, ExceptionClass, ExceptionFilter, Invoke, Raise, builtins};

pub use observability::{
    CallShape, LogLevel, LogRecord, Logger, MemoryLogger, Outcome, TracingLogger, format_message,
};

pub use patterns::{Block, Escaped, EscapedAsync};

/// All-defaults configuration.
///
/// Same as [`Escape::new`]: wildcard filter, no logger, no default value.
#[must_use]
pub fn configure() -> Escape {
    Escape::new()
}

/// Wrap a synchronous function with the all-defaults configuration.
pub fn wrap<F>(name: impl Into<Cow<'static, str>>, function: F) -> Escaped<F> {
    Escape::new().wrap(name, function)
}

/// Wrap an asynchronous function with the all-defaults configuration.
pub fn wrap_async<F>(name: impl Into<Cow<'static, str>>, function: F) -> EscapedAsync<F> {
    Escape::new().wrap_async(name, function)
}

/// Enter a scoped block with the all-defaults configuration.
pub fn block() -> Block {
    Block::new(Escape::new())
}

/// Prelude module for common imports
pub mod prelude {
    pub use crate::core::{Exception, ExceptionClass, Raise, builtins};
    pub use crate::observability::{Logger, MemoryLogger, TracingLogger};
    pub use crate::patterns::{Block, Escaped, EscapedAsync};
    pub use crate::{Escape, FilterArg, WrongUsageError, escaped};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
