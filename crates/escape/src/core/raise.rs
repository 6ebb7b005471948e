//! Raise trait for guarded error types
//!
//! Any error returned by guarded code must say which [`ExceptionClass`] it
//! belongs to. Domain errors implement [`Raise`] directly; code without its
//! own error type can use the general [`Exception`] carrier.

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

use super::class::{ExceptionClass, builtins};

/// Trait for errors that can pass through a suppression filter
///
/// # Examples
///
/// ```
/// use escape::{ExceptionClass, Raise, builtins};
/// use thiserror::Error;
///
/// static QUOTA_EXCEEDED: ExceptionClass =
///     ExceptionClass::derive("QuotaExceeded", &builtins::RUNTIME_ERROR);
///
/// #[derive(Error, Debug)]
/// pub enum BillingError {
///     #[error("quota of {0} requests exceeded")]
///     Quota(u32),
///
///     #[error("invalid plan: {0}")]
///     InvalidPlan(String),
/// }
///
/// impl Raise for BillingError {
///     fn class(&self) -> &'static ExceptionClass {
///         match self {
///             Self::Quota(_) => &QUOTA_EXCEEDED,
///             Self::InvalidPlan(_) => &builtins::VALUE_ERROR,
///         }
///     }
/// }
/// ```
pub trait Raise: StdError {
    /// Class this error is an instance of.
    fn class(&self) -> &'static ExceptionClass;

    /// Message carried by this error
    ///
    /// Default: the `Display` text, `None` when it is empty.
    fn message(&self) -> Option<String> {
        let text = self.to_string();
        (!text.is_empty()).then_some(text)
    }
}

/// General-purpose raised exception: a class, a message and an optional cause.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Exception {
    class: &'static ExceptionClass,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Exception {
    /// Exception of `class` with no message.
    #[must_use]
    pub fn new(class: &'static ExceptionClass) -> Self {
        Self {
            class,
            message: String::new(),
            source: None,
        }
    }

    /// Exception of `class` carrying `message`.
    pub fn with_message(class: &'static ExceptionClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the error that caused this one.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_source(mut self, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Raise for Exception {
    fn class(&self) -> &'static ExceptionClass {
        self.class
    }
}

/// `std::io::Error` maps onto the `OSError` branch.
impl Raise for io::Error {
    fn class(&self) -> &'static ExceptionClass {
        use io::ErrorKind::{
            ConnectionAborted, ConnectionRefused, ConnectionReset, NotFound, PermissionDenied,
            TimedOut,
        };
        match self.kind() {
            NotFound => &builtins::FILE_NOT_FOUND_ERROR,
            PermissionDenied => &builtins::PERMISSION_ERROR,
            TimedOut => &builtins::TIMEOUT_ERROR,
            ConnectionAborted | ConnectionRefused | ConnectionReset => &builtins::CONNECTION_ERROR,
            _ => &builtins::OS_ERROR,
        }
    }
}

/// A cancelled task is a `CancelledError`, a panicked one a `RuntimeError`.
impl Raise for tokio::task::JoinError {
    fn class(&self) -> &'static ExceptionClass {
        if self.is_cancelled() {
            &builtins::CANCELLED_ERROR
        } else {
            &builtins::RUNTIME_ERROR
        }
    }

    fn message(&self) -> Option<String> {
        None
    }
}
