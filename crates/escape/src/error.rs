//! Usage errors raised by the construct itself
//!
//! These are never suppressed: suppression only applies to errors returned by
//! guarded code.

use thiserror::Error;

/// The construct received an argument that is not a valid exception filter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("You are using the decorator for the wrong purpose.")]
pub struct WrongUsageError {
    argument: String,
}

impl WrongUsageError {
    /// Create the error for the rejected `argument`.
    pub fn new(argument: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
        }
    }

    /// Rendering of the argument that was rejected.
    #[must_use]
    pub fn argument(&self) -> &str {
        &self.argument
    }
}

/// A configuration with a default return value was used to guard a block
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error(
    "You cannot set a default value for the context manager. This is only possible for the decorator."
)]
pub struct SetDefaultReturnValueError;

/// Either usage error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Invalid exception filter
    #[error(transparent)]
    WrongUsage(#[from] WrongUsageError),

    /// Default return value on a scoped block
    #[error(transparent)]
    SetDefaultReturnValue(#[from] SetDefaultReturnValueError),
}
