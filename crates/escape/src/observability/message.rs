//! Log lines describing a suppression decision
//!
//! The wording is part of the public contract and must stay byte-for-byte
//! stable.

use std::fmt;

use crate::core::raise::Raise;

/// Where the exception was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape<'a> {
    /// A synchronous function.
    PlainFunction {
        /// Name of the wrapped function.
        name: &'a str,
    },
    /// An asynchronous function.
    AsynchronousFunction {
        /// Name of the wrapped function.
        name: &'a str,
    },
    /// A scoped block.
    ScopedBlock,
}

/// What happened to the exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Swallowed; a default was substituted or the block exited normally.
    Suppressed,
    /// Passed through to the caller unchanged.
    NotSuppressed,
}

impl Outcome {
    /// `Suppressed` when `suppressed` is true.
    #[must_use]
    pub fn from_match(suppressed: bool) -> Self {
        if suppressed {
            Self::Suppressed
        } else {
            Self::NotSuppressed
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Suppressed => "was suppressed",
            Self::NotSuppressed => "was not suppressed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suppressed => f.write_str("suppressed"),
            Self::NotSuppressed => f.write_str("not_suppressed"),
        }
    }
}

/// `"ValueError"` or `"ValueError" ("message")`.
struct Described<'a> {
    class: &'a str,
    message: Option<String>,
}

impl fmt::Display for Described<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.class)?;
        if let Some(message) = &self.message {
            write!(f, " (\"{message}\")")?;
        }
        Ok(())
    }
}

/// Build the log line for a suppression decision.
pub fn format_message<E: Raise + ?Sized>(
    shape: CallShape<'_>,
    outcome: Outcome,
    exception: &E,
) -> String {
    let described = Described {
        class: exception.class().name(),
        message: exception.message().filter(|message| !message.is_empty()),
    };
    let verb = outcome.verb();

    match shape {
        CallShape::PlainFunction { name } => {
            format!("When executing function \"{name}\", the exception {described} {verb}.")
        }
        CallShape::AsynchronousFunction { name } => format!(
            "When executing coroutine function \"{name}\", the exception {described} {verb}."
        ),
        CallShape::ScopedBlock => format!("The {described} exception {verb} inside the context."),
    }
}
