//! Exception filter: which raised errors are eligible for suppression

use std::fmt;

use super::class::{ExceptionClass, builtins};
use super::raise::Raise;

/// Set of exception classes a configuration suppresses.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum ExceptionFilter {
    /// Anything in the `Exception` branch.
    ///
    /// `BaseException` itself and its other direct subclasses, such as
    /// `CancelledError`, are not covered.
    #[default]
    Wildcard,
    /// The listed classes and their subclasses, minus the always-fatal set.
    Classes(Vec<&'static ExceptionClass>),
}

impl ExceptionFilter {
    /// Filter over the given classes.
    pub fn classes(classes: impl IntoIterator<Item = &'static ExceptionClass>) -> Self {
        Self::Classes(classes.into_iter().collect())
    }

    /// Whether an exception of `class` would be suppressed.
    ///
    /// Always-fatal classes never match, even when listed explicitly.
    #[must_use]
    pub fn matches_class(&self, class: &ExceptionClass) -> bool {
        if class.is_always_fatal() {
            return false;
        }
        match self {
            Self::Wildcard => class.is_subclass_of(&builtins::EXCEPTION),
            Self::Classes(classes) => classes.iter().any(|listed| class.is_subclass_of(listed)),
        }
    }

    /// Whether `exception` would be suppressed.
    #[must_use]
    pub fn matches<E: Raise + ?Sized>(&self, exception: &E) -> bool {
        self.matches_class(exception.class())
    }

    /// Whether this is the wildcard filter.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

impl fmt::Debug for ExceptionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("Wildcard"),
            Self::Classes(classes) => f
                .debug_tuple("Classes")
                .field(&classes.iter().map(|class| class.name()).collect::<Vec<_>>())
                .finish(),
        }
    }
}
