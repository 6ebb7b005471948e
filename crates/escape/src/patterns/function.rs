//! Wrapper for synchronous functions

use std::borrow::Cow;
use std::fmt;

use crate::config::{Escape, NoDefault, Substitute};
use crate::core::invoke::Invoke;
use crate::core::raise::Raise;
use crate::observability::CallShape;

/// A synchronous function guarded by an [`Escape`] configuration.
///
/// # Example
///
/// ```
/// use escape::{Escape, Exception, builtins};
///
/// fn parse_port(raw: &str) -> Result<u16, Exception> {
///     raw.parse()
///         .map_err(|_| Exception::with_message(&builtins::VALUE_ERROR, raw.to_owned()))
/// }
///
/// let parse_port = Escape::catching([&builtins::VALUE_ERROR])?
///     .default_return(8080_u16)
///     .wrap("parse_port", parse_port);
///
/// assert_eq!(parse_port.name(), "parse_port");
/// assert_eq!(parse_port.call(("443",)).unwrap(), 443);
/// assert_eq!(parse_port.call(("https",)).unwrap(), 8080);
/// # Ok::<(), escape::WrongUsageError>(())
/// ```
pub struct Escaped<F, D = NoDefault> {
    name: Cow<'static, str>,
    function: F,
    config: Escape<D>,
}

impl<F, D> Escaped<F, D> {
    pub(crate) fn new(name: impl Into<Cow<'static, str>>, function: F, config: Escape<D>) -> Self {
        Self {
            name: name.into(),
            function,
            config,
        }
    }

    /// Name of the wrapped function.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration this wrapper applies.
    #[must_use]
    pub fn config(&self) -> &Escape<D> {
        &self.config
    }

    /// Unwrap the original function.
    pub fn into_inner(self) -> F {
        self.function
    }

    /// Call the function with `args`.
    ///
    /// Returns the function's value on success. On error, a matching
    /// exception is replaced by the default return value; anything else is
    /// returned unchanged.
    pub fn call<Args, T, E>(&self, args: Args) -> Result<D::Output, E>
    where
        F: Invoke<Args, Output = Result<T, E>>,
        E: Raise,
        D: Substitute<T>,
    {
        let result = self.function.invoke(args);
        self.config
            .settle(CallShape::PlainFunction { name: &self.name }, result)
    }
}

impl<F: Clone, D: Clone> Clone for Escaped<F, D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            function: self.function.clone(),
            config: self.config.clone(),
        }
    }
}

impl<F, D: fmt::Debug> fmt::Debug for Escaped<F, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Escaped")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
