//! Configuration resolution
//!
//! [`Escape`] is the immutable configuration produced by a configuring call.
//! It carries the exception filter, the optional logger, and the default
//! return value encoded in its type parameter:
//!
//! - [`NoDefault`]: wrappers return `Option<T>`, `None` on suppression;
//! - [`DefaultReturn<V>`]: wrappers return `T`, a clone of `V` on suppression.
//!
//! # Example
//!
//! ```
//! use escape::{Escape, FilterArg, builtins};
//!
//! let config = Escape::catching([&builtins::ZERO_DIVISION_ERROR, &builtins::KEY_ERROR])?
//!     .default_return(0);
//! assert!(!config.filter().is_wildcard());
//!
//! let err = Escape::catching([FilterArg::from(&builtins::VALUE_ERROR), FilterArg::from("lol")])
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "You are using the decorator for the wrong purpose.");
//! # Ok::<(), escape::WrongUsageError>(())
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::core::class::{ClassRegistry, ExceptionClass};
use crate::core::filter::ExceptionFilter;
use crate::core::raise::Raise;
use crate::error::{SetDefaultReturnValueError, WrongUsageError};
use crate::observability::{CallShape, Logger, Outcome, format_message};
use crate::patterns::{Block, Escaped, EscapedAsync};

static BUILTIN_REGISTRY: LazyLock<ClassRegistry> = LazyLock::new(ClassRegistry::builtin);

/// Names that resolve to the wildcard.
const WILDCARD_NAMES: [&str; 2] = ["...", "*"];

// =============================================================================
// FILTER ARGUMENTS
// =============================================================================

/// One argument of a configuring call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterArg {
    /// Suppress anything in the `Exception` branch.
    Wildcard,
    /// A class and its subclasses.
    Class(&'static ExceptionClass),
    /// A class looked up by name; `"..."` and `"*"` mean the wildcard.
    Name(String),
}

impl From<&'static ExceptionClass> for FilterArg {
    fn from(class: &'static ExceptionClass) -> Self {
        Self::Class(class)
    }
}

impl From<&str> for FilterArg {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for FilterArg {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

fn resolve_filter<I>(registry: &ClassRegistry, args: I) -> Result<ExceptionFilter, WrongUsageError>
where
    I: IntoIterator,
    I::Item: Into<FilterArg>,
{
    let mut wildcard = false;
    let mut classes = Vec::new();

    for arg in args {
        match arg.into() {
            FilterArg::Wildcard => wildcard = true,
            FilterArg::Class(class) => classes.push(class),
            FilterArg::Name(name) if WILDCARD_NAMES.contains(&name.as_str()) => wildcard = true,
            FilterArg::Name(name) => match registry.get(&name) {
                Some(class) => classes.push(class),
                None => {
                    tracing::debug!(target: "escape", argument = %name, "unknown exception class");
                    return Err(WrongUsageError::new(name));
                }
            },
        }
    }

    if wildcard && !classes.is_empty() {
        let listed: Vec<_> = classes.iter().map(|class| class.name()).collect();
        tracing::debug!(target: "escape", ?listed, "wildcard mixed with explicit classes");
        return Err(WrongUsageError::new(format!("..., {}", listed.join(", "))));
    }

    Ok(if wildcard {
        ExceptionFilter::Wildcard
    } else {
        ExceptionFilter::Classes(classes)
    })
}

// =============================================================================
// DEFAULT RETURN VALUES
// =============================================================================

mod sealed {
    pub trait Sealed {}
}

/// Whether a configuration carries a default return value.
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait ReturnPolicy: sealed::Sealed + Clone + Send + Sync {
    /// `true` when a default return value was set.
    fn is_set(&self) -> bool;
}

/// How a wrapper over a callable returning `T` reports its result.
pub trait Substitute<T>: ReturnPolicy {
    /// What the wrapper returns on success or suppression.
    type Output;

    /// Wrap a value the callable returned.
    fn pass(value: T) -> Self::Output;

    /// Value returned in place of a suppressed exception.
    fn substitute(&self) -> Self::Output;
}

/// No default return value: suppression yields `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDefault;

impl sealed::Sealed for NoDefault {}

impl ReturnPolicy for NoDefault {
    fn is_set(&self) -> bool {
        false
    }
}

impl<T> Substitute<T> for NoDefault {
    type Output = Option<T>;

    fn pass(value: T) -> Option<T> {
        Some(value)
    }

    fn substitute(&self) -> Option<T> {
        None
    }
}

/// Default return value substituted for a suppressed exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultReturn<V>(V);

impl<V> DefaultReturn<V> {
    /// The configured value.
    pub fn value(&self) -> &V {
        &self.0
    }
}

impl<V> sealed::Sealed for DefaultReturn<V> {}

impl<V: Clone + Send + Sync> ReturnPolicy for DefaultReturn<V> {
    fn is_set(&self) -> bool {
        true
    }
}

impl<T, V> Substitute<T> for DefaultReturn<V>
where
    V: Clone + Into<T> + Send + Sync,
{
    type Output = T;

    fn pass(value: T) -> T {
        value
    }

    fn substitute(&self) -> T {
        self.0.clone().into()
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Immutable suppression configuration.
///
/// Cloning is cheap and every wrapper or block built from it gets its own
/// copy, so one configuration can guard any number of call sites.
#[derive(Clone)]
pub struct Escape<D = NoDefault> {
    filter: ExceptionFilter,
    logger: Option<Arc<dyn Logger>>,
    default: D,
}

impl Escape {
    /// All-defaults configuration: wildcard filter, no logger, no default value.
    #[must_use]
    pub fn new() -> Self {
        Self::from_filter(ExceptionFilter::default())
    }

    /// Configuration with an already-built filter.
    #[must_use]
    pub fn from_filter(filter: ExceptionFilter) -> Self {
        Self {
            filter,
            logger: None,
            default: NoDefault,
        }
    }

    /// Configuration suppressing the given classes, names or wildcard.
    ///
    /// Names resolve against the built-in classes. An empty list suppresses
    /// nothing.
    pub fn catching<I>(args: I) -> Result<Self, WrongUsageError>
    where
        I: IntoIterator,
        I::Item: Into<FilterArg>,
    {
        Self::catching_in(&BUILTIN_REGISTRY, args)
    }

    /// Like [`Escape::catching`], resolving names against `registry`.
    pub fn catching_in<I>(registry: &ClassRegistry, args: I) -> Result<Self, WrongUsageError>
    where
        I: IntoIterator,
        I::Item: Into<FilterArg>,
    {
        resolve_filter(registry, args).map(Self::from_filter)
    }

    /// Substitute `value` for suppressed exceptions.
    ///
    /// Only valid for wrapping callables; [`Escape::block`] rejects it.
    pub fn default_return<V>(self, value: V) -> Escape<DefaultReturn<V>> {
        Escape {
            filter: self.filter,
            logger: self.logger,
            default: DefaultReturn(value),
        }
    }
}

impl Default for Escape {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Escape<D> {
    /// Record every decision in `logger`.
    pub fn logger(self, logger: impl Logger + 'static) -> Self {
        Self {
            logger: Some(Arc::new(logger)),
            ..self
        }
    }

    /// The exception filter.
    #[must_use]
    pub fn filter(&self) -> &ExceptionFilter {
        &self.filter
    }

    /// Whether a logger is attached.
    #[must_use]
    pub fn has_logger(&self) -> bool {
        self.logger.is_some()
    }

    /// The default return policy.
    #[must_use]
    pub fn default_policy(&self) -> &D {
        &self.default
    }

    /// Decide what happens to `exception` raised from `shape` and log it.
    pub(crate) fn judge<E: Raise + ?Sized>(&self, shape: CallShape<'_>, exception: &E) -> Outcome {
        let outcome = Outcome::from_match(self.filter.matches(exception));
        tracing::trace!(
            target: "escape",
            exception = exception.class().name(),
            %outcome,
            "suppression decision"
        );
        if let Some(logger) = &self.logger {
            logger.exception(&format_message(shape, outcome, exception));
        }
        outcome
    }

    /// Settle the result of guarded code.
    pub(crate) fn settle<T, E>(&self, shape: CallShape<'_>, result: Result<T, E>) -> Result<D::Output, E>
    where
        E: Raise,
        D: Substitute<T>,
    {
        match result {
            Ok(value) => Ok(D::pass(value)),
            Err(exception) => match self.judge(shape, &exception) {
                Outcome::Suppressed => Ok(self.default.substitute()),
                Outcome::NotSuppressed => Err(exception),
            },
        }
    }
}

impl<D: ReturnPolicy> Escape<D> {
    /// Wrap a synchronous function.
    pub fn wrap<F>(&self, name: impl Into<Cow<'static, str>>, function: F) -> Escaped<F, D> {
        Escaped::new(name, function, self.clone())
    }

    /// Wrap an asynchronous function.
    pub fn wrap_async<F>(&self, name: impl Into<Cow<'static, str>>, function: F) -> EscapedAsync<F, D> {
        EscapedAsync::new(name, function, self.clone())
    }

    /// Enter a scoped block.
    ///
    /// Fails when a default return value is set: a block has nothing to return.
    pub fn block(&self) -> Result<Block, SetDefaultReturnValueError> {
        if self.default.is_set() {
            tracing::debug!(target: "escape", "default return value rejected for a scoped block");
            return Err(SetDefaultReturnValueError);
        }
        Ok(Block::new(Escape {
            filter: self.filter.clone(),
            logger: self.logger.clone(),
            default: NoDefault,
        }))
    }
}

impl<D: fmt::Debug> fmt::Debug for Escape<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Escape")
            .field("filter", &self.filter)
            .field("logger", &self.logger.is_some())
            .field("default", &self.default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::class::builtins::*;
    use pretty_assertions::assert_eq;

    static MY_ERROR: ExceptionClass = ExceptionClass::derive("MyError", &VALUE_ERROR);

    #[test]
    fn no_arguments_is_wildcard() {
        assert!(Escape::new().filter().is_wildcard());
        let config = Escape::<NoDefault>::default();
        assert!(config.filter().is_wildcard());
        assert!(!config.has_logger());
        assert!(!config.default_policy().is_set());
    }

    #[test]
    fn classes_resolve_in_order() {
        let config = Escape::catching([&VALUE_ERROR, &KEY_ERROR]).unwrap();
        assert_eq!(config.filter(), &ExceptionFilter::Classes(vec![&VALUE_ERROR, &KEY_ERROR]));
    }

    #[test]
    fn names_resolve_against_builtins() {
        let config = Escape::catching(["ZeroDivisionError"]).unwrap();
        assert_eq!(config.filter(), &ExceptionFilter::Classes(vec![&ZERO_DIVISION_ERROR]));
    }

    #[test]
    fn wildcard_names() {
        for name in ["...", "*"] {
            assert!(Escape::catching([name]).unwrap().filter().is_wildcard());
        }
        assert!(Escape::catching([FilterArg::Wildcard]).unwrap().filter().is_wildcard());
    }

    #[test]
    fn unknown_name_is_wrong_usage() {
        let err = Escape::catching(["kek"]).unwrap_err();
        assert_eq!(err.argument(), "kek");
    }

    #[test]
    fn invalid_list_element_is_wrong_usage() {
        let err = Escape::catching([FilterArg::from(&VALUE_ERROR), FilterArg::from("lol")])
            .unwrap_err();
        assert_eq!(err.argument(), "lol");
    }

    #[test]
    fn wildcard_mixed_with_classes_is_wrong_usage() {
        let err = Escape::catching([FilterArg::Wildcard, FilterArg::from(&VALUE_ERROR)]).unwrap_err();
        assert_eq!(err.argument(), "..., ValueError");
    }

    #[test]
    fn custom_registry() {
        let registry = ClassRegistry::builtin().with_class(&MY_ERROR);
        let config = Escape::catching_in(&registry, ["MyError"]).unwrap();
        assert_eq!(config.filter(), &ExceptionFilter::Classes(vec![&MY_ERROR]));
        assert!(Escape::catching(["MyError"]).is_err());
    }

    #[test]
    fn default_return_is_tracked_in_type() {
        let config = Escape::new().default_return("lol");
        assert!(config.default_policy().is_set());
        assert_eq!(config.default_policy().value(), &"lol");
        assert!(!Escape::new().default_policy().is_set());
    }

    #[test]
    fn block_rejects_default_return() {
        let err = Escape::new().default_return("lol").block().unwrap_err();
        assert_eq!(err, SetDefaultReturnValueError);
        assert!(Escape::new().block().is_ok());
    }

    #[test]
    fn logger_survives_default_return() {
        let config = Escape::new()
            .logger(crate::observability::MemoryLogger::new())
            .default_return(1);
        assert!(config.has_logger());
    }

    #[test]
    fn debug_hides_logger() {
        let rendered = format!("{:?}", Escape::catching([&KEY_ERROR]).unwrap());
        assert_eq!(
            rendered,
            r#"Escape { filter: Classes(["KeyError"]), logger: false, default: NoDefault }"#
        );
    }
}
