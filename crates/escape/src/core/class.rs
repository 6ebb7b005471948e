//! Exception classes and their single-inheritance hierarchy
//!
//! A class is a `static` descriptor. Identity is the address of that static,
//! so two descriptors with the same name are still different classes.
//!
//! # Example
//!
//! ```
//! use escape::core::class::{ExceptionClass, builtins};
//!
//! static QUOTA_EXCEEDED: ExceptionClass =
//!     ExceptionClass::derive("QuotaExceeded", &builtins::RUNTIME_ERROR);
//!
//! assert!(QUOTA_EXCEEDED.is_subclass_of(&builtins::EXCEPTION));
//! assert!(!QUOTA_EXCEEDED.is_subclass_of(&builtins::VALUE_ERROR));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::ptr;

/// Static descriptor of an exception class.
pub struct ExceptionClass {
    name: &'static str,
    parent: Option<&'static ExceptionClass>,
}

impl ExceptionClass {
    /// Create a class with no parent.
    #[must_use]
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Create a class deriving from `parent`.
    #[must_use]
    pub const fn derive(name: &'static str, parent: &'static ExceptionClass) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    /// Class name as used in log messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Direct parent, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&'static ExceptionClass> {
        self.parent
    }

    /// Iterate over this class and every ancestor, nearest first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Whether this class is `other` or derives from it.
    #[must_use]
    pub fn is_subclass_of(&self, other: &ExceptionClass) -> bool {
        self.ancestors().any(|class| ptr::eq(class, other))
    }

    /// Whether this class belongs to the always-fatal set.
    ///
    /// Subclasses of an always-fatal class are always-fatal too.
    #[must_use]
    pub fn is_always_fatal(&self) -> bool {
        builtins::ALWAYS_FATAL
            .iter()
            .any(|fatal| self.is_subclass_of(fatal))
    }
}

impl PartialEq for ExceptionClass {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for ExceptionClass {}

impl fmt::Debug for ExceptionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionClass")
            .field("name", &self.name)
            .field("parent", &self.parent.map(ExceptionClass::name))
            .finish()
    }
}

impl fmt::Display for ExceptionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Iterator returned by [`ExceptionClass::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a ExceptionClass>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ExceptionClass;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent;
        Some(current)
    }
}

/// Built-in class hierarchy.
///
/// ```text
/// BaseException
/// ├── GeneratorExit        (always-fatal)
/// ├── KeyboardInterrupt    (always-fatal)
/// ├── SystemExit           (always-fatal)
/// ├── CancelledError
/// └── Exception
///     ├── ArithmeticError ── ZeroDivisionError, OverflowError
///     ├── LookupError ────── KeyError, IndexError
///     ├── ValueError
///     ├── TypeError
///     ├── RuntimeError ───── NotImplementedError
///     └── OSError ────────── FileNotFoundError, PermissionError,
///                            TimeoutError, ConnectionError
/// ```
pub mod builtins {
    use super::ExceptionClass;

    /// Root of every built-in class.
    pub static BASE_EXCEPTION: ExceptionClass = ExceptionClass::root("BaseException");

    /// Generator or coroutine teardown.
    pub static GENERATOR_EXIT: ExceptionClass =
        ExceptionClass::derive("GeneratorExit", &BASE_EXCEPTION);
    /// User interrupt.
    pub static KEYBOARD_INTERRUPT: ExceptionClass =
        ExceptionClass::derive("KeyboardInterrupt", &BASE_EXCEPTION);
    /// Process termination request.
    pub static SYSTEM_EXIT: ExceptionClass = ExceptionClass::derive("SystemExit", &BASE_EXCEPTION);
    /// Cancellation of an asynchronous task.
    pub static CANCELLED_ERROR: ExceptionClass =
        ExceptionClass::derive("CancelledError", &BASE_EXCEPTION);

    /// Base of all ordinary errors.
    pub static EXCEPTION: ExceptionClass = ExceptionClass::derive("Exception", &BASE_EXCEPTION);

    /// Arithmetic failures.
    pub static ARITHMETIC_ERROR: ExceptionClass =
        ExceptionClass::derive("ArithmeticError", &EXCEPTION);
    /// Division or modulo by zero.
    pub static ZERO_DIVISION_ERROR: ExceptionClass =
        ExceptionClass::derive("ZeroDivisionError", &ARITHMETIC_ERROR);
    /// Numeric overflow.
    pub static OVERFLOW_ERROR: ExceptionClass =
        ExceptionClass::derive("OverflowError", &ARITHMETIC_ERROR);

    /// Failed key or index lookup.
    pub static LOOKUP_ERROR: ExceptionClass = ExceptionClass::derive("LookupError", &EXCEPTION);
    /// Missing mapping key.
    pub static KEY_ERROR: ExceptionClass = ExceptionClass::derive("KeyError", &LOOKUP_ERROR);
    /// Sequence index out of range.
    pub static INDEX_ERROR: ExceptionClass = ExceptionClass::derive("IndexError", &LOOKUP_ERROR);

    /// Right type, wrong value.
    pub static VALUE_ERROR: ExceptionClass = ExceptionClass::derive("ValueError", &EXCEPTION);
    /// Wrong type.
    pub static TYPE_ERROR: ExceptionClass = ExceptionClass::derive("TypeError", &EXCEPTION);

    /// Error that fits no other category.
    pub static RUNTIME_ERROR: ExceptionClass = ExceptionClass::derive("RuntimeError", &EXCEPTION);
    /// Missing implementation.
    pub static NOT_IMPLEMENTED_ERROR: ExceptionClass =
        ExceptionClass::derive("NotImplementedError", &RUNTIME_ERROR);

    /// Operating system errors.
    pub static OS_ERROR: ExceptionClass = ExceptionClass::derive("OSError", &EXCEPTION);
    /// File or directory not found.
    pub static FILE_NOT_FOUND_ERROR: ExceptionClass =
        ExceptionClass::derive("FileNotFoundError", &OS_ERROR);
    /// Insufficient permissions.
    pub static PERMISSION_ERROR: ExceptionClass =
        ExceptionClass::derive("PermissionError", &OS_ERROR);
    /// System-level timeout.
    pub static TIMEOUT_ERROR: ExceptionClass = ExceptionClass::derive("TimeoutError", &OS_ERROR);
    /// Connection-related failures.
    pub static CONNECTION_ERROR: ExceptionClass =
        ExceptionClass::derive("ConnectionError", &OS_ERROR);

    /// Classes that are never suppressed, whatever the filter says.
    pub static ALWAYS_FATAL: [&ExceptionClass; 3] =
        [&GENERATOR_EXIT, &KEYBOARD_INTERRUPT, &SYSTEM_EXIT];

    pub(crate) static ALL: [&ExceptionClass; 21] = [
        &BASE_EXCEPTION,
        &GENERATOR_EXIT,
        &KEYBOARD_INTERRUPT,
        &SYSTEM_EXIT,
        &CANCELLED_ERROR,
        &EXCEPTION,
        &ARITHMETIC_ERROR,
        &ZERO_DIVISION_ERROR,
        &OVERFLOW_ERROR,
        &LOOKUP_ERROR,
        &KEY_ERROR,
        &INDEX_ERROR,
        &VALUE_ERROR,
        &TYPE_ERROR,
        &RUNTIME_ERROR,
        &NOT_IMPLEMENTED_ERROR,
        &OS_ERROR,
        &FILE_NOT_FOUND_ERROR,
        &PERMISSION_ERROR,
        &TIMEOUT_ERROR,
        &CONNECTION_ERROR,
    ];
}

/// Name-to-class lookup used when classes are given as strings.
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    classes: HashMap<&'static str, &'static ExceptionClass>,
}

impl ClassRegistry {
    /// Registry holding nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Registry holding every class in [`builtins`].
    #[must_use]
    pub fn builtin() -> Self {
        builtins::ALL
            .iter()
            .copied()
            .fold(Self::empty(), Self::with_class)
    }

    /// Register `class` under its name. A previous class with the same name is shadowed.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_class(mut self, class: &'static ExceptionClass) -> Self {
        self.classes.insert(class.name(), class);
        self
    }

    /// Look a class up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static ExceptionClass> {
        self.classes.get(name).copied()
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::builtins::*;
    use super::*;
    use pretty_assertions::assert_eq;

    static CUSTOM: ExceptionClass = ExceptionClass::derive("Custom", &KEY_ERROR);
    static VALUE_ERROR_LOOKALIKE: ExceptionClass = ExceptionClass::derive("ValueError", &EXCEPTION);
    static STUBBORN_INTERRUPT: ExceptionClass =
        ExceptionClass::derive("StubbornInterrupt", &KEYBOARD_INTERRUPT);

    #[test]
    fn subclass_check_is_reflexive() {
        assert!(VALUE_ERROR.is_subclass_of(&VALUE_ERROR));
    }

    #[test]
    fn subclass_check_walks_the_chain() {
        assert!(CUSTOM.is_subclass_of(&LOOKUP_ERROR));
        assert!(CUSTOM.is_subclass_of(&BASE_EXCEPTION));
        assert!(!CUSTOM.is_subclass_of(&INDEX_ERROR));
        assert!(!EXCEPTION.is_subclass_of(&CUSTOM));
    }

    #[test]
    fn identity_is_by_address_not_name() {
        assert_ne!(&VALUE_ERROR, &VALUE_ERROR_LOOKALIKE);
        assert!(!VALUE_ERROR_LOOKALIKE.is_subclass_of(&VALUE_ERROR));
    }

    #[test]
    fn ancestors_are_nearest_first() {
        let names: Vec<_> = ZERO_DIVISION_ERROR.ancestors().map(ExceptionClass::name).collect();
        assert_eq!(
            names,
            ["ZeroDivisionError", "ArithmeticError", "Exception", "BaseException"]
        );
    }

    #[test]
    fn always_fatal_covers_signals_and_their_subclasses() {
        assert!(GENERATOR_EXIT.is_always_fatal());
        assert!(KEYBOARD_INTERRUPT.is_always_fatal());
        assert!(SYSTEM_EXIT.is_always_fatal());
        assert!(STUBBORN_INTERRUPT.is_always_fatal());
        assert!(!BASE_EXCEPTION.is_always_fatal());
        assert!(!CANCELLED_ERROR.is_always_fatal());
        assert!(!VALUE_ERROR.is_always_fatal());
    }

    #[test]
    fn builtin_registry_knows_every_builtin() {
        let registry = ClassRegistry::builtin();
        assert_eq!(registry.len(), builtins::ALL.len());
        assert_eq!(registry.get("ZeroDivisionError"), Some(&ZERO_DIVISION_ERROR));
        assert_eq!(registry.get("kek"), None);
    }

    #[test]
    fn registered_class_shadows_builtin_name() {
        let registry = ClassRegistry::builtin().with_class(&VALUE_ERROR_LOOKALIKE);
        let found = registry.get("ValueError").map(|class| class as *const ExceptionClass);
        assert_eq!(found, Some(&VALUE_ERROR_LOOKALIKE as *const ExceptionClass));
    }
}
