//! Core types: exception classes, the raise capability, filtering and invocation

pub mod class;
pub mod filter;
pub mod invoke;
pub mod raise;

pub use class::{ClassRegistry, ExceptionClass, builtins};
pub use filter::ExceptionFilter;
pub use invoke::Invoke;
pub use raise::{Exception, Raise};
