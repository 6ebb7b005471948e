//! Executors applying a configuration to guarded code
//!
//! - [`Escaped`]: synchronous functions
//! - [`EscapedAsync`]: asynchronous functions
//! - [`Block`]: scoped blocks

pub mod block;
pub mod coroutine;
pub mod function;

pub use block::Block;
pub use coroutine::EscapedAsync;
pub use function::Escaped;
