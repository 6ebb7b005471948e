//! Scoped blocks
//!
//! A [`Block`] guards a region of code that produces no value. Exiting it
//! with a matching exception yields `Ok(())`; any other exception comes back
//! as `Err` and the caller propagates it with `?`.

use std::future::Future;

use crate::config::{Escape, NoDefault};
use crate::core::raise::Raise;
use crate::observability::CallShape;

/// A scoped block guarded by an [`Escape`] configuration.
///
/// Every method consumes the block, so it is exited exactly once.
///
/// # Example
///
/// ```
/// use escape::{Escape, Exception, builtins};
///
/// let mut flag = false;
/// let result = Escape::catching([&builtins::VALUE_ERROR])?
///     .block()?
///     .run(|| -> Result<(), Exception> {
///         let port: u16 = "https"
///             .parse()
///             .map_err(|_| Exception::new(&builtins::VALUE_ERROR))?;
///         flag = port > 0;
///         Ok(())
///     });
///
/// assert!(result.is_ok());
/// assert!(!flag);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// A block cannot be duplicated to exit it twice:
///
/// ```compile_fail
/// let block = escape::block();
/// let again = block.clone();
/// # let _ = (block, again);
/// ```
#[derive(Debug)]
#[must_use = "a block does nothing until it is run or exited"]
pub struct Block {
    config: Escape<NoDefault>,
}

impl Block {
    pub(crate) fn new(config: Escape<NoDefault>) -> Self {
        Self { config }
    }

    /// Configuration this block applies.
    #[must_use]
    pub fn config(&self) -> &Escape<NoDefault> {
        &self.config
    }

    /// Run `body` inside the block.
    pub fn run<E, F>(self, body: F) -> Result<(), E>
    where
        E: Raise,
        F: FnOnce() -> Result<(), E>,
    {
        self.exit(body())
    }

    /// Await `body` inside the block.
    pub async fn run_async<E, Fut>(self, body: Fut) -> Result<(), E>
    where
        E: Raise,
        Fut: Future<Output = Result<(), E>>,
    {
        self.exit(body.await)
    }

    /// Exit the block with the outcome of code that already ran.
    pub fn exit<E: Raise>(self, outcome: Result<(), E>) -> Result<(), E> {
        match self.config.settle(CallShape::ScopedBlock, outcome)? {
            Some(()) | None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::class::builtins::*;
    use crate::core::raise::Exception;
    use crate::observability::MemoryLogger;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn normal_exit_runs_to_completion() {
        let mut flag = false;
        let result = Escape::new().block().unwrap().run(|| {
            flag = true;
            Ok::<(), Exception>(())
        });
        assert!(result.is_ok());
        assert!(flag);
    }

    #[test]
    fn unmatched_exception_propagates() {
        let result = Escape::catching([&VALUE_ERROR])
            .unwrap()
            .block()
            .unwrap()
            .exit(Err(Exception::new(&KEY_ERROR)));
        assert_eq!(result.unwrap_err().class(), &KEY_ERROR);
    }

    #[test]
    fn exit_logs_block_message() {
        let logger = Arc::new(MemoryLogger::new());
        let block = Escape::new().logger(Arc::clone(&logger)).block().unwrap();
        block
            .exit(Err(Exception::with_message(&VALUE_ERROR, "lol kek cheburek")))
            .unwrap();

        assert_eq!(
            logger.exceptions(),
            [r#"The "ValueError" ("lol kek cheburek") exception was suppressed inside the context."#]
        );
    }

    #[tokio::test]
    async fn async_body_is_awaited() {
        let result = Escape::new()
            .block()
            .unwrap()
            .run_async(async {
                tokio::task::yield_now().await;
                Err(Exception::new(&RUNTIME_ERROR))
            })
            .await;
        assert!(result.is_ok());
    }
}
