//! Wrapper for asynchronous functions

use std::borrow::Cow;
use std::fmt;
use std::future::Future;

use crate::config::{Escape, NoDefault, Substitute};
use crate::core::invoke::Invoke;
use crate::core::raise::Raise;
use crate::observability::CallShape;

/// An asynchronous function guarded by an [`Escape`] configuration.
///
/// The wrapped future is awaited exactly once; that await is the only
/// suspension point the wrapper adds. Dropping the future returned by
/// [`EscapedAsync::call`] drops the wrapped future with it.
pub struct EscapedAsync<F, D = NoDefault> {
    name: Cow<'static, str>,
    function: F,
    config: Escape<D>,
}

impl<F, D> EscapedAsync<F, D> {
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

    /// Call the function with `args` and await it.
    pub async fn call<Args, Fut, T, E>(&self, args: Args) -> Result<D::Output, E>
    where
        F: Invoke<Args, Output = Fut>,
        Fut: Future<Output = Result<T, E>>,
        E: Raise,
        D: Substitute<T>,
    {
        let result = self.function.invoke(args).await;
        self.config
            .settle(CallShape::AsynchronousFunction { name: &self.name }, result)
    }
}

impl<F: Clone, D: Clone> Clone for EscapedAsync<F, D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            function: self.function.clone(),
            config: self.config.clone(),
        }
    }
}

impl<F, D: fmt::Debug> fmt::Debug for EscapedAsync<F, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EscapedAsync")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::class::builtins::*;
    use crate::core::raise::Exception;
    use pretty_assertions::assert_eq;

    async fn add(a: i32, b: i32, c: i32) -> Result<i32, Exception> {
        tokio::task::yield_now().await;
        Ok(a + b + c)
    }

    async fn fails() -> Result<i32, Exception> {
        Err(Exception::new(&KEY_ERROR))
    }

    #[tokio::test]
    async fn awaits_and_passes_value_through() {
        let wrapped = Escape::new().wrap_async("add", add);
        assert_eq!(wrapped.call((1, 2, 5)).await.unwrap(), Some(8));
    }

    #[tokio::test]
    async fn unmatched_error_is_returned() {
        let wrapped = Escape::catching([&VALUE_ERROR]).unwrap().wrap_async("fails", fails);
        let err = wrapped.call(()).await.unwrap_err();
        assert_eq!(err.class(), &KEY_ERROR);
    }

    #[tokio::test]
    async fn wrapper_future_is_send() {
        fn assert_send<T: Send>(value: T) -> T {
            value
        }

        let wrapped = Escape::new().default_return(0).wrap_async("fails", fails);
        let value = assert_send(wrapped.call(())).await.unwrap();
        assert_eq!(value, 0);
    }
}
