//! Wrapping shorthand

/// Wrap a function under its own name.
///
/// ```
/// use escape::{Escape, Exception, builtins, escaped};
///
/// fn fails() -> Result<i32, Exception> {
///     Err(Exception::new(&builtins::KEY_ERROR))
/// }
///
/// async fn fetch() -> Result<i32, Exception> {
///     Ok(1)
/// }
///
/// let plain = escaped!(fails);
/// assert_eq!(plain.name(), "fails");
/// assert_eq!(plain.call(()).unwrap(), None);
///
/// let with_default = escaped!(Escape::new().default_return(13) => fails);
/// assert_eq!(with_default.call(()).unwrap(), 13);
///
/// let coroutine = escaped!(async fetch);
/// assert_eq!(coroutine.name(), "fetch");
/// ```
#[macro_export]
macro_rules! escaped {
    (async $function:path) => {
        $crate::wrap_async(stringify!($function), $function)
    };
    ($config:expr => async $function:path) => {
        ($config).wrap_async(stringify!($function), $function)
    };
    ($config:expr => $function:path) => {
        ($config).wrap(stringify!($function), $function)
    };
    ($function:path) => {
        $crate::wrap(stringify!($function), $function)
    };
}
