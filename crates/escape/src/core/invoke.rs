//! Calling wrapped functions with a tuple of arguments
//!
//! [`Invoke`] is implemented for every `Fn` taking up to six arguments, so a
//! wrapper can forward `call((a, b))` to `f(a, b)` without knowing the arity.

/// A function callable with the argument tuple `Args`.
pub trait Invoke<Args> {
    /// Return type of the function.
    type Output;

    /// Call the function, spreading `args` over its parameters.
    fn invoke(&self, args: Args) -> Self::Output;
}

macro_rules! impl_invoke {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg,)*> Invoke<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Out,
        {
            type Output = Out;

            #[allow(non_snake_case, clippy::unused_unit)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) -> Out {
                (self)($($arg),*)
            }
        }
    };
}

impl_invoke!();
impl_invoke!(A1);
impl_invoke!(A1, A2);
impl_invoke!(A1, A2, A3);
impl_invoke!(A1, A2, A3, A4);
impl_invoke!(A1, A2, A3, A4, A5);
impl_invoke!(A1, A2, A3, A4, A5, A6);
