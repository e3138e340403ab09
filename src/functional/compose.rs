//! Right-to-left function composition
//!
//! `compose(f, g)` builds `|x| f(g(x))`. The [`compose!`](crate::compose) macro
//! folds any non-empty list of functions the same way, so the last function is
//! the terminal one and runs first. [`compose_all`] does the same for a chain
//! whose length is only known at runtime.

use super::Func;
use crate::{Error, Result};
use std::sync::Arc;

/// Compose two functions: the result applies `g` first, then `f`
pub fn compose<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
where
    F: Fn(B) -> C,
    G: Fn(A) -> B,
{
    move |args| f(g(args))
}

/// Compose a runtime sequence of same-typed functions right-to-left
///
/// The last element is the terminal function. An empty sequence is rejected
/// with [`Error::EmptyComposition`] rather than treated as the identity.
pub fn compose_all<T>(fns: Vec<Func<T, T>>) -> Result<Func<T, T>>
where
    T: 'static,
{
    let mut chain = fns.into_iter().rev();
    let terminal = chain.next().ok_or(Error::EmptyComposition)?;

    Ok(chain.fold(terminal, |inner, outer| {
        let wrapped: Func<T, T> = Arc::new(move |args: T| outer(inner(args)));
        wrapped
    }))
}

/// Compose functions right-to-left: `compose!(f, g, h)(x) == f(g(h(x)))`
///
/// A single function composes to itself. Calling the macro with no functions
/// does not compile.
#[macro_export]
macro_rules! compose {
    ($f:expr $(,)?) => {
        $f
    };
    ($f:expr, $($rest:expr),+ $(,)?) => {
        $crate::functional::compose::compose($f, $crate::compose!($($rest),+))
    };
}
