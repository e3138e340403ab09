//! Higher-order function toolkit
//!
//! Small combinators that operate on shared function values:
//!
//! - `compose` - right-to-left composition (`compose!(f, g, h)(x) == f(g(h(x)))`)
//! - `log` - decorator that records the arguments of every call
//! - `memoize` - decorator that caches results keyed by the encoded argument tuple
//! - `trampoline` - iterative driver for tail-recursive steps expressed as thunks
//!
//! Multi-argument functions take their arguments as a tuple, so every function
//! value is unary: `Func<(String, String), String>` is a two-argument function.

use std::sync::Arc;

pub mod compose;
pub mod log;
pub mod memoize;
pub mod trampoline;

pub use compose::{compose, compose_all};
pub use log::{log, log_with, LOG_PREFIX};
pub use memoize::{memoize, memoize_bounded, MemoKey, Memoized};
pub use trampoline::{
    recursive_sum, sum_to, tail_optimized_sum, trampoline, Bounce, MAX_SUM_INPUT,
};

/// A shared, thread-safe function value taking an argument tuple `A`
pub type Func<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;

/// A function value that wraps another function value of the same signature
pub type Decorator<A, R> = Func<Func<A, R>, Func<A, R>>;

/// Lift a closure or function item into a [`Func`]
pub fn func<A, R, F>(f: F) -> Func<A, R>
where
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Lift a decorator closure into a [`Decorator`] value so it can be composed
pub fn decorator<A, R, F>(f: F) -> Decorator<A, R>
where
    A: 'static,
    R: 'static,
    F: Fn(Func<A, R>) -> Func<A, R> + Send + Sync + 'static,
{
    Arc::new(f)
}
