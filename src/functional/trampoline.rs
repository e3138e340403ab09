//! Stack-safe tail recursion
//!
//! A step function returns either a finished value or a thunk holding the next
//! step. [`trampoline`] drives the thunks in a loop, so recursion depth stays
//! constant no matter how many steps the computation takes.

use crate::{Error, Result};
use std::fmt;

/// Result of one tail-recursive step
pub enum Bounce<T> {
    /// The computation has finished
    Done(T),
    /// More work remains; call the thunk to take the next step
    More(Box<dyn FnOnce() -> Bounce<T>>),
}

impl<T> Bounce<T> {
    /// Defer the next step
    pub fn more<F>(thunk: F) -> Self
    where
        F: FnOnce() -> Bounce<T> + 'static,
    {
        Bounce::More(Box::new(thunk))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Bounce::Done(_))
    }

    /// Invoke thunks until a value is produced
    ///
    /// A chain of thunks that never finishes never returns.
    pub fn run(self) -> T {
        let mut current = self;
        loop {
            match current {
                Bounce::Done(value) => return value,
                Bounce::More(thunk) => current = thunk(),
            }
        }
    }

    /// Like [`run`](Self::run), but give up after `max_steps` thunk invocations
    pub fn run_bounded(self, max_steps: usize) -> Result<T> {
        let mut current = self;
        for _ in 0..max_steps {
            match current {
                Bounce::Done(value) => return Ok(value),
                Bounce::More(thunk) => current = thunk(),
            }
        }
        match current {
            Bounce::Done(value) => Ok(value),
            Bounce::More(_) => Err(Error::TrampolineLimit { steps: max_steps }),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Bounce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bounce::Done(value) => f.debug_tuple("Done").field(value).finish(),
            Bounce::More(_) => write!(f, "More(<thunk>)"),
        }
    }
}

/// Turn a tail-recursive step function into an iterative one with the same signature
pub fn trampoline<A, T, F>(step: F) -> impl Fn(A) -> T
where
    F: Fn(A) -> Bounce<T>,
{
    move |args| step(args).run()
}

/// Largest `n` whose sum `0..=n` fits in a `u64`
pub const MAX_SUM_INPUT: u64 = 6_074_000_999;

/// One step of summing `count + (count - 1) + ... + 1` onto `acc`
///
/// Finishes with `Error::SumOverflow` as soon as the running total would
/// exceed `u64::MAX`.
pub fn tail_optimized_sum((count, acc): (u64, u64)) -> Bounce<Result<u64>> {
    if count == 0 {
        return Bounce::Done(Ok(acc));
    }
    match acc.checked_add(count) {
        Some(next) => Bounce::more(move || tail_optimized_sum((count - 1, next))),
        None => Bounce::Done(Err(Error::SumOverflow { term: count })),
    }
}

fn ensure_sum_fits(n: u64) -> Result<()> {
    if n > MAX_SUM_INPUT {
        return Err(Error::SumOverflow { term: n });
    }
    Ok(())
}

/// Sum of the integers `0..=n`, computed through the trampoline
pub fn sum_to(n: u64) -> Result<u64> {
    ensure_sum_fits(n)?;
    trampoline(tail_optimized_sum)((n, 0))
}

/// Sum of the integers `0..=n` by plain recursion; stack depth grows with `n`
pub fn recursive_sum(n: u64) -> Result<u64> {
    fn go(n: u64) -> u64 {
        if n == 0 {
            0
        } else {
            n + go(n - 1)
        }
    }

    ensure_sum_fits(n)?;
    Ok(go(n))
}
