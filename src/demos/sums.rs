use crate::functional::{recursive_sum, sum_to};
use crate::Result;
use std::io::Write;

/// Sum `0..=n` through the trampoline
pub fn tail_optimized<W: Write>(n: u64, out: &mut W) -> Result<u64> {
    let sum = sum_to(n)?;
    writeln!(out, "Tail Optimized Sum: {sum}")?;
    Ok(sum)
}

/// Sum `0..=n` by plain recursion; large `n` overflows the stack
pub fn recursive<W: Write>(n: u64, out: &mut W) -> Result<u64> {
    let sum = recursive_sum(n)?;
    writeln!(out, "Recursive Sum: {sum}")?;
    Ok(sum)
}
