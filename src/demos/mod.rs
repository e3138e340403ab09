//! Demo selection
//!
//! Each demo writes its narration to the supplied writer. Diagnostics, such as
//! the argument records from `log`, go through `tracing` instead.

pub mod memoization;
pub mod sums;
pub mod transactions;

use crate::usecase::PipelineTimings;
use crate::{Error, Result};
use std::fmt;
use std::io::Write;
use tracing::{debug, warn};

/// Number the default sum demos run up to
pub const DEFAULT_SUM_TARGET: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoId {
    Basic = 1,
    Composition = 2,
    UseCase = 3,
    TailOptimizedSum = 4,
    RecursiveSum = 5,
}

impl DemoId {
    pub const ALL: [DemoId; 5] = [
        DemoId::Basic,
        DemoId::Composition,
        DemoId::UseCase,
        DemoId::TailOptimizedSum,
        DemoId::RecursiveSum,
    ];

    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn description(self) -> &'static str {
        match self {
            DemoId::Basic => "Logged and memoized functions",
            DemoId::Composition => "Decorators combined with compose!",
            DemoId::UseCase => "Cross-department transaction pipelines",
            DemoId::TailOptimizedSum => "Stack-safe sum through a trampoline",
            DemoId::RecursiveSum => "Naive recursive sum",
        }
    }
}

impl TryFrom<u32> for DemoId {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        DemoId::ALL
            .into_iter()
            .find(|id| id.number() == value)
            .ok_or(Error::InvalidDemo(value))
    }
}

impl fmt::Display for DemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.description())
    }
}

/// Settings shared by all demos
#[derive(Debug, Clone)]
pub struct DemoContext {
    pub timings: PipelineTimings,
    pub sum_target: u64,
}

impl Default for DemoContext {
    fn default() -> Self {
        Self {
            timings: PipelineTimings::default(),
            sum_target: DEFAULT_SUM_TARGET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoOutcome {
    Completed(DemoId),
    InvalidOption(u32),
}

/// Run the demo numbered `id`
///
/// An unknown number is reported as `Invalid option` and is not an error.
pub async fn execute_demo<W>(id: u32, context: &DemoContext, out: &mut W) -> Result<DemoOutcome>
where
    W: Write + Send,
{
    let demo = match DemoId::try_from(id) {
        Ok(demo) => demo,
        Err(e) => {
            warn!("{e}");
            writeln!(out, "Invalid option")?;
            return Ok(DemoOutcome::InvalidOption(id));
        }
    };

    debug!(%demo, "running demo");
    match demo {
        DemoId::Basic => memoization::basic(out)?,
        DemoId::Composition => memoization::composition(out)?,
        DemoId::UseCase => transactions::run(&context.timings, out).await?,
        DemoId::TailOptimizedSum => {
            sums::tail_optimized(context.sum_target, out)?;
        }
        DemoId::RecursiveSum => {
            sums::recursive(context.sum_target, out)?;
        }
    }
    Ok(DemoOutcome::Completed(demo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_ids_round_trip_numbers() {
        for demo in DemoId::ALL {
            assert_eq!(DemoId::try_from(demo.number()).unwrap(), demo);
        }
        assert!(matches!(DemoId::try_from(0), Err(Error::InvalidDemo(0))));
        assert!(matches!(DemoId::try_from(6), Err(Error::InvalidDemo(6))));
    }

    #[tokio::test]
    async fn test_invalid_option_is_reported_not_raised() {
        let mut out = Vec::new();
        let outcome = execute_demo(42, &DemoContext::default(), &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, DemoOutcome::InvalidOption(42));
        assert_eq!(String::from_utf8(out).unwrap(), "Invalid option\n");
    }

    #[tokio::test]
    async fn test_sum_demo_through_registry() {
        let mut out = Vec::new();
        let outcome = execute_demo(4, &DemoContext::default(), &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, DemoOutcome::Completed(DemoId::TailOptimizedSum));
        assert!(String::from_utf8(out).unwrap().contains("50005000"));
    }
}
