//! Command routing and execution

use crate::app::AppConfig;
use crate::cli::args::Commands;
use crate::demos::{self, DemoId, DemoOutcome};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::debug;

/// Demo that runs when no subcommand is given
pub const DEFAULT_DEMO: DemoId = DemoId::UseCase;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Option<Commands>, config: &AppConfig) -> Result<()> {
    let mut out = std::io::stdout();

    match command {
        Some(Commands::Demo { id }) => run_demo(id, config, &mut out).await,
        Some(Commands::List) => list_demos(&mut out),
        Some(Commands::Sum { n, recursive }) => {
            let n = n.unwrap_or(config.sum_target);
            if recursive {
                demos::sums::recursive(n, &mut out)?;
            } else {
                demos::sums::tail_optimized(n, &mut out)?;
            }
            Ok(())
        }
        None => run_demo(DEFAULT_DEMO.number(), config, &mut out).await,
    }
}

async fn run_demo<W: Write + Send>(id: u32, config: &AppConfig, out: &mut W) -> Result<()> {
    let outcome = demos::execute_demo(id, &config.demo_context(), out)
        .await
        .with_context(|| format!("Demo {id} failed"))?;

    if let DemoOutcome::Completed(demo) = outcome {
        debug!(%demo, "demo finished");
    }
    Ok(())
}

fn list_demos<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Available demos:")?;
    for demo in DemoId::ALL {
        writeln!(out, "  {demo}")?;
    }
    Ok(())
}
