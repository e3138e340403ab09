//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Function composition, memoization and trampolines driving pub/sub pipelines
#[derive(Parser)]
#[command(name = "fnpipe")]
#[command(about = "fnpipe - Higher-order functions driving transaction pipelines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a demo by number (see `list`)
    #[command(name = "demo")]
    Demo {
        /// Demo number
        id: u32,
    },

    /// List the available demos
    #[command(name = "list")]
    List,

    /// Sum the integers 0..=N
    #[command(name = "sum")]
    Sum {
        /// Upper bound (defaults to the configured sum target)
        n: Option<u64>,

        /// Use plain recursion instead of the trampoline
        #[arg(long)]
        recursive: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_demo_with_global_flags() {
        let cli = Cli::try_parse_from(["fnpipe", "demo", "3", "-vv", "-c", "x.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Some(Commands::Demo { id: 3 })));
    }

    #[test]
    fn test_parse_sum() {
        let cli = Cli::try_parse_from(["fnpipe", "sum", "100", "--recursive"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Sum {
                n: Some(100),
                recursive: true
            })
        ));
    }
}
