use clap::Parser;
use fnpipe::app::{handle_fatal_error, init_logging, AppConfig};
use fnpipe::cli::{execute_command, Cli};

// Scheduled work is cooperative: everything runs on a single thread.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.verbose, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => handle_fatal_error(e, cli.verbose),
    };
    init_logging(&config);

    if let Err(e) = execute_command(cli.command, &config).await {
        handle_fatal_error(e, config.verbose);
    }
}
