//! Error handling utilities

use tracing::error;

const GENERAL_ERROR: i32 = 1;
const ARGUMENT_ERROR: i32 = 2;

/// Exit code for an error that reached the top of the program
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<crate::Error>() {
        Some(
            crate::Error::Config(_)
            | crate::Error::Toml(_)
            | crate::Error::InvalidDemo(_)
            | crate::Error::SumOverflow { .. },
        ) => ARGUMENT_ERROR,
        Some(_) => GENERAL_ERROR,
        None if error.chain().any(|cause| cause.is::<toml::de::Error>()) => ARGUMENT_ERROR,
        None => GENERAL_ERROR,
    }
}

/// Handle fatal errors and exit with appropriate status code
///
/// - `verbose = 0`: the top-level message only
/// - `verbose >= 1`: the full error chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);
    eprintln!("Error: {error}");

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(exit_code(&error))
}
