//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function returning the process exit code

use std::process::ExitCode;

use crate::cli::{Cli, Commands};
use crate::error::Result;

pub mod markdown;
pub mod validate;

/// Dispatch a command to its handler
pub fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Validate(args) => validate::run(cli, args),
        Commands::Markdown(args) => markdown::run(args),
    }
}

/// Exit status for "something was found".
pub(crate) fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
