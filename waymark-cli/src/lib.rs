//! Command-line interface for replaying Waymark map sessions.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod replay;
mod script;

pub use error::CliError;

use replay::{ReplayArgs, run_replay};

const ARG_SCRIPT: &str = "script";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_OFFLINE: &str = "offline";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_SCRIPT: &str = "WAYMARK_CMDS_REPLAY_SCRIPT";

/// Run the Waymark CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// session script cannot be loaded, or the report cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Replay(args) => run_replay(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waymark",
    about = "Replay map sessions against the Waymark controller",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Drive a headless map through a scripted session and print a report.
    Replay(ReplayArgs),
}

#[cfg(test)]
mod tests;
