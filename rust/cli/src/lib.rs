//! # Fifty CLI Library
//!
//! Terminal host for the Fifty card game engine: interactive play, batch
//! simulation, history statistics, and configuration inspection.
//!
//! The primary entry point is [`run`], which parses arguments and dispatches
//! to a subcommand. Output streams are passed in so the whole CLI can be driven
//! from tests.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["fifty", "play", "--bots", "2"];
//! let code = fifty_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play against one to three automated seats
//! - `sim`: Run automated games and optionally record them as JSONL
//! - `stats`: Aggregate recorded games
//! - `deal`: Print an opening position
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
pub mod driver;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod history;
pub mod io_utils;
pub mod logging;
pub mod session;
pub mod ui;
pub mod validation;

use cli::{Commands, FiftyCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_sim_command,
    handle_stats_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "stats", "deal", "cfg"];

/// Main entry point for the CLI application.
///
/// Returns the process exit code: `0` for success, `2` for errors, `130` when
/// a simulation was interrupted.
///
/// ```
/// use std::io;
/// let args = vec!["fifty", "deal", "--seed", "42"];
/// let mut out = Vec::new();
/// let code = fifty_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("seed=42"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match FiftyCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    logging::init_logging(cli.verbose);

    let result = match cli.cmd {
        Commands::Play {
            bots,
            seed,
            bot_policy,
            delay_ms,
        } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(bots, seed, bot_policy, delay_ms, out, err, &mut stdin_lock)
        }
        Commands::Sim {
            games,
            bots,
            seed,
            bot_policy,
            human_policy,
            output,
        } => handle_sim_command(
            games,
            bots,
            seed,
            bot_policy,
            human_policy,
            output,
            out,
            err,
        ),
        Commands::Stats { input } => handle_stats_command(input, out, err),
        Commands::Deal { bots, seed } => handle_deal_command(bots, seed, out),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Usage: fifty <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: fifty --help");
    exit_code::ERROR
}
