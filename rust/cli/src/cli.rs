//! Command-line surface, parsed with clap.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "fifty",
    version,
    about = "Fifty: keep the table sum at or below 50, last player standing wins"
)]
pub struct FiftyCli {
    /// Log engine events at debug level on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play an interactive game against automated seats
    Play {
        /// Number of automated opponents (1-3)
        #[arg(long)]
        bots: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Selection policy for the opponents (baseline, cautious, random)
        #[arg(long)]
        bot_policy: Option<String>,
        /// Pause before each opponent turn, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Run fully automated games and report win counts
    Sim {
        #[arg(long)]
        games: u32,
        #[arg(long)]
        bots: Option<usize>,
        /// Base seed; game i uses seed + i
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        bot_policy: Option<String>,
        /// Policy playing the human seat
        #[arg(long)]
        human_policy: Option<String>,
        /// Append one JSON line per game to this file
        #[arg(long)]
        output: Option<String>,
    },
    /// Aggregate a game history file written by `sim`
    Stats {
        /// JSONL file (optionally .zst) or a directory of them
        #[arg(long)]
        input: String,
    },
    /// Start a game and print the opening position
    Deal {
        #[arg(long)]
        bots: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
