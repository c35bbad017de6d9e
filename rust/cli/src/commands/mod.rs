//! Command handler modules for the Fifty CLI.
//!
//! Each subcommand lives in its own module with the same shape:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, so tests can capture them
//! - Errors propagated through [`CliError`](crate::error::CliError)

pub mod cfg;
pub mod deal;
pub mod play;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;

use fifty_ai::{CardSelector, create_selector};

use crate::error::CliError;

/// Builds one selector per automated seat. Each seat gets its own random stream.
pub(crate) fn bot_selectors(
    policy: &str,
    bots: usize,
    seed: u64,
) -> Result<Vec<Box<dyn CardSelector>>, CliError> {
    (1..=bots)
        .map(|seat| {
            create_selector(policy, Some(seed.wrapping_add(seat as u64)))
                .map_err(|e| CliError::Config(e.to_string()))
        })
        .collect()
}
