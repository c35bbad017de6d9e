//! `fifty cfg`: prints the resolved configuration as JSON, each value paired
//! with its source.
//!
//! ```json
//! {
//!   "bots": { "value": 1, "source": "default" },
//!   "seed": { "value": 42, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::display_warning(err, "check the FIFTY_* variables and the FIFTY_CONFIG file")?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "bots": { "value": config.bots, "source": sources.bots },
        "seed": { "value": config.seed, "source": sources.seed },
        "bot_policy": { "value": config.bot_policy, "source": sources.bot_policy },
        "human_policy": { "value": config.human_policy, "source": sources.human_policy },
        "delay_ms": { "value": config.delay_ms, "source": sources.delay_ms },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
