//! `fifty deal`: starts a game and prints the opening position, every hand
//! face up, without playing a turn.

use crate::config::{self, Overrides};
use crate::error::CliError;
use crate::formatters::{format_hand, format_table};
use fifty_engine::engine::Engine;
use std::io::Write;
use tracing::info;

pub fn handle_deal_command(
    bots: Option<usize>,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::resolve(&Overrides {
        bots,
        seed,
        ..Overrides::default()
    })?;
    let cfg = resolved.config;
    let seed = cfg.seed.unwrap_or_else(rand::random);

    let mut engine = Engine::new(Some(seed));
    engine.start(cfg.bots)?;
    info!(seed, bots = cfg.bots, "game dealt");

    writeln!(out, "deal: bots={} seed={}", cfg.bots, seed)?;
    for player in engine.players() {
        writeln!(out, "{:<6} {}", player.name(), format_hand(player.hand()))?;
    }
    writeln!(out, "{}", format_table(engine.top_card(), engine.table_sum()))?;
    writeln!(out, "Deck: {} cards", engine.deck_size())?;
    Ok(())
}
