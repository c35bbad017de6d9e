//! Simulation command: fully automated games.
//!
//! Game `i` (counting from 0) is dealt from `seed + i`, so any single game of a
//! run can be reproduced with `fifty deal --seed`. The human seat is played by
//! `--human-policy`.
//!
//! # Environment Variables
//!
//! - `FIFTY_SIM_BREAK_AFTER`: stop after N games and exit with code 130 (for testing)

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use fifty_ai::{CardSelector, create_selector};
use fifty_engine::engine::Engine;
use tracing::{debug, info};

use super::bot_selectors;
use crate::config::{self, Overrides};
use crate::driver::{DEFAULT_TURN_LIMIT, run_game};
use crate::error::CliError;
use crate::history::{GameLogger, GameRecord};
use crate::ui;

pub const BREAK_AFTER_ENV: &str = "FIFTY_SIM_BREAK_AFTER";

/// Handle the sim command.
///
/// Prints one summary line per seat with its win count. With `output`, one
/// [`GameRecord`] per game is appended to that file.
#[allow(clippy::too_many_arguments)]
pub fn handle_sim_command(
    games: u32,
    bots: Option<usize>,
    seed: Option<u64>,
    bot_policy: Option<String>,
    human_policy: Option<String>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }

    let resolved = config::resolve(&Overrides {
        bots,
        seed,
        bot_policy,
        human_policy,
        delay_ms: None,
    })?;
    let cfg = resolved.config;
    let base_seed = cfg.seed.unwrap_or_else(rand::random);

    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok());

    let mut logger = match output.as_deref() {
        Some(path) => Some(GameLogger::append(Path::new(path))?),
        None => None,
    };

    writeln!(
        out,
        "sim: games={} bots={} seed={} bot_policy={} human_policy={}",
        games, cfg.bots, base_seed, cfg.bot_policy, cfg.human_policy
    )?;

    let mut wins: BTreeMap<String, u32> = BTreeMap::new();
    let mut unfinished = 0u32;
    let mut total_turns = 0u64;
    let mut completed = 0u32;

    for i in 0..games {
        if break_after == Some(completed) {
            writeln!(out, "Stopped after {} of {} games", completed, games)?;
            return Err(CliError::Interrupted(format!(
                "stopped after {} games",
                completed
            )));
        }

        let game_seed = base_seed.wrapping_add(u64::from(i));
        let mut engine = Engine::new(Some(game_seed));
        engine.start(cfg.bots)?;

        let mut selectors: Vec<Box<dyn CardSelector>> = Vec::with_capacity(cfg.bots + 1);
        selectors.push(
            create_selector(&cfg.human_policy, Some(game_seed))
                .map_err(|e| CliError::Config(e.to_string()))?,
        );
        selectors.extend(bot_selectors(&cfg.bot_policy, cfg.bots, game_seed)?);

        let summary = run_game(&mut engine, &selectors, DEFAULT_TURN_LIMIT)?;
        debug!(game = i, seed = game_seed, turns = summary.turns, "game finished");

        for player in engine.players() {
            wins.entry(player.name().to_string()).or_insert(0);
        }
        match &summary.winner {
            Some(name) => *wins.entry(name.clone()).or_insert(0) += 1,
            None => unfinished += 1,
        }
        total_turns += u64::from(engine.stats().total_turns);

        if let Some(logger) = logger.as_mut() {
            let record = GameRecord {
                game_id: logger.next_id(),
                seed: game_seed,
                players: engine
                    .players()
                    .iter()
                    .map(|p| p.name().to_string())
                    .collect(),
                bot_policy: cfg.bot_policy.clone(),
                human_policy: cfg.human_policy.clone(),
                winner: summary.winner.clone(),
                stats: *engine.stats(),
                player_stats: engine.all_player_stats().clone(),
                ts: None,
            };
            logger.write(&record)?;
        }
        completed += 1;
    }

    info!(games = completed, unfinished, "simulation complete");
    writeln!(out, "Games: {}", completed)?;
    writeln!(out, "Wins:")?;
    for (name, count) in &wins {
        writeln!(out, "  {}: {}", name, count)?;
    }
    if unfinished > 0 {
        writeln!(out, "Unfinished: {}", unfinished)?;
    }
    writeln!(
        out,
        "Average turns: {:.1}",
        total_turns as f64 / f64::from(completed)
    )?;
    Ok(())
}
