//! # Play Command
//!
//! Interactive game: the human seat takes input from stdin, the automated seats
//! move on their own through the turn driver.
//!
//! On the human's turn the player must lay down one card, then either `draw`
//! (which ends the turn) or `pass`. A player left with no playable card is
//! eliminated automatically before being asked for input. Once the human is out
//! the remaining seats play the game to its end.

use crate::config::{self, Overrides};
use crate::driver::{Pacing, play_automated_turn};
use crate::error::CliError;
use crate::formatters::{
    format_card, format_hand, format_hidden_hand, format_player_stats, format_table, format_turn,
};
use crate::io_utils::read_stdin_line;
use crate::session::GameSession;
use crate::ui;
use crate::validation::{ParseResult, parse_turn_input};
use fifty_engine::engine::Engine;
use fifty_engine::errors::GameError;
use std::io::{BufRead, Write};
use tracing::info;

use super::bot_selectors;

enum HumanTurn {
    Done,
    Quit,
}

/// Handle the play command.
///
/// # Arguments
///
/// * `bots`, `seed`, `bot_policy`, `delay_ms` - Command-line overrides of the configuration
/// * `out` - Game display
/// * `err` - Warnings and rejected input
/// * `stdin` - Player input, one command per line
///
/// End of input is treated like `q`.
pub fn handle_play_command(
    bots: Option<usize>,
    seed: Option<u64>,
    bot_policy: Option<String>,
    delay_ms: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let resolved = config::resolve(&Overrides {
        bots,
        seed,
        bot_policy,
        delay_ms,
        ..Overrides::default()
    })?;
    let cfg = resolved.config;
    let seed = cfg.seed.unwrap_or_else(rand::random);

    let mut engine = Engine::new(Some(seed));
    engine.start(cfg.bots)?;
    info!(seed, bots = cfg.bots, policy = %cfg.bot_policy, "game started");

    let selectors = bot_selectors(&cfg.bot_policy, cfg.bots, seed)?;
    let pacing = Pacing::new(cfg.delay_ms);
    let session = GameSession::new(format!("play-{}", seed), engine);

    writeln!(
        out,
        "play: bots={} seed={} policy={}",
        cfg.bots, seed, cfg.bot_policy
    )?;

    loop {
        if session.with_engine(|e| e.is_game_over())? {
            break;
        }
        let (seat, machine) = session.with_engine(|e| {
            let seat = e.current_index();
            (seat, e.players()[seat].is_machine())
        })?;

        if machine {
            pacing.pause();
            let selector = selectors
                .get(seat - 1)
                .ok_or_else(|| CliError::Engine(format!("no selector for seat {}", seat)))?;
            let report = session.with_engine(|e| play_automated_turn(e, selector.as_ref()))??;
            writeln!(out, "{}", format_turn(&report))?;
            continue;
        }

        match human_turn(&session, out, err, stdin)? {
            HumanTurn::Done => {}
            HumanTurn::Quit => {
                writeln!(out, "Game abandoned.")?;
                return Ok(());
            }
        }
    }

    session.with_engine(|e| print_outcome(e, out))??;
    Ok(())
}

fn human_turn(
    session: &GameSession,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<HumanTurn, CliError> {
    let can_play = session.with_engine(|e| {
        let sum = e.table_sum();
        e.current_player().map(|p| p.can_play(sum))
    })??;
    if !can_play {
        session.with_engine(|e| print_state(e, out))??;
        let elimination = session.with_engine(|e| -> Result<_, GameError> {
            let elimination = e.eliminate_current_player()?;
            e.next_turn()?;
            Ok(elimination)
        })??;
        info!(player = %elimination.player, "player eliminated");
        writeln!(out, "You cannot play any card and are eliminated.")?;
        return Ok(HumanTurn::Done);
    }

    session.with_engine(|e| print_state(e, out))??;
    let mut played = false;
    loop {
        let prompt = if played {
            "draw or pass: "
        } else {
            "Your move (play <n> | <card> | hand | q): "
        };
        ui::prompt(out, prompt)?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            return Ok(HumanTurn::Quit);
        };
        let hand = session.with_engine(|e| e.current_player().map(|p| p.hand().to_vec()))??;

        match parse_turn_input(&line, &hand) {
            ParseResult::Play(card) => {
                if played {
                    ui::write_error(err, "You already played a card this turn")?;
                    continue;
                }
                match session.with_engine(|e| e.play_card(&card))? {
                    Ok(sum) => {
                        played = true;
                        writeln!(out, "You played {} (sum {})", format_card(&card), sum)?;
                    }
                    Err(e) => ui::write_error(err, &e.to_string())?,
                }
            }
            ParseResult::Draw => {
                if !played {
                    ui::write_error(err, "Play a card before drawing")?;
                    continue;
                }
                match session.with_engine(|e| e.draw_card())? {
                    Ok(draw) => {
                        if draw.recycled > 0 {
                            writeln!(
                                out,
                                "The deck ran out; {} table cards were reshuffled into it.",
                                draw.recycled
                            )?;
                        }
                        writeln!(out, "You drew {}", format_card(&draw.card))?;
                    }
                    Err(GameError::DeckEmpty) => {
                        ui::display_warning(err, "The deck is empty; no card drawn")?;
                    }
                    Err(e) => return Err(e.into()),
                }
                session.with_engine(|e| e.next_turn())??;
                return Ok(HumanTurn::Done);
            }
            ParseResult::Pass => {
                if !played {
                    ui::write_error(err, "Play a card before ending the turn")?;
                    continue;
                }
                session.with_engine(|e| e.next_turn())??;
                return Ok(HumanTurn::Done);
            }
            ParseResult::Hand => session.with_engine(|e| print_state(e, out))??,
            ParseResult::Quit => return Ok(HumanTurn::Quit),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
}

fn print_state(engine: &Engine, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out)?;
    writeln!(out, "{}", format_table(engine.top_card(), engine.table_sum()))?;
    writeln!(out, "Deck: {} cards", engine.deck_size())?;
    for player in engine.players().iter().filter(|p| p.is_machine()) {
        let status = if player.is_eliminated() {
            "out".to_string()
        } else {
            format_hidden_hand(player.hand().len())
        };
        writeln!(out, "{}: {}", player.name(), status)?;
    }
    let you = engine.current_player()?;
    writeln!(out, "Your hand: {}", format_hand(you.hand()))?;
    Ok(())
}

fn print_outcome(engine: &mut Engine, out: &mut dyn Write) -> Result<(), CliError> {
    let winner = engine
        .winner()
        .map(|p| (p.name().to_string(), p.is_machine()));
    match winner {
        Some((name, machine)) => {
            writeln!(out, "Winner: {}", name)?;
            writeln!(out, "{}", if machine { "You lose." } else { "You win!" })?;
            info!(winner = %name, "game over");
        }
        None => writeln!(out, "No winner.")?,
    }
    writeln!(out, "Turns: {}", engine.stats().total_turns)?;
    for (name, stats) in engine.all_player_stats() {
        writeln!(out, "{}", format_player_stats(name, stats))?;
    }
    Ok(())
}
