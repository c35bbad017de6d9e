//! Turn sequencing for automated seats.
//!
//! The engine never advances on its own; this module strings its calls together
//! the way a seat without a keyboard takes its turn: eliminate when stuck,
//! otherwise play the selected card, draw, and pass the turn.

use std::time::Duration;

use fifty_ai::CardSelector;
use fifty_engine::cards::Card;
use fifty_engine::engine::{Draw, Engine};
use fifty_engine::errors::GameError;
use tracing::{debug, info, warn};

/// What one automated turn did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnReport {
    Played {
        player: String,
        card: Card,
        /// Table sum after the card landed
        sum: i32,
        /// `None` when the deck was empty and nothing could be recycled
        drawn: Option<Draw>,
    },
    Eliminated {
        player: String,
        /// Cards folded back into the deck
        returned: usize,
    },
}

/// Result of driving a game until it ends or the turn limit is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub winner: Option<String>,
    pub turns: u32,
}

/// Upper bound on turns in an unattended game.
pub const DEFAULT_TURN_LIMIT: u32 = 5_000;

/// Takes the current player's whole turn using `selector`.
///
/// A draw that fails with [`GameError::DeckEmpty`] does not end the game: the
/// turn simply passes without a new card.
pub fn play_automated_turn(
    engine: &mut Engine,
    selector: &dyn CardSelector,
) -> Result<TurnReport, GameError> {
    if engine.is_game_over() {
        return Err(GameError::InvalidGameState("game is already over".into()));
    }
    let sum = engine.table_sum();
    let (player, can_play, choice) = {
        let current = engine.current_player()?;
        (
            current.name().to_string(),
            current.can_play(sum),
            selector.select(current.hand(), sum),
        )
    };

    if !can_play {
        let elimination = engine.eliminate_current_player()?;
        info!(
            player = %elimination.player,
            returned = elimination.returned,
            sum,
            "player eliminated"
        );
        engine.next_turn()?;
        return Ok(TurnReport::Eliminated {
            player: elimination.player,
            returned: elimination.returned,
        });
    }

    let Some(card) = choice else {
        return Err(GameError::InvalidGameState(format!(
            "{} chose no card for a playable hand",
            selector.name()
        )));
    };
    let new_sum = engine.play_card(&card)?;
    debug!(
        player = %player,
        card = %card,
        sum = new_sum,
        policy = selector.name(),
        "card played"
    );

    let drawn = match engine.draw_card() {
        Ok(draw) => {
            if draw.recycled > 0 {
                info!(recycled = draw.recycled, "table recycled into deck");
            }
            Some(draw)
        }
        Err(GameError::DeckEmpty) => {
            warn!(player = %player, "draw failed: deck empty");
            None
        }
        Err(e) => return Err(e),
    };

    engine.next_turn()?;
    Ok(TurnReport::Played {
        player,
        card,
        sum: new_sum,
        drawn,
    })
}

/// Runs a started game to the end, seat `i` choosing with `selectors[i]`.
///
/// Stops early with `winner: None` after `turn_limit` turns.
pub fn run_game(
    engine: &mut Engine,
    selectors: &[Box<dyn CardSelector>],
    turn_limit: u32,
) -> Result<GameSummary, GameError> {
    if selectors.len() != engine.players().len() {
        return Err(GameError::InvalidGameState(format!(
            "{} selectors for {} seats",
            selectors.len(),
            engine.players().len()
        )));
    }
    let mut turns = 0u32;
    while !engine.is_game_over() {
        if turns >= turn_limit {
            warn!(turns, "turn limit reached, abandoning game");
            return Ok(GameSummary {
                winner: None,
                turns,
            });
        }
        let seat = engine.current_index();
        play_automated_turn(engine, selectors[seat].as_ref())?;
        turns += 1;
    }
    let winner = engine.winner().map(|p| p.name().to_string());
    if let Some(name) = &winner {
        info!(winner = %name, turns, "game over");
    }
    Ok(GameSummary { winner, turns })
}

/// Optional pause before each automated turn so a watching player can follow along.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pacing {
    delay: Duration,
}

impl Pacing {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn pause(&self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TestLogSubscriber;
    use fifty_ai::create_selector;
    use fifty_engine::cards::full_deck;
    use fifty_engine::deck::Deck;
    use fifty_engine::player::Player;
    use fifty_engine::table::Table;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    fn c(code: &str) -> Card {
        code.parse().unwrap()
    }

    /// Two seats; everything not in a hand or on the table goes to the deck.
    fn arranged(human: &[&str], bot: &[&str], table: &[&str], sum: i32, current: usize) -> Engine {
        let mut used: Vec<Card> = Vec::new();
        let mut you = Player::human("You");
        for code in human {
            you.add_card(c(code));
            used.push(c(code));
        }
        let mut b = Player::machine("Bot 1");
        for code in bot {
            b.add_card(c(code));
            used.push(c(code));
        }
        let played: Vec<Card> = table.iter().map(|s| c(s)).collect();
        used.extend(played.iter().copied());
        let rest: Vec<Card> = full_deck()
            .into_iter()
            .filter(|card| !used.contains(card))
            .collect();
        Engine::arranged(
            vec![you, b],
            Table::with_cards(played, sum),
            Deck::from_cards(rest, 1),
            current,
        )
        .unwrap()
    }

    #[test]
    fn stuck_seat_is_eliminated_and_turn_passes() {
        let mut engine = arranged(&["2C"], &["10H", "8D"], &["5S"], 45, 1);
        let ai = create_selector("baseline", None).unwrap();
        let report = play_automated_turn(&mut engine, ai.as_ref()).unwrap();
        assert_eq!(
            report,
            TurnReport::Eliminated {
                player: "Bot 1".into(),
                returned: 2
            }
        );
        assert!(engine.is_game_over());
        assert_eq!(engine.winner().map(|p| p.name().to_string()), Some("You".into()));
    }

    #[test]
    fn playable_seat_plays_draws_and_advances() {
        let mut engine = arranged(&["2C"], &["10H", "3D"], &["5S"], 45, 1);
        let ai = create_selector("baseline", None).unwrap();
        let deck_before = engine.deck_size();
        let report = play_automated_turn(&mut engine, ai.as_ref()).unwrap();
        match report {
            TurnReport::Played {
                player,
                card,
                sum,
                drawn,
            } => {
                assert_eq!(player, "Bot 1");
                assert_eq!(card, c("3D"));
                assert_eq!(sum, 48);
                assert!(drawn.is_some());
            }
            other => panic!("unexpected report {:?}", other),
        }
        assert_eq!(engine.deck_size(), deck_before - 1);
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn refuses_to_move_after_game_over() {
        let mut engine = arranged(&["2C"], &["10H", "8D"], &["5S"], 45, 1);
        let ai = create_selector("baseline", None).unwrap();
        play_automated_turn(&mut engine, ai.as_ref()).unwrap();
        assert!(matches!(
            play_automated_turn(&mut engine, ai.as_ref()),
            Err(GameError::InvalidGameState(_))
        ));
    }

    #[test]
    fn full_game_produces_exactly_one_winner() {
        let mut engine = Engine::new(Some(11));
        engine.start(3).unwrap();
        let selectors: Vec<Box<dyn CardSelector>> = (0..4)
            .map(|_| create_selector("baseline", None).unwrap())
            .collect();
        let summary = run_game(&mut engine, &selectors, DEFAULT_TURN_LIMIT).unwrap();
        let winner = summary.winner.expect("game should finish");
        let winners: Vec<_> = engine
            .all_player_stats()
            .iter()
            .filter(|(_, s)| s.is_winner)
            .map(|(name, _)| name.clone())
            .collect();
        assert_eq!(winners, vec![winner]);
        assert_eq!(engine.total_cards(), 52);
    }

    #[test]
    fn selector_count_must_match_seats() {
        let mut engine = Engine::new(Some(1));
        engine.start(2).unwrap();
        let selectors = vec![create_selector("baseline", None).unwrap()];
        assert!(run_game(&mut engine, &selectors, 10).is_err());
    }

    #[test]
    fn elimination_is_logged() {
        let logs = TestLogSubscriber::new();
        let registry = Registry::default().with(logs.clone().into_layer::<Registry>());
        let mut engine = arranged(&["2C"], &["10H", "8D"], &["5S"], 45, 1);
        let ai = create_selector("cautious", None).unwrap();
        tracing::subscriber::with_default(registry, || {
            play_automated_turn(&mut engine, ai.as_ref()).unwrap();
        });
        let entries = logs.entries();
        assert!(entries.iter().any(|e| e.message.contains("player eliminated")
            && e.fields.iter().any(|(k, v)| k == "player" && v.contains("Bot 1"))));
    }

    #[test]
    fn zero_delay_does_not_sleep() {
        let pacing = Pacing::default();
        assert!(pacing.delay().is_zero());
        pacing.pause();
        assert_eq!(Pacing::new(250).delay(), Duration::from_millis(250));
    }
}
