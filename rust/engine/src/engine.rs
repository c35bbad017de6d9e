use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::{Controller, Player, HUMAN_NAME};
use crate::rules::{validate_bot_count, validate_play, HAND_SIZE, MAX_BOTS};
use crate::stats::{GameStats, PlayerStats};
use crate::table::Table;

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Lifecycle of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    NotStarted,
    Active,
    Over,
}

/// What the current player has done since the last `next_turn`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnProgress {
    pub played: bool,
    pub drew: bool,
}

/// Result of a successful draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Draw {
    /// The card now in the current player's hand
    pub card: Card,
    /// Table cards shuffled back into the deck before drawing (0 when no recycle happened)
    pub recycled: usize,
}

/// Signal returned when a player is knocked out.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Elimination {
    pub player: String,
    /// Cards moved from the player's hand back to the deck
    pub returned: usize,
}

/// Read-only view of one seat, with machine hands hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatView {
    pub name: String,
    pub controller: Controller,
    pub eliminated: bool,
    pub hand_size: usize,
    /// Face-up cards only; empty for machine seats
    pub visible_hand: Vec<Card>,
}

/// Everything a presentation layer needs to draw the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub current_player: Option<String>,
    pub table_sum: i32,
    pub top_card: Option<Card>,
    pub table_size: usize,
    pub deck_size: usize,
    pub seats: Vec<SeatView>,
    pub stats: GameStats,
    pub player_stats: BTreeMap<String, PlayerStats>,
}

/// The rules engine for one game of Fifty.
///
/// The engine is passive: a host calls one operation at a time and renders the
/// resulting state. Turn advancement is always an explicit call.
///
/// # Examples
///
/// ```
/// use fifty_engine::engine::{Engine, GamePhase};
///
/// let mut engine = Engine::new(Some(7));
/// engine.start(2).expect("start");
/// assert_eq!(engine.phase(), GamePhase::Active);
/// assert_eq!(engine.players().len(), 3);
/// assert_eq!(engine.deck_size(), 52 - 3 * 4 - 1);
///
/// // Let the human seat play whatever fits, then draw and pass the turn.
/// let sum = engine.table_sum();
/// let playable = engine
///     .current_player()
///     .unwrap()
///     .hand()
///     .iter()
///     .copied()
///     .find(|c| sum + c.value(sum) <= 50);
/// if let Some(card) = playable {
///     engine.play_card(&card).expect("play");
///     engine.draw_card().expect("draw");
/// } else {
///     engine.eliminate_current_player().expect("eliminate");
/// }
/// engine.next_turn().expect("advance");
/// assert_eq!(engine.stats().total_turns, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    /// Draw pile
    deck: Deck,
    /// Seats in turn order; the human is seat 0 after `start`
    players: Vec<Player>,
    /// Running sum and played cards
    table: Table,
    /// Index into `players` of the seat to act
    current: usize,
    started: bool,
    turn: TurnProgress,
    stats: GameStats,
    /// Keyed by player name
    player_stats: BTreeMap<String, PlayerStats>,
    seed: u64,
}

impl Engine {
    /// An unstarted game whose deck is shuffled from `seed`.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        let mut engine = Self::with_deck(deck);
        engine.seed = seed;
        engine
    }

    /// An unstarted game that deals from `deck` exactly as stacked.
    pub fn with_deck(deck: Deck) -> Self {
        Self {
            deck,
            players: Vec::new(),
            table: Table::new(),
            current: 0,
            started: false,
            turn: TurnProgress::default(),
            stats: GameStats::default(),
            player_stats: BTreeMap::new(),
            seed: DEFAULT_SEED,
        }
    }

    /// A game already in progress, built from explicit seats, table and deck.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidGameState`] unless there are 2 to 4 uniquely named seats,
    /// `current` names one of them, and deck, hands and table together hold
    /// exactly the 52-card set.
    pub fn arranged(
        players: Vec<Player>,
        table: Table,
        deck: Deck,
        current: usize,
    ) -> Result<Self, GameError> {
        if players.len() < 2 || players.len() > MAX_BOTS + 1 {
            return Err(GameError::InvalidGameState(format!(
                "a game needs 2 to {} players (got {})",
                MAX_BOTS + 1,
                players.len()
            )));
        }
        if current >= players.len() {
            return Err(GameError::InvalidGameState(format!(
                "current seat {} out of range",
                current
            )));
        }
        {
            let mut names = HashSet::new();
            for p in &players {
                if !names.insert(p.name()) {
                    return Err(GameError::InvalidGameState(format!(
                        "duplicate player name {:?}",
                        p.name()
                    )));
                }
            }
        }

        let mut seen = HashSet::with_capacity(52);
        let all = deck
            .cards()
            .iter()
            .chain(players.iter().flat_map(|p| p.hand().iter()))
            .chain(table.played().iter());
        for card in all {
            if !seen.insert(*card) {
                return Err(GameError::InvalidGameState(format!(
                    "{} appears more than once",
                    card
                )));
            }
        }
        if seen.len() != full_deck().len() {
            return Err(GameError::InvalidGameState(format!(
                "expected 52 cards in play, found {}",
                seen.len()
            )));
        }

        let player_stats = players
            .iter()
            .map(|p| (p.name().to_string(), PlayerStats::default()))
            .collect();
        Ok(Self {
            deck,
            players,
            table,
            current,
            started: true,
            turn: TurnProgress::default(),
            stats: GameStats::default(),
            player_stats,
            seed: DEFAULT_SEED,
        })
    }

    /// Seats one human and `num_bots` machines, deals four cards each one at a
    /// time around the table, and turns the opening card face up.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidBotCount`] unless `num_bots` is 1, 2 or 3
    /// - [`GameError::InvalidGameState`] if the game was already started or the
    ///   deck cannot cover the deal
    pub fn start(&mut self, num_bots: usize) -> Result<(), GameError> {
        if self.started {
            return Err(GameError::InvalidGameState(
                "game already started".to_string(),
            ));
        }
        validate_bot_count(num_bots)?;

        let needed = (num_bots + 1) * HAND_SIZE + 1;
        if self.deck.len() < needed {
            return Err(GameError::InvalidGameState(format!(
                "deck holds {} cards, the deal needs {}",
                self.deck.len(),
                needed
            )));
        }

        self.players = std::iter::once(Player::human(HUMAN_NAME))
            .chain((1..=num_bots).map(|i| Player::machine(format!("Bot {}", i))))
            .collect();
        self.player_stats = self
            .players
            .iter()
            .map(|p| (p.name().to_string(), PlayerStats::default()))
            .collect();

        for _ in 0..HAND_SIZE {
            for p in &mut self.players {
                let c = self.deck.draw().ok_or(GameError::DeckEmpty)?;
                p.add_card(c);
            }
        }

        let opening = self.deck.draw().ok_or(GameError::DeckEmpty)?;
        self.table = Table::new();
        self.table.place(opening, opening.value(0));

        self.current = 0;
        self.turn = TurnProgress::default();
        self.started = true;
        Ok(())
    }

    pub fn phase(&self) -> GamePhase {
        if !self.started {
            GamePhase::NotStarted
        } else if self.is_game_over() {
            GamePhase::Over
        } else {
            GamePhase::Active
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// # Errors
    ///
    /// [`GameError::InvalidGameState`] before `start`.
    pub fn current_player(&self) -> Result<&Player, GameError> {
        self.ensure_started()?;
        self.players
            .get(self.current)
            .ok_or_else(|| GameError::InvalidGameState("Invalid player index".to_string()))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_sum(&self) -> i32 {
        self.table.sum()
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.table.top()
    }

    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    pub fn is_deck_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Cards in the deck, in every hand and on the table. 52 for any dealt game.
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.players.iter().map(|p| p.hand().len()).sum::<usize>()
            + self.table.len()
    }

    pub fn turn_progress(&self) -> TurnProgress {
        self.turn
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn player_stats(&self, name: &str) -> Option<&PlayerStats> {
        self.player_stats.get(name)
    }

    pub fn all_player_stats(&self) -> &BTreeMap<String, PlayerStats> {
        &self.player_stats
    }

    /// Plays `card` from the current player's hand onto the table and returns the new sum.
    ///
    /// Does not advance the turn.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidMove`] if the card is not held or would push the sum past 50;
    ///   state is left untouched
    /// - [`GameError::InvalidGameState`] before `start` or when the current seat is out
    pub fn play_card(&mut self, card: &Card) -> Result<i32, GameError> {
        self.ensure_current_active()?;
        let sum = self.table.sum();
        let player = self
            .players
            .get_mut(self.current)
            .ok_or_else(|| GameError::InvalidGameState("Invalid player index".to_string()))?;

        if !player.holds(card) {
            return Err(GameError::InvalidMove(format!(
                "{} does not hold {}",
                player.name(),
                card
            )));
        }
        let new_sum = validate_play(card, sum)?;
        let played = player
            .remove_card(card)
            .ok_or_else(|| GameError::InvalidMove("Failed to remove card from hand".to_string()))?;

        self.table.place(played, new_sum);
        self.stats.cards_played += 1;
        if let Some(s) = self.player_stats.get_mut(player.name()) {
            s.cards_played += 1;
        }
        self.turn.played = true;
        Ok(new_sum)
    }

    /// Moves the top card of the deck into the current player's hand.
    ///
    /// An empty deck is first refilled from the table: every played card but the
    /// newest is turned face down, shuffled and pushed back. The sum is untouched.
    ///
    /// # Errors
    ///
    /// - [`GameError::DeckEmpty`] when the deck is empty and the table holds at most one card
    /// - [`GameError::InvalidGameState`] before `start` or when the current seat is out
    pub fn draw_card(&mut self) -> Result<Draw, GameError> {
        self.ensure_current_active()?;

        let mut recycled = 0;
        if self.deck.is_empty() {
            recycled = self.recycle();
        }
        let card = self.deck.draw().ok_or(GameError::DeckEmpty)?;

        let player = &mut self.players[self.current];
        player.add_card(card);
        let card = player.hand()[player.hand().len() - 1];
        self.turn.drew = true;
        Ok(Draw { card, recycled })
    }

    fn recycle(&mut self) -> usize {
        let cards = self.table.take_recyclable();
        let count = cards.len();
        if count > 0 {
            self.deck.add_cards(cards);
            self.deck.shuffle();
        }
        count
    }

    /// Counts the departing player's turn and passes play to the next seat that
    /// is still in the game, wrapping around. Once one seat remains the turn
    /// settles on it.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidGameState`] before `start`.
    pub fn next_turn(&mut self) -> Result<(), GameError> {
        self.ensure_started()?;
        self.stats.total_turns += 1;
        if let Some(s) = self
            .players
            .get(self.current)
            .and_then(|p| self.player_stats.get_mut(p.name()))
        {
            s.turns_played += 1;
        }

        let n = self.players.len();
        for step in 1..=n {
            let idx = (self.current + step) % n;
            if !self.players[idx].is_eliminated() {
                self.current = idx;
                break;
            }
        }
        self.turn = TurnProgress::default();
        Ok(())
    }

    /// Knocks out the current player once they hold no playable card. Their
    /// hand goes back onto the deck.
    ///
    /// The returned [`Elimination`] is the expected outcome, not a failure.
    /// The turn is not advanced.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidGameState`] if the player can still play, is already
    /// out, the game is over, or the game has not started.
    pub fn eliminate_current_player(&mut self) -> Result<Elimination, GameError> {
        self.ensure_started()?;
        if self.is_game_over() {
            return Err(GameError::InvalidGameState(
                "game is already over".to_string(),
            ));
        }
        let sum = self.table.sum();
        let player = self
            .players
            .get_mut(self.current)
            .ok_or_else(|| GameError::InvalidGameState("Invalid player index".to_string()))?;
        if player.is_eliminated() {
            return Err(GameError::InvalidGameState(format!(
                "{} is already eliminated",
                player.name()
            )));
        }
        if player.can_play(sum) {
            return Err(GameError::InvalidGameState(
                "Cannot eliminate player that can still play".to_string(),
            ));
        }

        let cards = player.clear_hand();
        let returned = cards.len();
        player.eliminate();
        let name = player.name().to_string();
        self.deck.add_cards(cards);
        self.stats.players_eliminated += 1;

        Ok(Elimination {
            player: name,
            returned,
        })
    }

    /// True once the game has started and at most one seat is still in.
    pub fn is_game_over(&self) -> bool {
        self.started && self.players.iter().filter(|p| !p.is_eliminated()).count() <= 1
    }

    /// The sole remaining seat once the game is over, marked as winner in its stats.
    ///
    /// Calling it again changes nothing.
    pub fn winner(&mut self) -> Option<&Player> {
        if !self.is_game_over() {
            return None;
        }
        let idx = self.players.iter().position(|p| !p.is_eliminated())?;
        if let Some(s) = self.player_stats.get_mut(self.players[idx].name()) {
            s.is_winner = true;
        }
        Some(&self.players[idx])
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let current_player = if self.started {
            self.players.get(self.current).map(|p| p.name().to_string())
        } else {
            None
        };
        let seats = self
            .players
            .iter()
            .map(|p| SeatView {
                name: p.name().to_string(),
                controller: p.controller(),
                eliminated: p.is_eliminated(),
                hand_size: p.hand().len(),
                visible_hand: p.hand().iter().filter(|c| c.face_up).copied().collect(),
            })
            .collect();
        GameSnapshot {
            phase: self.phase(),
            current_player,
            table_sum: self.table.sum(),
            top_card: self.table.top().copied(),
            table_size: self.table.len(),
            deck_size: self.deck.len(),
            seats,
            stats: self.stats,
            player_stats: self.player_stats.clone(),
        }
    }

    fn ensure_current_active(&self) -> Result<(), GameError> {
        self.ensure_started()?;
        let player = self
            .players
            .get(self.current)
            .ok_or_else(|| GameError::InvalidGameState("Invalid player index".to_string()))?;
        if player.is_eliminated() {
            return Err(GameError::InvalidGameState(format!(
                "{} is eliminated",
                player.name()
            )));
        }
        Ok(())
    }

    fn ensure_started(&self) -> Result<(), GameError> {
        if self.started {
            Ok(())
        } else {
            Err(GameError::InvalidGameState(
                "game has not started".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn operations_before_start_are_rejected() {
        let mut engine = Engine::new(Some(1));
        assert_eq!(engine.phase(), GamePhase::NotStarted);
        assert!(!engine.is_game_over());
        assert!(matches!(
            engine.current_player(),
            Err(GameError::InvalidGameState(_))
        ));
        assert!(matches!(
            engine.draw_card(),
            Err(GameError::InvalidGameState(_))
        ));
        assert!(matches!(
            engine.next_turn(),
            Err(GameError::InvalidGameState(_))
        ));
        let card = Card::new(Rank::Two, Suit::Hearts);
        assert!(matches!(
            engine.play_card(&card),
            Err(GameError::InvalidGameState(_))
        ));
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut engine = Engine::new(Some(1));
        engine.start(1).unwrap();
        assert!(matches!(
            engine.start(1),
            Err(GameError::InvalidGameState(_))
        ));
    }

    #[test]
    fn short_deck_cannot_deal() {
        let deck = Deck::from_cards(vec![Card::new(Rank::Two, Suit::Hearts)], 0);
        let mut engine = Engine::with_deck(deck);
        assert!(matches!(
            engine.start(1),
            Err(GameError::InvalidGameState(_))
        ));
        assert!(engine.players().is_empty());
    }

    #[test]
    fn turn_progress_resets_on_next_turn() {
        let mut engine = Engine::new(Some(11));
        engine.start(1).unwrap();
        engine.draw_card().unwrap();
        assert!(engine.turn_progress().drew);
        engine.next_turn().unwrap();
        assert_eq!(engine.turn_progress(), TurnProgress::default());
    }

    #[test]
    fn snapshot_hides_machine_hands() {
        let mut engine = Engine::new(Some(5));
        engine.start(2).unwrap();
        let snap = engine.snapshot();
        assert_eq!(snap.current_player.as_deref(), Some(HUMAN_NAME));
        assert_eq!(snap.seats[0].visible_hand.len(), 4);
        assert!(snap.seats[1].visible_hand.is_empty());
        assert_eq!(snap.seats[1].hand_size, 4);
        assert_eq!(snap.table_size, 1);
    }
}
