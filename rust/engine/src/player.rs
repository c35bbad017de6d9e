use crate::cards::Card;
use crate::rules::is_playable;
use serde::{Deserialize, Serialize};

/// Who chooses the cards for a seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    /// Cards are chosen by the person at the keyboard; the engine never picks for them
    Human,
    /// Cards are chosen by a deterministic selection policy
    Machine,
}

/// Name given to the human seat when a game is started.
pub const HUMAN_NAME: &str = "You";

/// A seat at the table: its hand, who controls it, and whether it is still in the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique display name, also the key for per-player statistics
    name: String,
    /// Cards in hand, in the order they were received
    hand: Vec<Card>,
    controller: Controller,
    eliminated: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, controller: Controller) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            controller,
            eliminated: false,
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, Controller::Human)
    }

    pub fn machine(name: impl Into<String>) -> Self {
        Self::new(name, Controller::Machine)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    pub fn is_machine(&self) -> bool {
        self.controller == Controller::Machine
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub fn holds(&self, card: &Card) -> bool {
        self.hand.contains(card)
    }

    /// Appends a card to the hand. Human hands are shown face up, machine hands face down.
    pub fn add_card(&mut self, mut card: Card) {
        card.face_up = !self.is_machine();
        self.hand.push(card);
    }

    /// Removes the first card matching `card` by rank and suit.
    pub fn remove_card(&mut self, card: &Card) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c == card)?;
        Some(self.hand.remove(pos))
    }

    /// True iff at least one held card keeps the sum at or below 50.
    pub fn can_play(&self, current_sum: i32) -> bool {
        self.hand.iter().any(|c| is_playable(c, current_sum))
    }

    /// The engine's automated choice: the first playable card in hand order.
    ///
    /// Returns `None` for human seats, and for machine seats exactly when
    /// [`can_play`](Self::can_play) is false.
    pub fn select_card(&self, current_sum: i32) -> Option<Card> {
        if !self.is_machine() {
            return None;
        }
        self.hand
            .iter()
            .find(|c| is_playable(c, current_sum))
            .copied()
    }

    /// Empties the hand and hands the cards back in hand order.
    pub fn clear_hand(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }

    pub(crate) fn eliminate(&mut self) {
        self.eliminated = true;
    }
}
