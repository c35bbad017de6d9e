//! Baseline policy: the first playable card in hand order.
//!
//! This mirrors [`Player::select_card`](fifty_engine::player::Player::select_card),
//! so a driver using it reproduces the engine's reference behavior exactly.

use crate::CardSelector;
use fifty_engine::cards::Card;
use fifty_engine::rules::is_playable;

#[derive(Debug, Clone, Default)]
pub struct FirstFit;

impl FirstFit {
    pub fn new() -> Self {
        Self
    }
}

impl CardSelector for FirstFit {
    fn select(&self, hand: &[Card], sum: i32) -> Option<Card> {
        hand.iter().find(|c| is_playable(c, sum)).copied()
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}
