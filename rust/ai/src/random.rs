//! Random policy: a uniform pick among the playable cards.
//!
//! The generator is seeded so simulations stay reproducible.

use std::sync::Mutex;

use crate::CardSelector;
use fifty_engine::cards::Card;
use fifty_engine::rules::is_playable;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[derive(Debug)]
pub struct RandomPick {
    rng: Mutex<ChaCha20Rng>,
}

impl RandomPick {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl CardSelector for RandomPick {
    fn select(&self, hand: &[Card], sum: i32) -> Option<Card> {
        let playable: Vec<Card> = hand
            .iter()
            .filter(|c| is_playable(c, sum))
            .copied()
            .collect();
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        playable.choose(&mut *rng).copied()
    }

    fn name(&self) -> &str {
        "Random"
    }
}
