use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A face-down pile of cards with stack discipline: draws and insertions both
/// happen at the top. Shuffling uses a seeded ChaCha20 generator so a game can be
/// replayed from its seed.
///
/// # Examples
///
/// ```
/// use fifty_engine::deck::Deck;
///
/// let mut a = Deck::new_with_seed(42);
/// let mut b = Deck::new_with_seed(42);
/// a.shuffle();
/// b.shuffle();
/// assert_eq!(a.draw(), b.draw());
/// assert_eq!(a.len(), 51);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    /// Cards in the pile; the last element is the top
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// The full 52-card set in suit order. Order is kept until `shuffle` is called.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// A stacked pile. The last card of `cards` is drawn first.
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Self {
        let mut deck = Self {
            cards,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.turn_face_down();
        deck
    }

    /// Restores the fixed 52-card set, discarding whatever the pile held.
    pub fn initialize(&mut self) {
        self.cards = full_deck();
    }

    /// Uniform permutation of the cards currently in the pile.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes the top card, or `None` once the pile is exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn add_card(&mut self, mut card: Card) {
        card.face_up = false;
        self.cards.push(card);
    }

    /// Pushes cards onto the top in iteration order.
    pub fn add_cards<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        for card in cards {
            self.add_card(card);
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Bottom-to-top view of the pile.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn turn_face_down(&mut self) {
        for card in &mut self.cards {
            card.face_up = false;
        }
    }
}
