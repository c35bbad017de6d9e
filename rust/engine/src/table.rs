use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// The shared pile in the middle: the running sum and the cards played since the
/// last recycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    sum: i32,
    /// Oldest first; the last element is the card on top
    played: Vec<Card>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table that already shows `played` with the given sum.
    pub fn with_cards(played: Vec<Card>, sum: i32) -> Self {
        let mut table = Self { sum, played };
        for card in &mut table.played {
            card.face_up = true;
        }
        table
    }

    pub fn sum(&self) -> i32 {
        self.sum
    }

    pub fn played(&self) -> &[Card] {
        &self.played
    }

    pub fn top(&self) -> Option<&Card> {
        self.played.last()
    }

    pub fn len(&self) -> usize {
        self.played.len()
    }

    pub fn is_empty(&self) -> bool {
        self.played.is_empty()
    }

    /// Puts a card face up on top and sets the new sum.
    pub(crate) fn place(&mut self, mut card: Card, new_sum: i32) {
        card.face_up = true;
        self.played.push(card);
        self.sum = new_sum;
    }

    /// Takes every card except the newest, turned face down. Leaves the sum alone.
    ///
    /// Returns an empty vector when the table holds one card or none.
    pub(crate) fn take_recyclable(&mut self) -> Vec<Card> {
        if self.played.len() <= 1 {
            return Vec::new();
        }
        let keep = self.played.len() - 1;
        let mut taken: Vec<Card> = self.played.drain(..keep).collect();
        for card in &mut taken {
            card.face_up = false;
        }
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn recycle_keeps_only_the_newest_card() {
        let mut table = Table::new();
        table.place(Card::new(Rank::Two, Suit::Hearts), 2);
        table.place(Card::new(Rank::Three, Suit::Hearts), 5);
        table.place(Card::new(Rank::Four, Suit::Hearts), 9);

        let taken = table.take_recyclable();
        assert_eq!(taken.len(), 2);
        assert!(taken.iter().all(|c| !c.face_up));
        assert_eq!(table.len(), 1);
        assert_eq!(table.top(), Some(&Card::new(Rank::Four, Suit::Hearts)));
        assert_eq!(table.sum(), 9);
    }

    #[test]
    fn single_card_is_not_recycled() {
        let mut table = Table::new();
        table.place(Card::new(Rank::Two, Suit::Hearts), 2);
        assert!(table.take_recyclable().is_empty());
        assert_eq!(table.len(), 1);
    }
}
