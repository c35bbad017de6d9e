//! Cautious policy: keep the table as low as possible.
//!
//! Playing the card with the smallest resulting sum leaves the most room for the
//! next turn. Ties go to the card held longest.

use crate::CardSelector;
use fifty_engine::cards::Card;
use fifty_engine::rules::{is_playable, sum_after};

#[derive(Debug, Clone, Default)]
pub struct LowestSum;

impl LowestSum {
    pub fn new() -> Self {
        Self
    }
}

impl CardSelector for LowestSum {
    fn select(&self, hand: &[Card], sum: i32) -> Option<Card> {
        let mut best: Option<(i32, Card)> = None;
        for card in hand.iter().filter(|c| is_playable(c, sum)) {
            let next = sum_after(card, sum);
            match best {
                Some((lowest, _)) if lowest <= next => {}
                _ => best = Some((next, *card)),
            }
        }
        best.map(|(_, card)| card)
    }

    fn name(&self) -> &str {
        "Cautious"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn prefers_face_cards() {
        let h = hand(&["3C", "9H", "JD"]);
        assert_eq!(LowestSum.select(&h, 20), Some(h[2]));
    }

    #[test]
    fn ties_keep_hand_order() {
        let h = hand(&["KS", "QH"]);
        assert_eq!(LowestSum.select(&h, 30), Some(h[0]));
    }

    #[test]
    fn ace_is_valued_at_the_current_sum() {
        // at 45 the Ace is worth 1, beating the 5
        let h = hand(&["5C", "AS"]);
        assert_eq!(LowestSum.select(&h, 45), Some(h[1]));
    }

    #[test]
    fn nothing_playable() {
        let h = hand(&["10H", "8D"]);
        assert_eq!(LowestSum.select(&h, 45), None);
    }
}
