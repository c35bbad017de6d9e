use std::collections::HashSet;

use fifty_engine::cards::Card;
use fifty_engine::deck::Deck;

#[test]
fn initialized_deck_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.initialize();
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.draw().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(deck.draw().is_none(), "after 52 cards, deck should be empty");
    assert!(deck.is_empty());
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.draw().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.draw().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.draw().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.draw().unwrap()).collect();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn shuffle_is_a_permutation() {
    let mut deck = Deck::new_with_seed(99);
    let before: HashSet<Card> = deck.cards().iter().copied().collect();
    deck.shuffle();
    let after: HashSet<Card> = deck.cards().iter().copied().collect();
    assert_eq!(deck.len(), 52);
    assert_eq!(before, after);
}

#[test]
fn draw_and_add_change_size() {
    let mut deck = Deck::new_with_seed(5);
    deck.shuffle();
    let first = deck.draw().unwrap();
    let second = deck.draw().unwrap();
    assert_eq!(deck.len(), 50);
    deck.add_cards(vec![first, second]);
    assert_eq!(deck.len(), 52);
    assert_eq!(deck.draw(), Some(second), "last added card is on top");
}
