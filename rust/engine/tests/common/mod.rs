#![allow(dead_code)]

use fifty_engine::cards::{full_deck, Card};
use fifty_engine::deck::Deck;
use fifty_engine::engine::Engine;
use fifty_engine::player::Player;
use fifty_engine::table::Table;

/// Parses a card code such as `10H` or `KS`.
pub fn c(code: &str) -> Card {
    code.parse().expect("valid card code")
}

pub fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|s| c(s)).collect()
}

/// Where the cards not named by a scenario end up.
pub enum Rest {
    Deck,
    /// Underneath the named table cards
    Table,
    /// Appended to the hand of the given seat
    Seat(usize),
}

pub struct Seat<'a> {
    pub name: &'a str,
    pub machine: bool,
    pub hand: &'a [&'a str],
}

pub fn human<'a>(hand: &'a [&'a str]) -> Seat<'a> {
    Seat {
        name: "You",
        machine: false,
        hand,
    }
}

pub fn bot<'a>(name: &'a str, hand: &'a [&'a str]) -> Seat<'a> {
    Seat {
        name,
        machine: true,
        hand,
    }
}

/// Builds a started game from named hands and table cards; everything else goes to `rest`.
/// Seat 0 is current.
pub fn arrange(seats: &[Seat<'_>], table_top: &[&str], sum: i32, rest: Rest) -> Engine {
    let mut used: Vec<Card> = cards(table_top);
    for s in seats {
        used.extend(cards(s.hand));
    }
    let remainder: Vec<Card> = full_deck()
        .into_iter()
        .filter(|card| !used.contains(card))
        .collect();

    let mut players: Vec<Player> = seats
        .iter()
        .map(|s| {
            let mut p = if s.machine {
                Player::machine(s.name)
            } else {
                Player::human(s.name)
            };
            for card in cards(s.hand) {
                p.add_card(card);
            }
            p
        })
        .collect();

    let mut table_cards = Vec::new();
    let mut deck_cards = Vec::new();
    match rest {
        Rest::Deck => deck_cards = remainder,
        Rest::Table => table_cards = remainder,
        Rest::Seat(i) => {
            for card in remainder {
                players[i].add_card(card);
            }
        }
    }
    table_cards.extend(cards(table_top));

    Engine::arranged(
        players,
        Table::with_cards(table_cards, sum),
        Deck::from_cards(deck_cards, 9),
        0,
    )
    .expect("valid arrangement")
}

pub fn assert_conserved(engine: &Engine) {
    assert_eq!(engine.total_cards(), 52, "cards must be conserved");
}
