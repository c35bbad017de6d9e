//! Parsing of the human player's commands during interactive play.
//!
//! Accepted forms (case-insensitive):
//! - `play <n>` or just `<n>`: the n-th card of the hand as shown, counting from 1
//! - a card code such as `7c`, `10H`, `K♠` or `play qd`
//! - `draw` / `d`: draw a card and end the turn
//! - `pass` / `p`: end the turn without drawing
//! - `hand` / `h`: show the table and hand again
//! - `q` / `quit`: leave the game

use fifty_engine::cards::Card;

#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Play(Card),
    Draw,
    Pass,
    Hand,
    Quit,
    Invalid(String),
}

/// Interprets one line of input against the player's current hand.
///
/// ```rust
/// use fifty_cli::validation::{parse_turn_input, ParseResult};
/// use fifty_engine::cards::Card;
///
/// let hand: Vec<Card> = ["7C", "KH"].iter().map(|s| s.parse().unwrap()).collect();
/// assert_eq!(parse_turn_input("play 2", &hand), ParseResult::Play(hand[1]));
/// assert_eq!(parse_turn_input("7c", &hand), ParseResult::Play(hand[0]));
/// assert_eq!(parse_turn_input("DRAW", &hand), ParseResult::Draw);
/// assert!(matches!(parse_turn_input("play 3", &hand), ParseResult::Invalid(_)));
/// ```
pub fn parse_turn_input(input: &str, hand: &[Card]) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&first) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match (first, parts.len()) {
        ("q" | "quit", 1) => ParseResult::Quit,
        ("draw" | "d", 1) => ParseResult::Draw,
        ("pass" | "p", 1) => ParseResult::Pass,
        ("hand" | "h", 1) => ParseResult::Hand,
        ("play", 1) => ParseResult::Invalid(
            "play needs a card number or code (e.g., 'play 2' or 'play 7c')".to_string(),
        ),
        ("play", 2) => select_card(parts[1], hand),
        (_, 1) => select_card(first, hand),
        _ => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: play <n>, <card>, draw, pass, hand, q",
            input
        )),
    }
}

fn select_card(token: &str, hand: &[Card]) -> ParseResult {
    if let Ok(n) = token.parse::<usize>() {
        // "10" is a position, never the rank ten without a suit
        return match n.checked_sub(1).and_then(|i| hand.get(i)) {
            Some(card) => ParseResult::Play(*card),
            None => ParseResult::Invalid(format!(
                "No card number {} (hand has {} cards)",
                n,
                hand.len()
            )),
        };
    }
    match token.parse::<Card>() {
        Ok(card) => match hand.iter().find(|c| **c == card) {
            Some(held) => ParseResult::Play(*held),
            None => ParseResult::Invalid(format!("You don't hold {}", card)),
        },
        Err(_) => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: play <n>, <card>, draw, pass, hand, q",
            token
        )),
    }
}
