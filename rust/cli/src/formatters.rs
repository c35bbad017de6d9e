//! Terminal rendering of cards, hands and turn reports.
//!
//! Suits use the ♥ ♦ ♣ ♠ symbols where the terminal can show them and fall
//! back to `h d c s` on legacy Windows consoles.
//!
//! ```rust
//! use fifty_cli::formatters::format_card;
//! use fifty_engine::cards::{Card, Rank, Suit};
//!
//! let ten = Card::new(Rank::Ten, Suit::Hearts);
//! assert!(format_card(&ten) == "10♥" || format_card(&ten) == "10h");
//! ```

use fifty_engine::cards::{Card, Suit};
use fifty_engine::stats::PlayerStats;

use crate::driver::TurnReport;

/// Whether the terminal is expected to render Unicode suit symbols.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        suit.name()[..1].to_ascii_lowercase()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.code(), format_suit(card.suit))
}

/// Numbers cards from 1 so they can be chosen with `play <n>`.
pub fn format_hand(hand: &[Card]) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.iter()
        .enumerate()
        .map(|(i, c)| format!("[{}] {}", i + 1, format_card(c)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// A face-down hand shows only its size.
pub fn format_hidden_hand(len: usize) -> String {
    format!("{} card{}", len, if len == 1 { "" } else { "s" })
}

pub fn format_table(top: Option<&Card>, sum: i32) -> String {
    match top {
        Some(card) => format!("Table: {} (sum {})", format_card(card), sum),
        None => format!("Table: empty (sum {})", sum),
    }
}

/// One line describing an automated turn. Machine draws stay hidden.
pub fn format_turn(report: &TurnReport) -> String {
    match report {
        TurnReport::Played {
            player,
            card,
            sum,
            drawn,
        } => {
            let mut line = format!("{} played {} (sum {})", player, format_card(card), sum);
            match drawn {
                Some(draw) if draw.recycled > 0 => line.push_str(&format!(
                    " and drew after {} table cards were reshuffled into the deck",
                    draw.recycled
                )),
                Some(_) => line.push_str(" and drew a card"),
                None => line.push_str("; the deck is empty, no card drawn"),
            }
            line
        }
        TurnReport::Eliminated { player, returned } => format!(
            "{} cannot play and is eliminated ({} returned to the deck)",
            player,
            format_hidden_hand(*returned)
        ),
    }
}

pub fn format_player_stats(name: &str, stats: &PlayerStats) -> String {
    format!("{:<8} {}", name, stats)
}
