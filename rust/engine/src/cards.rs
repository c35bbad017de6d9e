use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::MAX_SUM;

/// Represents one of the four suits in a standard 52-card deck.
/// Suits never affect a card's value; they only distinguish physical cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl FromStr for Suit {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hearts" | "♥" => Ok(Suit::Hearts),
            "d" | "diamonds" | "♦" => Ok(Suit::Diamonds),
            "c" | "clubs" | "♣" => Ok(Suit::Clubs),
            "s" | "spades" | "♠" => Ok(Suit::Spades),
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

/// Represents the rank of a playing card from Two through Ace.
/// The numeric discriminants are face values for the pip cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9, always worth 0
    Nine,
    /// Rank 10
    Ten,
    /// Jack, worth -10
    Jack,
    /// Queen, worth -10
    Queen,
    /// King, worth -10
    King,
    /// Ace, worth 10 or 1 depending on the table sum
    Ace,
}

impl Rank {
    /// Value this rank contributes when played onto a table showing `current_sum`.
    ///
    /// The value is recomputed on every call: the same Ace is worth 10 at a sum
    /// of 39 and 1 at a sum of 41.
    ///
    /// ```
    /// use fifty_engine::cards::Rank;
    ///
    /// assert_eq!(Rank::Ace.value(39), 10);
    /// assert_eq!(Rank::Ace.value(41), 1);
    /// assert_eq!(Rank::Nine.value(17), 0);
    /// assert_eq!(Rank::King.value(30), -10);
    /// ```
    pub fn value(self, current_sum: i32) -> i32 {
        match self {
            Rank::Nine => 0,
            Rank::Jack | Rank::Queen | Rank::King => -10,
            Rank::Ace => {
                if current_sum + 10 <= MAX_SUM {
                    10
                } else {
                    1
                }
            }
            pip => pip as i32,
        }
    }

    /// Short code used on card faces: `2`..`10`, `J`, `Q`, `K`, `A`.
    pub fn code(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl FromStr for Rank {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim().to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(ParseCardError(s.to_string())),
        };
        Ok(rank)
    }
}

/// Free-function form of [`Rank::value`].
pub fn card_value(rank: Rank, current_sum: i32) -> i32 {
    rank.value(current_sum)
}

/// A single physical playing card.
///
/// Identity is the rank and suit pair: two `Card` values compare equal and hash
/// identically regardless of `face_up`, which is only an orientation hint for
/// whoever renders the game.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
    /// The suit of the card
    pub suit: Suit,
    /// Whether the card is currently shown face up
    #[serde(default)]
    pub face_up: bool,
}

impl Card {
    /// Creates a face-down card.
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: false,
        }
    }

    /// Value of this card against the given table sum. See [`Rank::value`].
    pub fn value(&self, current_sum: i32) -> i32 {
        self.rank.value(current_sum)
    }

    /// Compact form such as `10♥` or `K♠`.
    pub fn short(&self) -> String {
        format!("{}{}", self.rank.code(), self.suit.symbol())
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.suit.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank.code(), self.suit.name())
    }
}

/// Parses codes such as `10H`, `ks`, `A♠` or `7 of Clubs`.
impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((rank, suit)) = trimmed.split_once(" of ") {
            return Ok(Card::new(rank.parse()?, suit.parse()?));
        }
        let split = trimmed
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        if split == 0 {
            return Err(ParseCardError(s.to_string()));
        }
        let (rank, suit) = trimmed.split_at(split);
        let rank = rank.parse().map_err(|_| ParseCardError(s.to_string()))?;
        let suit = suit.parse().map_err(|_| ParseCardError(s.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized card: {0:?}")]
pub struct ParseCardError(pub String);

pub fn all_suits() -> [Suit; 4] {
    [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

/// The fixed 52-card set, suit by suit, every card face down.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(r, s));
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pip_cards_are_worth_face_value() {
        assert_eq!(Rank::Two.value(0), 2);
        assert_eq!(Rank::Eight.value(20), 8);
        assert_eq!(Rank::Ten.value(0), 10);
    }

    #[test]
    fn ace_switches_to_one_past_forty() {
        assert_eq!(Rank::Ace.value(40), 10);
        assert_eq!(Rank::Ace.value(41), 1);
        assert_eq!(Rank::Ace.value(50), 1);
    }

    #[test]
    fn face_up_does_not_change_identity() {
        let mut a = Card::new(Rank::Seven, Suit::Clubs);
        let b = a;
        a.face_up = true;
        assert_eq!(a, b);
    }

    #[test]
    fn parses_short_codes() {
        assert_eq!(
            "10h".parse::<Card>().unwrap(),
            Card::new(Rank::Ten, Suit::Hearts)
        );
        assert_eq!(
            "K♠".parse::<Card>().unwrap(),
            Card::new(Rank::King, Suit::Spades)
        );
        assert_eq!(
            "7 of Clubs".parse::<Card>().unwrap(),
            Card::new(Rank::Seven, Suit::Clubs)
        );
        assert!("Z".parse::<Card>().is_err());
        assert!("1x".parse::<Card>().is_err());
    }

    #[test]
    fn display_names_rank_and_suit() {
        assert_eq!(Card::new(Rank::Seven, Suit::Clubs).to_string(), "7 of Clubs");
        assert_eq!(Card::new(Rank::Queen, Suit::Hearts).short(), "Q♥");
    }
}
