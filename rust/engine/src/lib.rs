//! # fifty-engine: rules engine for the card game Fifty
//!
//! Players take turns laying cards onto a shared pile while keeping the running
//! table sum at or below 50. A player who holds no card that fits is eliminated;
//! the last player standing wins. One human seat plays against one to three
//! automated seats.
//!
//! The engine is synchronous and passive. It performs no I/O and never logs:
//! hosts drive it one call at a time and render its state.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the value function
//! - [`deck`] - Seeded, stack-ordered draw pile
//! - [`player`] - Seats, hands, eligibility and the automated card choice
//! - [`table`] - Running sum and played cards, recycling
//! - [`engine`] - The game state machine
//! - [`rules`] - Sum cap, hand size and play validation
//! - [`stats`] - Game-wide and per-player counters
//! - [`errors`] - Error types for game operations
//!
//! ## Card values
//!
//! ```rust
//! use fifty_engine::cards::{card_value, Rank};
//!
//! assert_eq!(card_value(Rank::Seven, 12), 7);
//! assert_eq!(card_value(Rank::Nine, 12), 0);
//! assert_eq!(card_value(Rank::Queen, 12), -10);
//! assert_eq!(card_value(Rank::Ace, 39), 10);
//! assert_eq!(card_value(Rank::Ace, 41), 1);
//! ```
//!
//! ## Deterministic games
//!
//! ```rust
//! use fifty_engine::engine::Engine;
//!
//! let mut a = Engine::new(Some(42));
//! let mut b = Engine::new(Some(42));
//! a.start(3).unwrap();
//! b.start(3).unwrap();
//! assert_eq!(a.top_card(), b.top_card());
//! assert_eq!(a.players()[0].hand(), b.players()[0].hand());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod player;
pub mod rules;
pub mod stats;
pub mod table;
