//! # fifty-ai: card-selection policies for automated seats
//!
//! An automated seat never receives input; whoever drives the game asks a
//! [`CardSelector`] which card to lay down and then calls the engine.
//!
//! ## Core Components
//!
//! - [`CardSelector`] - Trait every policy implements
//! - [`baseline`] - First playable card in hand order (the engine's own policy)
//! - [`cautious`] - Card leaving the lowest table sum
//! - [`random`] - Seeded uniform pick among playable cards
//! - [`create_selector`] - Factory by policy name
//!
//! ## Quick Start
//!
//! ```rust
//! use fifty_ai::{create_selector, CardSelector};
//! use fifty_engine::engine::Engine;
//!
//! let selector = create_selector("baseline", None).expect("known policy");
//!
//! let mut engine = Engine::new(Some(42));
//! engine.start(1).expect("start");
//! engine.next_turn().expect("advance");
//!
//! let bot = engine.current_player().expect("current player");
//! let sum = engine.table_sum();
//! assert_eq!(selector.select(bot.hand(), sum), bot.select_card(sum));
//! ```
//!
//! ## Policy names
//!
//! - `"baseline"` - [`baseline::FirstFit`]
//! - `"cautious"` - [`cautious::LowestSum`]
//! - `"random"` - [`random::RandomPick`]

use fifty_engine::cards::Card;
use thiserror::Error;

pub mod baseline;
pub mod cautious;
pub mod random;

/// Names accepted by [`create_selector`].
pub const SELECTOR_NAMES: &[&str] = &["baseline", "cautious", "random"];

/// Chooses a card for an automated seat.
///
/// Implementations must return `None` exactly when no card in `hand` keeps
/// `sum` at or below 50, and any card they return must satisfy that bound.
///
/// # Example Implementation
///
/// ```rust
/// use fifty_ai::CardSelector;
/// use fifty_engine::cards::Card;
/// use fifty_engine::rules::is_playable;
///
/// struct LastFit;
///
/// impl CardSelector for LastFit {
///     fn select(&self, hand: &[Card], sum: i32) -> Option<Card> {
///         hand.iter().rev().find(|c| is_playable(c, sum)).copied()
///     }
///
///     fn name(&self) -> &str {
///         "LastFit"
///     }
/// }
/// ```
pub trait CardSelector: Send + Sync {
    /// Pick a card from `hand` to play onto a table showing `sum`.
    fn select(&self, hand: &[Card], sum: i32) -> Option<Card>;

    /// Identifier of this policy.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown selection policy: {0} (expected one of: baseline, cautious, random)")]
pub struct UnknownSelector(pub String);

/// Builds a selector by policy name. `seed` only matters for `"random"`.
///
/// ```rust
/// use fifty_ai::create_selector;
///
/// let ai = create_selector("cautious", None).unwrap();
/// assert_eq!(ai.name(), "Cautious");
/// assert!(create_selector("aggressive", None).is_err());
/// ```
pub fn create_selector(
    name: &str,
    seed: Option<u64>,
) -> Result<Box<dyn CardSelector>, UnknownSelector> {
    match name.trim().to_ascii_lowercase().as_str() {
        "baseline" => Ok(Box::new(baseline::FirstFit::new())),
        "cautious" => Ok(Box::new(cautious::LowestSum::new())),
        "random" => Ok(Box::new(random::RandomPick::new(seed.unwrap_or(0)))),
        _ => Err(UnknownSelector(name.to_string())),
    }
}

pub fn is_known_selector(name: &str) -> bool {
    SELECTOR_NAMES.contains(&name.trim().to_ascii_lowercase().as_str())
}
