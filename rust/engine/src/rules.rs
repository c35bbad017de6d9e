use crate::cards::Card;
use crate::errors::GameError;

/// Highest table sum a play may leave behind.
pub const MAX_SUM: i32 = 50;

/// Cards dealt to every seat when a game starts.
pub const HAND_SIZE: usize = 4;

/// Allowed number of automated opponents.
pub const MIN_BOTS: usize = 1;
pub const MAX_BOTS: usize = 3;

/// Sum the table would show after playing `card` onto `current_sum`.
pub fn sum_after(card: &Card, current_sum: i32) -> i32 {
    current_sum + card.value(current_sum)
}

/// Whether `card` may be played onto a table showing `current_sum`.
///
/// ```
/// use fifty_engine::cards::{Card, Rank, Suit};
/// use fifty_engine::rules::is_playable;
///
/// assert!(is_playable(&Card::new(Rank::King, Suit::Spades), 45));
/// assert!(!is_playable(&Card::new(Rank::Ten, Suit::Hearts), 45));
/// // an Ace falls back to 1 when 10 would overflow
/// assert!(is_playable(&Card::new(Rank::Ace, Suit::Clubs), 49));
/// ```
pub fn is_playable(card: &Card, current_sum: i32) -> bool {
    sum_after(card, current_sum) <= MAX_SUM
}

/// Validates a play and returns the resulting sum.
///
/// # Errors
///
/// [`GameError::InvalidMove`] when the play would push the sum past [`MAX_SUM`].
pub fn validate_play(card: &Card, current_sum: i32) -> Result<i32, GameError> {
    let next = sum_after(card, current_sum);
    if next > MAX_SUM {
        return Err(GameError::InvalidMove(format!(
            "{} would exceed {} (current: {}, card: {})",
            card,
            MAX_SUM,
            current_sum,
            card.value(current_sum)
        )));
    }
    Ok(next)
}

/// Rejects bot counts outside `MIN_BOTS..=MAX_BOTS`.
pub fn validate_bot_count(bots: usize) -> Result<(), GameError> {
    if (MIN_BOTS..=MAX_BOTS).contains(&bots) {
        Ok(())
    } else {
        Err(GameError::InvalidBotCount(bots))
    }
}
