use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The card is not held by the current player, or playing it would push the sum past 50.
    #[error("Invalid move: {0}")]
    InvalidMove(String),
    /// Nothing left to draw, even after recycling the table.
    #[error("Deck is empty and the table has nothing to recycle")]
    DeckEmpty,
    /// The engine was driven out of order.
    #[error("Invalid game state: {0}")]
    InvalidGameState(String),
    #[error("Number of bots must be between 1 and 3 (got {0})")]
    InvalidBotCount(usize),
}
