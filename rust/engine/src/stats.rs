use serde::{Deserialize, Serialize};

/// Game-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Calls to `next_turn`
    pub total_turns: u32,
    pub cards_played: u32,
    pub players_eliminated: u32,
}

/// Counters kept for one seat, keyed by player name in the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub cards_played: u32,
    pub turns_played: u32,
    pub is_winner: bool,
}

impl std::fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cards: {}, Turns: {}{}",
            self.cards_played,
            self.turns_played,
            if self.is_winner { " (WINNER)" } else { "" }
        )
    }
}
