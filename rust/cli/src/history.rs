//! JSONL game records written by `sim` and read back by `stats`.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use fifty_engine::stats::{GameStats, PlayerStats};
use serde::{Deserialize, Serialize};

use crate::error::CliError;
use crate::io_utils::open_append;

/// One finished (or abandoned) game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// `YYYYMMDD-NNNNNN`
    pub game_id: String,
    pub seed: u64,
    /// Seat names in turn order
    pub players: Vec<String>,
    pub bot_policy: String,
    pub human_policy: String,
    /// `None` when the game hit the turn limit
    pub winner: Option<String>,
    pub stats: GameStats,
    pub player_stats: BTreeMap<String, PlayerStats>,
    /// RFC3339, filled in on write
    #[serde(default)]
    pub ts: Option<String>,
}

impl GameRecord {
    /// Checks that the record describes a consistent game.
    pub fn validate(&self) -> Result<(), String> {
        let flagged: Vec<&String> = self
            .player_stats
            .iter()
            .filter(|(_, s)| s.is_winner)
            .map(|(name, _)| name)
            .collect();
        match &self.winner {
            Some(winner) => {
                if !self.players.contains(winner) {
                    return Err(format!("winner {} is not seated", winner));
                }
                if flagged != [winner] {
                    return Err(format!("winner flag does not match {}", winner));
                }
            }
            None => {
                if !flagged.is_empty() {
                    return Err("unfinished game has a winner flag".into());
                }
            }
        }
        if self.stats.players_eliminated as usize >= self.players.len() {
            return Err("every player eliminated".into());
        }
        Ok(())
    }
}

pub fn format_game_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends records to a JSONL file, numbering games per run.
pub struct GameLogger {
    writer: Option<Box<dyn Write>>,
    date: String,
    seq: u32,
}

impl GameLogger {
    pub fn append(path: &Path) -> Result<Self, CliError> {
        let writer = open_append(path)?;
        Ok(Self {
            writer: Some(Box::new(writer)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that numbers games but writes nothing.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_game_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &GameRecord) -> Result<(), CliError> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(winner: Option<&str>) -> GameRecord {
        let mut player_stats = BTreeMap::new();
        for name in ["You", "Bot 1"] {
            player_stats.insert(
                name.to_string(),
                PlayerStats {
                    cards_played: 3,
                    turns_played: 4,
                    is_winner: Some(name) == winner,
                },
            );
        }
        GameRecord {
            game_id: format_game_id("20261019", 1),
            seed: 7,
            players: vec!["You".into(), "Bot 1".into()],
            bot_policy: "baseline".into(),
            human_policy: "baseline".into(),
            winner: winner.map(str::to_string),
            stats: GameStats {
                total_turns: 8,
                cards_played: 6,
                players_eliminated: u32::from(winner.is_some()),
            },
            player_stats,
            ts: None,
        }
    }

    #[test]
    fn ids_are_sequential() {
        let mut logger = GameLogger::detached("20261019");
        assert_eq!(logger.next_id(), "20261019-000001");
        assert_eq!(logger.next_id(), "20261019-000002");
    }

    #[test]
    fn consistent_records_validate() {
        assert!(record(Some("Bot 1")).validate().is_ok());
        assert!(record(None).validate().is_ok());
    }

    #[test]
    fn stray_winner_is_rejected() {
        let mut r = record(Some("Bot 1"));
        r.winner = Some("Bot 9".into());
        assert!(r.validate().is_err());
    }

    #[test]
    fn written_lines_carry_a_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.jsonl");
        let mut logger = GameLogger::append(&path).unwrap();
        logger.write(&record(Some("You"))).unwrap();
        drop(logger);

        let text = std::fs::read_to_string(&path).unwrap();
        let back: GameRecord = serde_json::from_str(text.trim()).unwrap();
        assert!(back.ts.is_some());
        assert_eq!(back.winner.as_deref(), Some("You"));
    }
}
