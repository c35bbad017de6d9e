//! Shared ownership of one running game.
//!
//! Every mutation of a game goes through [`GameSession::with_engine`], which
//! holds the game's single lock for the duration of the call.

use std::sync::{Arc, Mutex};

use fifty_engine::engine::Engine;

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct GameSession {
    id: String,
    engine: Arc<Mutex<Engine>>,
}

impl GameSession {
    pub fn new(id: impl Into<String>, engine: Engine) -> Self {
        Self {
            id: id.into(),
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> Result<R, CliError> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| CliError::Engine(format!("session {} state poisoned", self.id)))?;
        Ok(f(&mut engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_share_one_engine() {
        let mut engine = Engine::new(Some(3));
        engine.start(1).unwrap();
        let session = GameSession::new("g1", engine);
        let other = session.clone();

        let handle = thread::spawn(move || {
            other
                .with_engine(|e| {
                    let sum = e.table_sum();
                    let card = e.current_player().unwrap().hand()[0];
                    (sum, card)
                })
                .unwrap()
        });
        let (sum, card) = handle.join().unwrap();
        let (sum_here, card_here) = session
            .with_engine(|e| (e.table_sum(), e.current_player().unwrap().hand()[0]))
            .unwrap();
        assert_eq!(sum, sum_here);
        assert_eq!(card, card_here);
        assert_eq!(session.id(), "g1");
    }

    #[test]
    fn mutations_are_visible_to_every_handle() {
        let mut engine = Engine::new(Some(5));
        engine.start(2).unwrap();
        let session = GameSession::new("g2", engine);
        let other = session.clone();
        other.with_engine(|e| e.next_turn()).unwrap().unwrap();
        assert_eq!(session.with_engine(|e| e.current_index()).unwrap(), 1);
    }
}
