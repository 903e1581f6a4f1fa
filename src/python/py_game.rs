//! Game bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cards::CardId;
use crate::core::GameConfig;
use crate::engine::{EventBatch, GameEvent, MemoryGame};

use super::py_core::PyCard;

fn field_names(events: EventBatch) -> Vec<&'static str> {
    events.iter().map(GameEvent::field).collect()
}

/// Python wrapper for MemoryGame.
///
/// Commands return the names of the fields they changed, in order.
#[pyclass(name = "MemoryGame")]
pub struct PyMemoryGame {
    game: MemoryGame,
}

#[pymethods]
impl PyMemoryGame {
    /// Create a game and deal the first deck.
    ///
    /// # Arguments
    /// - seed: RNG seed for deterministic shuffles (default: from entropy)
    /// - symbols: optional list of pair symbols (default: the 8-emoji deck)
    /// - instant: compress both turn delays to zero
    #[new]
    #[pyo3(signature = (seed = None, symbols = None, instant = false))]
    fn new(seed: Option<u64>, symbols: Option<Vec<String>>, instant: bool) -> PyResult<Self> {
        let mut config = if instant {
            GameConfig::instant()
        } else {
            GameConfig::default()
        };
        if let Some(symbols) = symbols {
            config = config.with_symbols(symbols);
        }
        let game = match seed {
            Some(seed) => MemoryGame::new(config, seed),
            None => MemoryGame::with_random_seed(config),
        }
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { game })
    }

    /// Deal a new shuffled deck. Keeps the best score.
    fn initialize(&mut self) -> Vec<&'static str> {
        field_names(self.game.initialize())
    }

    /// Flip a card by id. Returns an empty list if the flip was ignored.
    fn flip(&mut self, card_id: u32) -> Vec<&'static str> {
        field_names(self.game.flip(CardId::new(card_id)))
    }

    /// Advance the turn clock.
    fn tick(&mut self, elapsed_ms: u32) -> Vec<&'static str> {
        field_names(self.game.tick(elapsed_ms))
    }

    /// Finish any pending evaluation immediately.
    fn settle(&mut self) -> Vec<&'static str> {
        field_names(self.game.settle())
    }

    /// Cards in display order.
    fn cards(&self) -> Vec<PyCard> {
        self.game.state().deck.iter().cloned().map(PyCard).collect()
    }

    /// Serialize the game to bytes.
    fn snapshot(&self) -> PyResult<Vec<u8>> {
        self.game
            .snapshot()
            .to_bytes()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[getter]
    fn score(&self) -> u32 {
        self.game.state().score
    }

    #[getter]
    fn moves(&self) -> u32 {
        self.game.state().moves
    }

    #[getter]
    fn matched_pairs(&self) -> u32 {
        self.game.state().matched_pairs
    }

    #[getter]
    fn combo(&self) -> u32 {
        self.game.state().combo
    }

    #[getter]
    fn best_score(&self) -> u32 {
        self.game.state().best_score
    }

    #[getter]
    fn message(&self) -> String {
        self.game.state().message.clone()
    }

    #[getter]
    fn is_processing(&self) -> bool {
        self.game.state().is_processing()
    }

    #[getter]
    fn is_game_complete(&self) -> bool {
        self.game.state().is_game_complete
    }

    fn __repr__(&self) -> String {
        let state = self.game.state();
        format!(
            "MemoryGame(score={}, moves={}, pairs={}/{}, combo={})",
            state.score,
            state.moves,
            state.matched_pairs,
            state.pair_count(),
            state.combo
        )
    }
}
