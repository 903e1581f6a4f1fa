//! Python bindings for the memory-match engine.
//!
//! # Quick Start
//!
//! ```python
//! import memory_match as mm
//!
//! game = mm.MemoryGame(seed=42, instant=True)
//! cards = game.cards()
//!
//! game.flip(cards[0].id)
//! game.flip(cards[1].id)
//! print(game.score, game.moves, game.message)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_game;

pub use py_core::*;
pub use py_game::*;

/// memory-match: game-state engine for a memory matching card game.
#[pymodule]
fn memory_match(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCard>()?;
    m.add_class::<PyMemoryGame>()?;
    Ok(())
}
