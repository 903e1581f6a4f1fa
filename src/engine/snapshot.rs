//! In-session checkpoints.
//!
//! A `GameSnapshot` captures everything needed to rebuild a `MemoryGame`
//! mid-game, including a turn under evaluation and the RNG position, so a
//! restored game deals the same future decks. Observers are not captured.

use serde::{Deserialize, Serialize};

use super::engine::MemoryGame;
use super::state::GameState;
use crate::core::{GameConfig, GameRng, GameRngState, SnapshotError};

/// Serializable copy of a game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub state: GameState,
    pub rng: GameRngState,
    pub next_card_id: u32,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode with bincode. Does not check consistency; see `MemoryGame::restore`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl MemoryGame {
    /// Capture the current game.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config().clone(),
            state: self.state().clone(),
            rng: self.rng().state(),
            next_card_id: self.next_card_id(),
        }
    }

    /// Rebuild a game from a snapshot.
    ///
    /// Rejects snapshots whose config is invalid or whose state breaks the
    /// engine's invariants.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self, SnapshotError> {
        snapshot.config.validate()?;
        if snapshot.state.deck.pair_count() != snapshot.config.pair_count() {
            return Err(SnapshotError::Inconsistent("deck size does not match config"));
        }
        snapshot.state.check().map_err(SnapshotError::Inconsistent)?;
        if let Some(max_id) = snapshot.state.deck.max_id() {
            if snapshot.next_card_id <= max_id.raw() {
                return Err(SnapshotError::Inconsistent(
                    "next card id would reuse a dealt id",
                ));
            }
        }

        Ok(MemoryGame::from_parts(
            snapshot.config,
            snapshot.state,
            GameRng::from_state(&snapshot.rng),
            snapshot.next_card_id,
        ))
    }
}
