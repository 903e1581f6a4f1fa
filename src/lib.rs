//! # memory-match
//!
//! Game-state engine for a single-player memory matching card game.
//!
//! A deck of paired cards is shuffled and dealt face-down. Each turn the
//! player reveals two cards; a match scores `100 * combo` and extends the
//! combo streak, a miss resets the combo and turns both cards back over.
//! The game ends when every pair is found.
//!
//! ## Design Principles
//!
//! 1. **Engine owns all state**: The presentation layer reads `GameState`
//!    and sends two commands, `initialize` and `flip`. It holds no rules.
//!
//! 2. **Forgiving input**: Out-of-protocol flips are silent no-ops, never
//!    errors. Broken deck invariants are panics.
//!
//! 3. **Caller-driven time**: Turn delays are a clock advanced by `tick`,
//!    so games are deterministic and delays can be compressed to zero.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, deterministic RNG
//! - `cards`: Card ids, card state, the dealt deck
//! - `engine`: Turn controller, state, scoring, change events, snapshots
//! - `session`: Tokio task that runs a game with real-time delays
//! - `autoplay`: Automated players for simulation
//!
//! ## Example
//!
//! ```
//! use memory_match::{GameConfig, MemoryGame};
//!
//! let mut game = MemoryGame::new(GameConfig::default(), 42).unwrap();
//! let first = game.state().deck.at(0).unwrap().id;
//! let second = game.state().deck.at(1).unwrap().id;
//!
//! game.flip(first);
//! game.flip(second);
//! assert!(game.state().is_processing());
//!
//! game.tick(600);
//! game.tick(200);
//! assert!(!game.state().is_processing());
//! assert_eq!(game.state().moves, 1);
//! ```

pub mod autoplay;
pub mod cards;
pub mod core;
pub mod engine;
pub mod session;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    CardTheme, ConfigError, DeckError, GameConfig, GameRng, GameRngState, SessionError,
    SnapshotError,
};

pub use crate::cards::{Card, CardId, Deck, PairId};

pub use crate::engine::{
    EventBatch, EventLog, GameEvent, GameObserver, GameSnapshot, GameState, IgnoreReason,
    MemoryGame, TurnPhase,
};

pub use crate::session::{SessionCommand, SessionHandle};

pub use crate::autoplay::{play_out, GameSummary, PerfectMemory, Player, RandomPlayer};
