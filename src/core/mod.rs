//! Core engine types: configuration, errors, RNG.
//!
//! This module contains the building blocks shared by the deck and the
//! engine. Games configure these via `GameConfig` rather than modifying
//! the engine.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{default_themes, CardTheme, GameConfig, MAX_PAIRS};
pub use error::{ConfigError, DeckError, Result, SessionError, SnapshotError};
pub use rng::{GameRng, GameRngState};
