//! Error types for memory-match.
//!
//! Player commands never fail: out-of-protocol flips are ignored.
//! Errors only arise from building a game out of bad configuration
//! or from decoding a corrupt snapshot.

use thiserror::Error;

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while validating a `GameConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("deck needs at least one pair")]
    NoPairs,

    #[error("too many pairs: {count} (max {max})")]
    TooManyPairs { count: usize, max: usize },

    #[error("empty symbol for pair {pair}")]
    EmptySymbol { pair: usize },

    #[error("duplicate symbol {symbol:?} for pairs {first} and {second}")]
    DuplicateSymbol {
        symbol: String,
        first: usize,
        second: usize,
    },

    #[error("invalid config json: {0}")]
    Json(String),
}

/// Deck construction invariants. Raised as panics for decks built in code
/// and as decode errors for decks read back from a snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("duplicate card id Card({0})")]
    DuplicateId(u32),

    #[error("Pair({pair}) has {count} cards, expected 2")]
    UnpairedCard { pair: u32, count: usize },
}

/// Errors returned by a `SessionHandle` once the session task is gone.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session closed")]
    Closed,

    #[error("session task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors that can occur while decoding a `GameSnapshot`.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot decode failed: {0}")]
    Decode(#[from] bincode::Error),

    #[error("snapshot config rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("snapshot inconsistent: {0}")]
    Inconsistent(&'static str),
}
