//! Game engine: state, turn protocol, scoring and change events.
//!
//! ## Key Types
//!
//! - `MemoryGame`: Owns the state; accepts `initialize`, `flip`, `tick`
//! - `GameState`: Read-only view for the presentation layer
//! - `GameEvent`: One variant per observable field
//! - `GameObserver`: Subscription hook for change events
//! - `GameSnapshot`: Serializable checkpoint of a running game

#[allow(clippy::module_inception)]
pub mod engine;
pub mod event;
pub mod scoring;
pub mod snapshot;
pub mod state;

pub use engine::MemoryGame;
pub use event::{EventBatch, EventLog, GameEvent, GameObserver};
pub use scoring::{match_points, messages, streak_total};
pub use snapshot::GameSnapshot;
pub use state::{GameState, IgnoreReason, TurnPhase};
