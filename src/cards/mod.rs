//! Card system: ids, per-card state, and the dealt deck.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for one card slot, unique within a session
//! - `PairId`: Groups the two cards of a pair
//! - `Card`: Symbol, presentation hints, and flip/match state
//! - `Deck`: Cards in display order with id lookup

pub mod card;
pub mod deck;

pub use card::{Card, CardId, PairId};
pub use deck::Deck;
