//! Card identity and per-card state.

use serde::{Deserialize, Serialize};

use crate::core::CardTheme;

/// Unique identifier for one card slot in a deck.
///
/// Ids are allocated by the engine and never reused within a session,
/// so a stale id from a previous deal can never address a new card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Groups the two cards of a pair. Equal to the theme index in the config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairId(pub u32);

impl PairId {
    /// Create a new pair ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// One card in the deck.
///
/// `is_matched` is authoritative for resolved cards. A matched card keeps
/// `is_flipped == true` since its face stays visible for the rest of the game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id for this slot.
    pub id: CardId,

    /// Pair this card belongs to.
    pub pair_id: PairId,

    /// Display token, identical for both cards of the pair.
    pub symbol: String,

    /// First colour stop of the face gradient.
    pub gradient_start: String,

    /// Second colour stop of the face gradient.
    pub gradient_end: String,

    /// Face currently revealed.
    pub is_flipped: bool,

    /// Resolved as part of a found pair. Never reverts.
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card from a theme.
    pub fn new(id: CardId, pair_id: PairId, theme: &CardTheme) -> Self {
        Self {
            id,
            pair_id,
            symbol: theme.symbol.clone(),
            gradient_start: theme.gradient_start.clone(),
            gradient_end: theme.gradient_end.clone(),
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Face-down and unmatched: a legal target for a flip.
    #[must_use]
    pub fn is_face_down(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }

    /// Same pair as another card.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.pair_id == other.pair_id
    }
}
