//! Game state: everything a presentation layer can observe.
//!
//! `GameState` is owned by `MemoryGame` and handed out read-only.
//! All mutation goes through engine commands.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Deck};

/// Where the current turn is in its evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Accepting flips. Zero or one card pending.
    #[default]
    Idle,
    /// Both cards face-up, waiting out the reveal delay.
    Revealing { remaining_ms: u64 },
    /// Miss decided, waiting out the flip-back delay.
    FlippingBack { remaining_ms: u64 },
}

impl TurnPhase {
    /// Delay left before the next transition, if any.
    #[must_use]
    pub fn remaining_ms(self) -> Option<u64> {
        match self {
            TurnPhase::Idle => None,
            TurnPhase::Revealing { remaining_ms } | TurnPhase::FlippingBack { remaining_ms } => {
                Some(remaining_ms)
            }
        }
    }
}

/// Why a flip was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// A two-card turn is being evaluated.
    Processing,
    /// No card with this id in the current deck.
    UnknownCard,
    /// Card is already face-up in this turn.
    AlreadyFlipped,
    /// Card was resolved in an earlier turn.
    AlreadyMatched,
}

/// Whole-session snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Cards in display order.
    pub deck: Deck,

    pub score: u32,
    pub moves: u32,
    pub matched_pairs: u32,
    pub combo: u32,

    /// Highest score seen this session. Survives `initialize`.
    pub best_score: u32,

    /// Set once every pair is found. Only `initialize` clears it.
    pub is_game_complete: bool,

    /// First card of the open turn.
    pub pending_first: Option<CardId>,

    /// Second card of the turn under evaluation.
    pub pending_second: Option<CardId>,

    /// Latest status line.
    pub message: String,

    /// Evaluation progress of the current turn.
    pub phase: TurnPhase,
}

impl GameState {
    /// True while a two-card turn is being evaluated. Flips are ignored.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.phase != TurnPhase::Idle
    }

    /// Number of pairs in the deck.
    #[must_use]
    pub fn pair_count(&self) -> u32 {
        self.deck.pair_count() as u32
    }

    /// Pairs still hidden.
    #[must_use]
    pub fn pairs_remaining(&self) -> u32 {
        self.pair_count() - self.matched_pairs
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id)
    }

    /// Why flipping `id` would be ignored, or `None` if it would be accepted.
    #[must_use]
    pub fn flip_rejection(&self, id: CardId) -> Option<IgnoreReason> {
        if self.is_processing() {
            return Some(IgnoreReason::Processing);
        }
        let Some(card) = self.deck.get(id) else {
            return Some(IgnoreReason::UnknownCard);
        };
        if card.is_matched {
            Some(IgnoreReason::AlreadyMatched)
        } else if card.is_flipped {
            Some(IgnoreReason::AlreadyFlipped)
        } else {
            None
        }
    }

    /// Check structural consistency. Used when restoring snapshots.
    pub(crate) fn check(&self) -> Result<(), &'static str> {
        if self.deck.is_empty() {
            return Err("empty deck");
        }
        if self.matched_pairs as usize * 2 != self.deck.matched_count() {
            return Err("matched_pairs disagrees with matched cards");
        }
        if self.is_game_complete != (self.matched_pairs == self.pair_count()) {
            return Err("completion flag disagrees with matched pairs");
        }
        if self.best_score < self.score {
            return Err("best score below score");
        }
        for id in [self.pending_first, self.pending_second].into_iter().flatten() {
            match self.deck.get(id) {
                Some(card) if card.is_flipped && !card.is_matched => {}
                _ => return Err("pending card missing or not face-up"),
            }
        }
        let pending = [self.pending_first, self.pending_second];
        for card in self.deck.iter() {
            if card.is_matched && !card.is_flipped {
                return Err("matched card is face-down");
            }
            if card.is_flipped && !card.is_matched && !pending.contains(&Some(card.id)) {
                return Err("face-up card is neither pending nor matched");
            }
            let partner_matched = self
                .deck
                .partner_of(card.id)
                .and_then(|id| self.deck.get(id))
                .map(|partner| partner.is_matched);
            if partner_matched != Some(card.is_matched) {
                return Err("pair is only half matched");
            }
        }
        let turn_complete = self.pending_first.is_some() && self.pending_second.is_some();
        if self.pending_second.is_some() && self.pending_first.is_none() {
            return Err("second pending card without first");
        }
        if self.is_processing() != turn_complete {
            return Err("phase disagrees with pending cards");
        }
        Ok(())
    }
}
