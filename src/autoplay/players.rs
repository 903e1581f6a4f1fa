//! Built-in strategies.

use rustc_hash::FxHashMap;

use super::Player;
use crate::cards::{Card, CardId, PairId};
use crate::core::GameRng;
use crate::engine::GameState;

/// Flips a uniformly random face-down card. Remembers nothing.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn choose(&mut self, state: &GameState) -> Option<CardId> {
        let face_down: Vec<CardId> = state.deck.face_down_ids().collect();
        self.rng.choose(&face_down).copied()
    }
}

/// Remembers every card it has seen and never wastes a known pair.
///
/// Each turn it finishes a known pair if it has one, otherwise it explores
/// an unseen card and pairs it from memory when it can.
#[derive(Clone, Debug, Default)]
pub struct PerfectMemory {
    seen: FxHashMap<CardId, PairId>,
}

impl PerfectMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards remembered.
    #[must_use]
    pub fn remembered(&self) -> usize {
        self.seen.len()
    }

    /// A face-down card whose partner is also known and face-down.
    fn known_pair(&self, face_down: &[CardId]) -> Option<CardId> {
        let mut by_pair: FxHashMap<PairId, CardId> = FxHashMap::default();
        for id in face_down {
            if let Some(&pair) = self.seen.get(id) {
                if let Some(other) = by_pair.insert(pair, *id) {
                    return Some(other);
                }
            }
        }
        None
    }

    fn first_unseen(&self, face_down: &[CardId]) -> Option<CardId> {
        face_down.iter().copied().find(|id| !self.seen.contains_key(id))
    }
}

impl Player for PerfectMemory {
    fn choose(&mut self, state: &GameState) -> Option<CardId> {
        let face_down: Vec<CardId> = state.deck.face_down_ids().collect();

        let preferred = match state.pending_first {
            None => self
                .known_pair(&face_down)
                .or_else(|| self.first_unseen(&face_down)),
            Some(first) => {
                let partner = self.seen.get(&first).and_then(|&pair| {
                    face_down
                        .iter()
                        .copied()
                        .find(|id| self.seen.get(id) == Some(&pair))
                });
                partner.or_else(|| self.first_unseen(&face_down))
            }
        };

        preferred.or_else(|| face_down.first().copied())
    }

    fn observe(&mut self, card: &Card) {
        self.seen.insert(card.id, card.pair_id);
    }

    fn reset(&mut self) {
        self.seen.clear();
    }
}
