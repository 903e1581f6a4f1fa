//! Automated players for simulation, benchmarks, and tests.
//!
//! A `Player` picks the next card to flip from the visible state. Players
//! only learn a card's symbol by calling `observe` after flipping it, so a
//! strategy never peeks at face-down cards.
//!
//! `play_out` drives a game to completion, settling each turn's
//! evaluation immediately.

mod players;

pub use players::{PerfectMemory, RandomPlayer};

use crate::cards::{Card, CardId};
use crate::engine::{GameState, MemoryGame};

/// A strategy that chooses which card to flip next.
pub trait Player {
    /// Pick a face-down card, or `None` if there is nothing to flip.
    fn choose(&mut self, state: &GameState) -> Option<CardId>;

    /// Called with each card right after this player flipped it.
    fn observe(&mut self, _card: &Card) {}

    /// Forget everything learned about the current deck.
    fn reset(&mut self) {}
}

/// Result of an automated game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub moves: u32,
    pub flips: u32,
    pub best_combo: u32,
    pub completed: bool,
}

/// Play until every pair is found or `max_flips` flips were made.
pub fn play_out(game: &mut MemoryGame, player: &mut dyn Player, max_flips: u32) -> GameSummary {
    let mut summary = GameSummary::default();

    while !game.state().is_game_complete && summary.flips < max_flips {
        game.settle();
        summary.best_combo = summary.best_combo.max(game.state().combo);

        let Some(id) = player.choose(game.state()) else {
            break;
        };
        if game.flip(id).is_empty() {
            // Strategy picked an illegal card; stop rather than spin.
            break;
        }
        summary.flips += 1;
        if let Some(card) = game.state().card(id) {
            player.observe(card);
        }
    }

    game.settle();
    let state = game.state();
    summary.best_combo = summary.best_combo.max(state.combo);
    summary.score = state.score;
    summary.moves = state.moves;
    summary.completed = state.is_game_complete;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    #[test]
    fn test_perfect_memory_finishes() {
        let mut game = MemoryGame::new(GameConfig::default(), 42).unwrap();
        let mut player = PerfectMemory::new();

        let summary = play_out(&mut game, &mut player, 1000);

        assert!(summary.completed);
        assert_eq!(game.state().matched_pairs, 8);
        assert!(summary.moves >= 8);
        // Worst case for perfect memory: every card seen once before pairing
        assert!(summary.moves <= 16);
        assert_eq!(summary.flips, summary.moves * 2);
    }

    #[test]
    fn test_random_player_finishes() {
        let mut game = MemoryGame::new(GameConfig::instant(), 7).unwrap();
        let mut player = RandomPlayer::new(7);

        let summary = play_out(&mut game, &mut player, 100_000);

        assert!(summary.completed);
        assert!(summary.score >= 800);
    }

    #[test]
    fn test_flip_budget_stops_early() {
        let mut game = MemoryGame::classic(1);
        let mut player = RandomPlayer::new(1);

        let summary = play_out(&mut game, &mut player, 3);

        assert_eq!(summary.flips, 3);
        assert!(!summary.completed);
        assert_eq!(summary.moves, 1);
    }
}
