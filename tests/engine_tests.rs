//! Turn protocol tests against the public engine API.
//!
//! These walk through the documented play scenarios:
//! - Matching and missing turns with real delays
//! - A perfect game with a full combo run
//! - Re-dealing mid-turn
//! - Ignored flips leaving state untouched

use memory_match::engine::{messages, streak_total};
use memory_match::{CardId, EventLog, GameConfig, GameEvent, MemoryGame};

/// A B A C B C D D E E F F G G H H
const LAYOUT: [u32; 16] = [0, 1, 0, 2, 1, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7];

fn arranged_game(config: GameConfig) -> MemoryGame {
    let mut game = MemoryGame::new(config, 2024).expect("valid config");
    game.initialize_arranged(&LAYOUT);
    game
}

fn id_at(game: &MemoryGame, pos: usize) -> CardId {
    game.state().deck.at(pos).expect("position in deck").id
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_matching_pair_after_reveal_delay() {
    let mut game = arranged_game(GameConfig::default());
    let a1 = id_at(&game, 0);
    let a2 = id_at(&game, 2);

    game.flip(a1);
    game.flip(a2);

    // Both visible, nothing resolved yet
    assert!(game.state().card(a1).unwrap().is_flipped);
    assert!(game.state().card(a2).unwrap().is_flipped);
    assert_eq!(game.state().matched_pairs, 0);

    game.tick(600);

    let state = game.state();
    assert!(state.card(a1).unwrap().is_matched);
    assert!(state.card(a2).unwrap().is_matched);
    assert_eq!(state.matched_pairs, 1);
    assert_eq!(state.combo, 1);
    assert_eq!(state.score, 100);
    assert!(!state.is_processing());
}

#[test]
fn test_mismatch_returns_face_down() {
    let mut game = arranged_game(GameConfig::default());
    let a = id_at(&game, 0);
    let b = id_at(&game, 1);

    game.flip(a);
    game.flip(b);
    game.tick(600);
    game.tick(200);

    let state = game.state();
    assert!(!state.card(a).unwrap().is_flipped);
    assert!(!state.card(b).unwrap().is_flipped);
    assert!(!state.card(a).unwrap().is_matched);
    assert!(!state.card(b).unwrap().is_matched);
    assert_eq!(state.combo, 0);
    assert_eq!(state.score, 0);
    assert_eq!(state.message, messages::MISS);
}

#[test]
fn test_eight_consecutive_matches() {
    let mut game = arranged_game(GameConfig::default());
    let pairs = [(0, 2), (1, 4), (3, 5), (6, 7), (8, 9), (10, 11), (12, 13), (14, 15)];

    for &(x, y) in &pairs[..7] {
        game.flip(id_at(&game, x));
        game.flip(id_at(&game, y));
        game.tick(600);
    }
    assert!(!game.state().is_game_complete);
    let before_last = game.state().score;

    game.flip(id_at(&game, 14));
    game.flip(id_at(&game, 15));
    game.tick(600);

    let state = game.state();
    assert_eq!(state.combo, 8);
    assert_eq!(state.score - before_last, 800);
    assert_eq!(state.score, streak_total(100, 8));
    assert!(state.is_game_complete);
    assert_eq!(state.message, messages::victory(3600, 8));
}

#[test]
fn test_initialize_mid_turn_gives_fresh_deck() {
    let mut game = arranged_game(GameConfig::default());
    game.flip(id_at(&game, 0));
    assert!(game.state().pending_first.is_some());

    game.initialize();

    let state = game.state();
    assert_eq!(state.pending_first, None);
    assert_eq!(state.pending_second, None);
    assert!(!state.is_processing());
    assert_eq!(state.deck.len(), 16);
    assert!(state.deck.iter().all(|c| !c.is_flipped && !c.is_matched));
    assert_eq!(state.message, messages::START);
}

// =============================================================================
// Ignored flips
// =============================================================================

#[test]
fn test_ignored_flips_change_nothing() {
    let mut game = arranged_game(GameConfig::default());
    let log = EventLog::new();
    game.subscribe(log.clone());

    // Match A so we have a matched card to poke at
    let a1 = id_at(&game, 0);
    game.flip(a1);
    game.flip(id_at(&game, 2));
    game.settle();

    // Open a turn so we have a flipped card too
    let b = id_at(&game, 1);
    game.flip(b);
    log.drain();

    let before = game.state().clone();
    for id in [a1, b, CardId::new(10_000)] {
        assert!(game.flip(id).is_empty());
        assert_eq!(game.state(), &before);
    }

    // Second card starts evaluation; further flips are dropped
    game.flip(id_at(&game, 3));
    let during = game.state().clone();
    assert!(game.flip(id_at(&game, 6)).is_empty());
    assert_eq!(game.state(), &during);

    let events = log.drain();
    assert!(!events.is_empty());
    assert!(events
        .iter()
        .all(|e| !matches!(e, GameEvent::CardChanged(c) if c.id == id_at(&game, 6))));
}

#[test]
fn test_matched_cards_stay_matched() {
    let mut game = arranged_game(GameConfig::instant());
    let a1 = id_at(&game, 0);
    let a2 = id_at(&game, 2);
    game.flip(a1);
    game.flip(a2);

    // A run of misses must not touch the matched pair
    for _ in 0..5 {
        game.flip(id_at(&game, 1));
        game.flip(id_at(&game, 3));
        assert!(game.state().card(a1).unwrap().is_matched);
        assert!(game.state().card(a2).unwrap().is_matched);
        assert!(game.state().card(a1).unwrap().is_flipped);
    }
    assert_eq!(game.state().matched_pairs, 1);
    assert_eq!(game.state().moves, 6);
}

// =============================================================================
// Session-level bookkeeping
// =============================================================================

#[test]
fn test_best_score_survives_reinitialize() {
    let mut game = arranged_game(GameConfig::instant());
    game.flip(id_at(&game, 0));
    game.flip(id_at(&game, 2));
    game.flip(id_at(&game, 6));
    game.flip(id_at(&game, 7));
    assert_eq!(game.state().best_score, 300);

    game.initialize_arranged(&LAYOUT);
    assert_eq!(game.state().score, 0);
    assert_eq!(game.state().best_score, 300);

    // A lower score does not lower the best
    game.flip(id_at(&game, 0));
    game.flip(id_at(&game, 2));
    assert_eq!(game.state().score, 100);
    assert_eq!(game.state().best_score, 300);
}

#[test]
fn test_completion_event_and_reset() {
    let mut game = arranged_game(GameConfig::instant());
    let log = EventLog::new();
    game.subscribe(log.clone());

    for &(x, y) in &[(0, 2), (1, 4), (3, 5), (6, 7), (8, 9), (10, 11), (12, 13), (14, 15)] {
        game.flip(id_at(&game, x));
        game.flip(id_at(&game, y));
    }

    let completions: Vec<_> = log
        .drain()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::GameCompleted(_)))
        .collect();
    assert_eq!(completions, vec![GameEvent::GameCompleted(true)]);

    // Completion holds until a new deal
    game.tick(5_000);
    assert!(game.state().is_game_complete);

    let events = game.initialize();
    assert!(events.contains(&GameEvent::GameCompleted(false)));
    assert!(!game.state().is_game_complete);
}

#[test]
fn test_classic_game_has_sixteen_face_down_cards() {
    let game = MemoryGame::classic(99);
    let state = game.state();

    assert_eq!(state.deck.len(), 16);
    assert_eq!(state.pair_count(), 8);
    assert_eq!(state.deck.face_down_ids().count(), 16);
}
