//! The memory-match turn controller.
//!
//! `MemoryGame` owns the `GameState` and enforces the turn protocol:
//!
//! 1. First flip of a turn: reveal the card and wait for a second pick.
//! 2. Second flip: reveal it, count a move, and start evaluating.
//!    Flips are ignored until evaluation ends.
//! 3. After the reveal delay, resolve. A match scores `base * combo`;
//!    a miss resets the combo and, after the flip-back delay, turns both
//!    cards face-down again.
//!
//! Time is driven by the caller through [`MemoryGame::tick`], the same way
//! a fixed-timestep game loop advances its timers. [`MemoryGame::settle`]
//! finishes any evaluation at once; with zero delays in the config the
//! second flip resolves immediately. Outcomes never depend on the delays.

use tracing::{debug, info, trace};

use super::event::{EventBatch, GameEvent, GameObserver};
use super::scoring::{match_points, messages};
use super::state::{GameState, IgnoreReason, TurnPhase};
use crate::cards::{CardId, Deck};
use crate::core::{GameConfig, GameRng, Result};

/// Single-player memory game engine.
pub struct MemoryGame {
    config: GameConfig,
    state: GameState,
    rng: GameRng,
    /// Next card id to allocate. Ids are never reused within a session.
    next_card_id: u32,
    observers: Vec<Box<dyn GameObserver>>,
    outbox: EventBatch,
}

impl std::fmt::Debug for MemoryGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGame")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl MemoryGame {
    /// Create a game with a validated config and deal the first deck.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, GameRng::new(seed)))
    }

    /// Create a game seeded from entropy.
    pub fn with_random_seed(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, GameRng::from_entropy()))
    }

    /// The classic 8-pair game with default pacing.
    #[must_use]
    pub fn classic(seed: u64) -> Self {
        Self::build(GameConfig::default(), GameRng::new(seed))
    }

    fn build(config: GameConfig, rng: GameRng) -> Self {
        debug!(seed = rng.seed(), pairs = config.pair_count(), "creating game");
        let mut game = Self::from_parts(config, GameState::default(), rng, 0);
        game.initialize();
        game
    }

    pub(crate) fn from_parts(
        config: GameConfig,
        state: GameState,
        rng: GameRng,
        next_card_id: u32,
    ) -> Self {
        Self {
            config,
            state,
            rng,
            next_card_id,
            observers: Vec::new(),
            outbox: EventBatch::new(),
        }
    }

    // === Accessors ===

    /// Current state, read-only.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The configuration this game was built with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub(crate) fn rng(&self) -> &GameRng {
        &self.rng
    }

    pub(crate) fn next_card_id(&self) -> u32 {
        self.next_card_id
    }

    /// Milliseconds until the pending evaluation advances, if one is running.
    #[must_use]
    pub fn time_until_next_phase(&self) -> Option<u64> {
        self.state.phase.remaining_ms()
    }

    // === Observers ===

    /// Register an observer. It sees every event from now on.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Drop all observers.
    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    // === Commands ===

    /// Deal a fresh shuffled deck and reset everything except the best score.
    ///
    /// Any turn in progress, including one under evaluation, is discarded.
    pub fn initialize(&mut self) -> EventBatch {
        let first_id = self.alloc_ids();
        let deck = Deck::deal(&self.config.themes, first_id, &mut self.rng);
        self.reset_with(deck);
        self.flush()
    }

    /// Like `initialize`, but with a fixed layout instead of a shuffle.
    ///
    /// `pair_order` lists the pair id (theme index) for each display slot
    /// and must name every theme exactly twice. Card ids follow display
    /// order. Panics on an invalid layout.
    pub fn initialize_arranged(&mut self, pair_order: &[u32]) -> EventBatch {
        let first_id = self.alloc_ids();
        let deck = Deck::arranged(&self.config.themes, first_id, pair_order);
        self.reset_with(deck);
        self.flush()
    }

    /// Flip a card face-up.
    ///
    /// Ignored (empty batch) while a turn is being evaluated, or if the card
    /// is unknown, already face-up, or already matched.
    pub fn flip(&mut self, id: CardId) -> EventBatch {
        if let Some(reason) = self.state.flip_rejection(id) {
            trace!(card = %id, ?reason, "flip ignored");
            return EventBatch::new();
        }

        self.reveal(id);

        match (self.state.pending_first, self.state.pending_second) {
            (None, None) => {
                self.state.pending_first = Some(id);
                self.set_message(messages::PICK_ANOTHER.to_string());
                debug!(card = %id, "first card revealed");
            }
            (Some(first), None) => {
                self.state.pending_second = Some(id);
                self.set_moves(self.state.moves + 1);
                debug!(first = %first, second = %id, moves = self.state.moves, "turn complete, evaluating");
                self.begin_evaluation();
                self.advance(0);
            }
            (first, second) => {
                panic!(
                    "flip accepted with a full turn pending: {:?}, {:?}, {}",
                    first, second, id
                );
            }
        }

        self.flush()
    }

    /// Advance the evaluation clock by `elapsed_ms`.
    ///
    /// Does nothing between turns.
    pub fn tick(&mut self, elapsed_ms: u32) -> EventBatch {
        self.advance(u64::from(elapsed_ms));
        self.flush()
    }

    /// Run any pending evaluation to completion right away.
    pub fn settle(&mut self) -> EventBatch {
        self.advance(u64::MAX);
        self.flush()
    }

    /// Check whether a flip would be accepted.
    pub fn can_flip(&self, id: CardId) -> std::result::Result<(), IgnoreReason> {
        match self.state.flip_rejection(id) {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }

    // === Turn evaluation ===

    fn begin_evaluation(&mut self) {
        self.state.phase = TurnPhase::Revealing {
            remaining_ms: u64::from(self.config.reveal_delay_ms),
        };
        self.emit(GameEvent::ProcessingChanged(true));
    }

    /// Step through evaluation phases, spending `elapsed` on their delays.
    fn advance(&mut self, mut elapsed: u64) {
        loop {
            match self.state.phase {
                TurnPhase::Idle => return,
                TurnPhase::Revealing { remaining_ms } => {
                    if elapsed < remaining_ms {
                        self.state.phase = TurnPhase::Revealing {
                            remaining_ms: remaining_ms - elapsed,
                        };
                        return;
                    }
                    elapsed -= remaining_ms;
                    self.resolve_turn();
                }
                TurnPhase::FlippingBack { remaining_ms } => {
                    if elapsed < remaining_ms {
                        self.state.phase = TurnPhase::FlippingBack {
                            remaining_ms: remaining_ms - elapsed,
                        };
                        return;
                    }
                    elapsed -= remaining_ms;
                    self.hide_pending();
                    self.end_turn();
                }
            }
        }
    }

    fn resolve_turn(&mut self) {
        let (Some(first), Some(second)) = (self.state.pending_first, self.state.pending_second)
        else {
            panic!("evaluating a turn without two pending cards");
        };
        let (Some(a), Some(b)) = (self.state.deck.get(first), self.state.deck.get(second)) else {
            panic!("pending cards {} and {} are not in the deck", first, second);
        };

        if a.pairs_with(b) {
            let pair = a.pair_id;
            self.mark_matched(first);
            self.mark_matched(second);

            self.set_matched_pairs(self.state.matched_pairs + 1);
            self.set_combo(self.state.combo + 1);

            let combo = self.state.combo;
            let points = match_points(self.config.points_per_match, combo);
            self.set_score(self.state.score.saturating_add(points));
            if self.state.score > self.state.best_score {
                self.set_best_score(self.state.score);
            }
            self.set_message(messages::matched(combo, points));
            debug!(%pair, combo, points, score = self.state.score, "match");

            if self.state.matched_pairs == self.state.pair_count() {
                self.complete();
            }
            self.end_turn();
        } else {
            self.set_combo(0);
            self.set_message(messages::MISS.to_string());
            debug!(first = %first, second = %second, "miss");

            self.state.phase = TurnPhase::FlippingBack {
                remaining_ms: u64::from(self.config.flip_back_delay_ms),
            };
        }
    }

    fn complete(&mut self) {
        self.state.is_game_complete = true;
        self.emit(GameEvent::GameCompleted(true));
        self.set_message(messages::victory(self.state.score, self.state.moves));
        info!(
            score = self.state.score,
            moves = self.state.moves,
            best = self.state.best_score,
            "game complete"
        );
    }

    fn hide_pending(&mut self) {
        for id in [self.state.pending_first, self.state.pending_second]
            .into_iter()
            .flatten()
        {
            if let Some(card) = self.state.deck.update(id, |c| c.is_flipped = false) {
                self.emit(GameEvent::CardChanged(card));
            }
        }
    }

    fn end_turn(&mut self) {
        self.state.pending_first = None;
        self.state.pending_second = None;
        self.state.phase = TurnPhase::Idle;
        self.emit(GameEvent::ProcessingChanged(false));
    }

    // === Card mutation ===

    fn reveal(&mut self, id: CardId) {
        if let Some(card) = self.state.deck.update(id, |c| c.is_flipped = true) {
            self.emit(GameEvent::CardChanged(card));
        }
    }

    fn mark_matched(&mut self, id: CardId) {
        if let Some(card) = self.state.deck.update(id, |c| c.is_matched = true) {
            self.emit(GameEvent::CardChanged(card));
        }
    }

    // === Reset ===

    /// Reserve ids for one deal. Panics once the id space is exhausted
    /// rather than handing out ids a second time.
    fn alloc_ids(&mut self) -> u32 {
        let first = self.next_card_id;
        self.next_card_id = u32::try_from(self.config.card_count())
            .ok()
            .and_then(|count| first.checked_add(count))
            .unwrap_or_else(|| panic!("card ids exhausted after {}", first));
        first
    }

    fn reset_with(&mut self, deck: Deck) {
        let was_processing = self.state.is_processing();
        let was_complete = self.state.is_game_complete;

        self.state.deck = deck;
        self.state.pending_first = None;
        self.state.pending_second = None;
        self.state.phase = TurnPhase::Idle;
        self.state.is_game_complete = false;
        self.emit(GameEvent::DeckChanged(self.state.deck.cards().clone()));

        self.set_score(0);
        self.set_moves(0);
        self.set_matched_pairs(0);
        self.set_combo(0);
        if was_processing {
            self.emit(GameEvent::ProcessingChanged(false));
        }
        if was_complete {
            self.emit(GameEvent::GameCompleted(false));
        }
        self.set_message(messages::START.to_string());

        info!(
            pairs = self.state.pair_count(),
            best = self.state.best_score,
            "new game dealt"
        );
    }

    // === Field setters ===

    fn set_score(&mut self, value: u32) {
        if self.state.score != value {
            self.state.score = value;
            self.emit(GameEvent::ScoreChanged(value));
        }
    }

    fn set_moves(&mut self, value: u32) {
        if self.state.moves != value {
            self.state.moves = value;
            self.emit(GameEvent::MovesChanged(value));
        }
    }

    fn set_matched_pairs(&mut self, value: u32) {
        if self.state.matched_pairs != value {
            self.state.matched_pairs = value;
            self.emit(GameEvent::MatchedPairsChanged(value));
        }
    }

    fn set_combo(&mut self, value: u32) {
        if self.state.combo != value {
            self.state.combo = value;
            self.emit(GameEvent::ComboChanged(value));
        }
    }

    fn set_best_score(&mut self, value: u32) {
        if self.state.best_score != value {
            self.state.best_score = value;
            self.emit(GameEvent::BestScoreChanged(value));
        }
    }

    fn set_message(&mut self, value: String) {
        if self.state.message != value {
            self.state.message = value.clone();
            self.emit(GameEvent::MessageChanged(value));
        }
    }

    // === Event dispatch ===

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
        self.outbox.push(event);
    }

    fn flush(&mut self) -> EventBatch {
        std::mem::take(&mut self.outbox)
    }
}
