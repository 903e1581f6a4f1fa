//! Field-level change events.
//!
//! The engine reports every state change as a `GameEvent` carrying the new
//! value. A presentation layer subscribes through `GameObserver` and never
//! mutates state itself.
//!
//! Events fire only when a value actually changes, with one exception:
//! `DeckChanged` fires on every deal, even if the new deck happens to look
//! like the old one.

use std::sync::{Arc, Mutex};

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;

/// A single observable state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh deck was dealt. Carries every card in display order.
    DeckChanged(Vector<Card>),
    /// One card's flip or match state changed.
    CardChanged(Card),
    ScoreChanged(u32),
    MovesChanged(u32),
    MatchedPairsChanged(u32),
    ComboChanged(u32),
    MessageChanged(String),
    BestScoreChanged(u32),
    /// A two-card turn started or finished evaluating.
    ProcessingChanged(bool),
    /// All pairs found (`true`), or a new game started after a win (`false`).
    GameCompleted(bool),
}

impl GameEvent {
    /// Short name of the changed field, for logging.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            GameEvent::DeckChanged(_) => "deck",
            GameEvent::CardChanged(_) => "card",
            GameEvent::ScoreChanged(_) => "score",
            GameEvent::MovesChanged(_) => "moves",
            GameEvent::MatchedPairsChanged(_) => "matched_pairs",
            GameEvent::ComboChanged(_) => "combo",
            GameEvent::MessageChanged(_) => "message",
            GameEvent::BestScoreChanged(_) => "best_score",
            GameEvent::ProcessingChanged(_) => "is_processing",
            GameEvent::GameCompleted(_) => "is_game_complete",
        }
    }
}

/// Events produced by a single command, in emission order.
///
/// Most commands emit fewer than 8 events, so this stays on the stack.
pub type EventBatch = SmallVec<[GameEvent; 8]>;

/// Receives state changes from the engine.
///
/// Called synchronously, after the change is applied, in emission order.
pub trait GameObserver: Send {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Observer that records events into a shared buffer.
///
/// Clone the log before registering it, then read from the clone.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<GameEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_records_in_order() {
        let log = EventLog::new();
        let mut observer = log.clone();

        observer.on_event(&GameEvent::ScoreChanged(100));
        observer.on_event(&GameEvent::ComboChanged(1));

        assert_eq!(log.len(), 2);
        assert_eq!(
            log.drain(),
            vec![GameEvent::ScoreChanged(100), GameEvent::ComboChanged(1)]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |e: &GameEvent| seen.push(e.field());
            observer.on_event(&GameEvent::MovesChanged(1));
            observer.on_event(&GameEvent::GameCompleted(true));
        }
        assert_eq!(seen, vec!["moves", "is_game_complete"]);
    }

    #[test]
    fn test_event_serde() {
        let event = GameEvent::MessageChanged("hi".to_string());
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
