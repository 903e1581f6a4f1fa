//! Async session driver.
//!
//! Runs a `MemoryGame` inside a tokio task so a presentation layer can send
//! commands and listen for changes without driving the clock itself:
//!
//! - Commands go in on an mpsc channel and are applied in arrival order.
//! - Every `GameEvent` goes out on a broadcast channel.
//! - Turn delays are real `tokio::time` sleeps.
//!
//! Flips that arrive while a turn is being evaluated reach the engine and
//! are dropped there, exactly as with direct calls. Nothing is queued.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::cards::CardId;
use crate::core::SessionError;
use crate::engine::{GameEvent, GameObserver, GameSnapshot, MemoryGame};

/// Default capacity of the command and event channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Commands accepted by the session task.
#[derive(Debug)]
pub enum SessionCommand {
    Initialize,
    Flip(CardId),
    Snapshot(oneshot::Sender<GameSnapshot>),
    Shutdown,
}

/// Forwards engine events to broadcast subscribers.
struct BroadcastObserver {
    tx: broadcast::Sender<GameEvent>,
}

impl GameObserver for BroadcastObserver {
    fn on_event(&mut self, event: &GameEvent) {
        // No subscribers is fine; events are fire-and-forget.
        let _ = self.tx.send(event.clone());
    }
}

/// Handle to a running session.
#[derive(Debug)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    events: broadcast::Sender<GameEvent>,
    task: JoinHandle<MemoryGame>,
}

impl SessionHandle {
    /// Start a session task on the current tokio runtime.
    pub fn spawn(game: MemoryGame) -> Self {
        Self::spawn_with_capacity(game, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Start a session with explicit channel capacities.
    pub fn spawn_with_capacity(mut game: MemoryGame, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel(capacity);
        let (event_tx, _) = broadcast::channel(capacity);

        game.subscribe(BroadcastObserver {
            tx: event_tx.clone(),
        });
        let task = tokio::spawn(run(game, cmd_rx));

        Self {
            commands: cmd_tx,
            events: event_tx,
            task,
        }
    }

    /// Receive every event emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Deal a new game.
    pub async fn initialize(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Initialize).await
    }

    /// Flip a card. Ignored by the engine if the flip is out of protocol.
    pub async fn flip(&self, id: CardId) -> Result<(), SessionError> {
        self.send(SessionCommand::Flip(id)).await
    }

    /// Capture the current state.
    pub async fn snapshot(&self) -> Result<GameSnapshot, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.send(SessionCommand::Snapshot(tx)).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Stop the task and take the game back.
    ///
    /// A turn still under evaluation stays pending in the returned game.
    pub async fn shutdown(self) -> Result<MemoryGame, SessionError> {
        // The task also stops if every sender is dropped, so a closed
        // channel here still ends in a clean join.
        let _ = self.commands.send(SessionCommand::Shutdown).await;
        drop(self.commands);
        let mut game = self.task.await?;
        game.clear_observers();
        Ok(game)
    }

    async fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }
}

async fn run(mut game: MemoryGame, mut commands: mpsc::Receiver<SessionCommand>) -> MemoryGame {
    let mut clock = Instant::now();

    loop {
        // Spend whole milliseconds of wall time on the engine clock.
        let elapsed = clock.elapsed().as_millis();
        if elapsed > 0 {
            let ms = u32::try_from(elapsed).unwrap_or(u32::MAX);
            game.tick(ms);
            clock += Duration::from_millis(u64::from(ms));
        }

        let remaining = game.time_until_next_phase();
        let evaluating = remaining.is_some();
        let deadline = remaining.map(|ms| clock + Duration::from_millis(ms));

        tokio::select! {
            command = commands.recv() => match command {
                Some(SessionCommand::Initialize) => {
                    game.initialize();
                }
                Some(SessionCommand::Flip(id)) => {
                    game.flip(id);
                }
                Some(SessionCommand::Snapshot(reply)) => {
                    let _ = reply.send(game.snapshot());
                }
                Some(SessionCommand::Shutdown) | None => {
                    debug!("session stopping");
                    break;
                }
            },
            _ = sleep_until(deadline), if deadline.is_some() => {}
        }

        if !evaluating || game.time_until_next_phase().is_none() {
            // Delays count from the command that started the evaluation,
            // never from time the game spent idle before it.
            clock = Instant::now();
        }
    }

    game
}

async fn sleep_until(deadline: Option<Instant>) {
    if let Some(deadline) = deadline {
        tokio::time::sleep_until(deadline).await;
    }
}
