//! Lifecycle events, score records, render effects, and the event bus.
//!
//! `GameState` fires a `GameEvent` after every mutation; a presentation
//! layer subscribes per `EventKind` for HUD and end-screen updates.
//! Listeners run synchronously, in registration order.

use serde::{Deserialize, Serialize};

use crate::enums::{LoseReason, ScoreReason};

/// An immutable record of one score change, appended to the scoring history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// Points actually credited (negative for penalties).
    pub points: i64,
    /// Points before multiplier and bonuses (negative for penalties).
    pub base_points: i64,
    pub reason: ScoreReason,
    /// Bonuses folded into `points`.
    pub bonus_details: Vec<BonusDetail>,
    /// Milliseconds on the scoring clock when the event occurred.
    pub timestamp_ms: u64,
    /// Multiplier in force at the time.
    pub multiplier: f64,
    /// Combo count at the time of the event.
    pub combo: u32,
}

/// A bonus folded into a score event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BonusDetail {
    /// Quick follow-up pickup.
    Speed { points: i64 },
    /// Sustained pickup streak.
    Combo { combo: u32, points: i64 },
}

/// Events published by `GameState` after each mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The running score changed (any reason, either direction).
    ScoreChanged {
        new_score: i64,
        points: i64,
        reason: ScoreReason,
    },
    /// The scoring system credited points (with full bonus detail).
    ScoreAdded { event: ScoreEvent },
    /// The scoring system charged a penalty.
    ScoreSubtracted { event: ScoreEvent },
    /// A fragment was picked up.
    FragmentCollected { collected: u32, total: u32 },
    /// The last fragment was picked up — the exit portal is unlocked.
    AllFragmentsCollected,
    /// The countdown advanced.
    TimeUpdated { time_left: f64 },
    /// The countdown reached zero.
    TimeUp,
    /// The enemy caught the player.
    PlayerDied { reason: LoseReason },
    /// The player escaped through the portal.
    GameWon { time_bonus: i64 },
    /// The run ended in a loss.
    GameLost { reason: LoseReason },
    /// State was restored to initial values.
    GameReset,
    /// The player respawned after a capture.
    PlayerRespawned,
}

/// Fieldless mirror of `GameEvent` used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ScoreChanged,
    ScoreAdded,
    ScoreSubtracted,
    FragmentCollected,
    AllFragmentsCollected,
    TimeUpdated,
    TimeUp,
    PlayerDied,
    GameWon,
    GameLost,
    GameReset,
    PlayerRespawned,
}

impl GameEvent {
    /// The subscription key this event is dispatched under.
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::ScoreChanged { .. } => EventKind::ScoreChanged,
            GameEvent::ScoreAdded { .. } => EventKind::ScoreAdded,
            GameEvent::ScoreSubtracted { .. } => EventKind::ScoreSubtracted,
            GameEvent::FragmentCollected { .. } => EventKind::FragmentCollected,
            GameEvent::AllFragmentsCollected => EventKind::AllFragmentsCollected,
            GameEvent::TimeUpdated { .. } => EventKind::TimeUpdated,
            GameEvent::TimeUp => EventKind::TimeUp,
            GameEvent::PlayerDied { .. } => EventKind::PlayerDied,
            GameEvent::GameWon { .. } => EventKind::GameWon,
            GameEvent::GameLost { .. } => EventKind::GameLost,
            GameEvent::GameReset => EventKind::GameReset,
            GameEvent::PlayerRespawned => EventKind::PlayerRespawned,
        }
    }
}

/// Fire-and-forget instructions to the render collaborator.
///
/// Drained into each snapshot; they carry no feedback into game logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderEffect {
    /// Flash the enemy model briefly (capture strike).
    EnemyFlash { duration_ms: u64 },
    /// Dissolve a collected fragment's visuals and release its resources.
    FragmentDissolve { fragment_id: u32 },
    /// Release all visual resources owned by the scene (reset/teardown).
    DisposeScene,
}

/// Handle returned by `EventBus::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GameEvent) + Send>;

/// Named-event publish/subscribe registry.
///
/// Listeners for a kind are invoked synchronously in registration order.
/// The same closure shape may be registered any number of times; each
/// registration gets its own id and `unsubscribe` removes the first match.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(EventKind, SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind. Returns its subscription id.
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((kind, id, Box::new(listener)));
        id
    }

    /// Remove the first listener registered under `kind` with `id`.
    /// Unknown ids are ignored.
    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) {
        if let Some(idx) = self
            .listeners
            .iter()
            .position(|(k, i, _)| *k == kind && *i == id)
        {
            self.listeners.remove(idx);
        }
    }

    /// Invoke every listener registered for the event's kind, in
    /// registration order. No listeners is a no-op.
    pub fn emit(&mut self, event: &GameEvent) {
        let kind = event.kind();
        for (k, _, listener) in self.listeners.iter_mut() {
            if *k == kind {
                listener(event);
            }
        }
    }

    /// Number of listeners currently registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|(k, _, _)| *k == kind).count()
    }

    /// Drop every registered listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
