//! Live game state and the snapshot views sent to the presentation layer.
//!
//! `GameState` is the single source of truth for a session. Every field is
//! private and every mutation goes through a method that clamps its inputs,
//! upholds the documented invariants, and then fires the corresponding
//! event on the bus. Other components hold `&mut GameState` and never write
//! fields directly.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{AiMode, GameStatus, Grade, LoseReason, ScoreReason};
use crate::events::{EventBus, EventKind, GameEvent, RenderEffect, ScoreEvent, SubscriptionId};
use crate::types::{Position, SimTime};

/// The authoritative session record.
#[derive(Debug)]
pub struct GameState {
    score: i64,
    time_left: f64,
    fragments_collected: u32,
    total_fragments: u32,
    game_running: bool,
    game_won: bool,
    game_lost: bool,
    player_caught: bool,
    player_respawn_time: f64,
    enemy_speed: f64,
    enemy_aggressiveness: f64,
    events: EventBus,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            time_left: START_TIME_SECS,
            fragments_collected: 0,
            total_fragments: TOTAL_FRAGMENTS,
            game_running: true,
            game_won: false,
            game_lost: false,
            player_caught: false,
            player_respawn_time: 0.0,
            enemy_speed: 1.0,
            enemy_aggressiveness: 1.0,
            events: EventBus::new(),
        }
    }

    // --- Score ---

    /// Credit points. Fires `ScoreChanged`.
    pub fn add_score(&mut self, points: i64, reason: ScoreReason) {
        self.score = (self.score + points).max(0);
        self.events.emit(&GameEvent::ScoreChanged {
            new_score: self.score,
            points,
            reason,
        });
    }

    /// Charge a penalty, clamped at a floor of zero. Fires `ScoreChanged`.
    pub fn subtract_score(&mut self, points: i64, reason: ScoreReason) {
        let penalty = points.abs();
        self.score = (self.score - penalty).max(0);
        self.events.emit(&GameEvent::ScoreChanged {
            new_score: self.score,
            points: -penalty,
            reason,
        });
    }

    // --- Fragments ---

    /// Register one fragment pickup, clamped at the fragment total.
    /// Fires `FragmentCollected`, then `AllFragmentsCollected` when the
    /// last fragment is taken.
    pub fn collect_fragment(&mut self) {
        if self.fragments_collected >= self.total_fragments {
            return;
        }
        self.fragments_collected += 1;
        self.events.emit(&GameEvent::FragmentCollected {
            collected: self.fragments_collected,
            total: self.total_fragments,
        });
        if self.fragments_collected >= self.total_fragments {
            self.events.emit(&GameEvent::AllFragmentsCollected);
        }
    }

    /// Whether the exit portal is unlocked.
    pub fn can_exit_level(&self) -> bool {
        self.fragments_collected >= self.total_fragments
    }

    // --- Timer & difficulty ---

    /// Advance the countdown. While the timer is under the ramp threshold
    /// the enemy speed/aggressiveness multipliers scale up linearly.
    /// Reaching zero triggers the time-up loss exactly once.
    pub fn update_time(&mut self, delta_secs: f64) {
        if !self.game_running {
            return;
        }
        self.time_left = (self.time_left - delta_secs).max(0.0);
        self.events.emit(&GameEvent::TimeUpdated {
            time_left: self.time_left,
        });

        if self.time_left <= RAMP_THRESHOLD_SECS {
            let ramp = (RAMP_THRESHOLD_SECS - self.time_left) / RAMP_THRESHOLD_SECS;
            self.enemy_speed = 1.0 + ramp * RAMP_SPEED_GAIN;
            self.enemy_aggressiveness = 1.0 + ramp * RAMP_AGGRESSION_GAIN;
        }

        if self.time_left <= 0.0 && !self.game_won {
            self.events.emit(&GameEvent::TimeUp);
            self.lose_game(LoseReason::TimeUp);
        }
    }

    // --- Capture & respawn ---

    /// The enemy caught the player. Fires `PlayerDied` and routes through
    /// the loss path. A no-op once the run is over.
    pub fn player_caught_by_enemy(&mut self) {
        if !self.game_running {
            return;
        }
        self.player_caught = true;
        self.events.emit(&GameEvent::PlayerDied {
            reason: LoseReason::Caught,
        });
        self.lose_game(LoseReason::Caught);
    }

    /// Arm the respawn countdown for a caught player.
    pub fn begin_respawn(&mut self, delay_secs: f64) {
        if self.player_caught {
            self.player_respawn_time = delay_secs.max(0.0);
        }
    }

    /// Count an armed respawn down; fires `PlayerRespawned` when it
    /// crosses zero while the player is still caught.
    pub fn update_player_respawn(&mut self, delta_secs: f64) {
        if self.player_caught && self.player_respawn_time > 0.0 {
            self.player_respawn_time -= delta_secs;
            if self.player_respawn_time <= 0.0 {
                self.player_respawn_time = 0.0;
                self.player_caught = false;
                self.events.emit(&GameEvent::PlayerRespawned);
            }
        }
    }

    // --- Terminal transitions ---

    /// Win the run. Freezes the countdown and reports the remaining-time
    /// bonus in the `GameWon` payload; the bonus is credited once, in the
    /// final-score breakdown. A no-op once the run is over.
    pub fn win_game(&mut self) {
        if !self.game_running {
            return;
        }
        self.game_won = true;
        self.game_running = false;
        let time_bonus = (self.time_left * TIME_BONUS_MULTIPLIER as f64).round() as i64;
        self.events.emit(&GameEvent::GameWon { time_bonus });
    }

    /// Lose the run. A no-op once the run is over.
    pub fn lose_game(&mut self, reason: LoseReason) {
        if !self.game_running {
            return;
        }
        self.game_lost = true;
        self.game_running = false;
        self.events.emit(&GameEvent::GameLost { reason });
    }

    /// Restore every field to its initial value and fire `GameReset`.
    /// Subscribers stay registered.
    pub fn reset(&mut self) {
        self.score = 0;
        self.time_left = START_TIME_SECS;
        self.fragments_collected = 0;
        self.game_running = true;
        self.game_won = false;
        self.game_lost = false;
        self.player_caught = false;
        self.player_respawn_time = 0.0;
        self.enemy_speed = 1.0;
        self.enemy_aggressiveness = 1.0;
        self.events.emit(&GameEvent::GameReset);
    }

    // --- Queries ---

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn time_left(&self) -> f64 {
        self.time_left
    }

    pub fn fragments_collected(&self) -> u32 {
        self.fragments_collected
    }

    pub fn total_fragments(&self) -> u32 {
        self.total_fragments
    }

    pub fn is_running(&self) -> bool {
        self.game_running
    }

    pub fn is_won(&self) -> bool {
        self.game_won
    }

    pub fn is_lost(&self) -> bool {
        self.game_lost
    }

    pub fn is_player_caught(&self) -> bool {
        self.player_caught
    }

    pub fn player_respawn_time(&self) -> f64 {
        self.player_respawn_time
    }

    pub fn enemy_speed(&self) -> f64 {
        self.enemy_speed
    }

    pub fn enemy_aggressiveness(&self) -> f64 {
        self.enemy_aggressiveness
    }

    pub fn status(&self) -> GameStatus {
        if self.game_won {
            GameStatus::Won
        } else if self.game_lost {
            GameStatus::Lost
        } else if self.player_caught {
            GameStatus::Caught
        } else {
            GameStatus::Playing
        }
    }

    /// Fragment and time completion percentages for progress displays.
    pub fn progress(&self) -> ProgressView {
        ProgressView {
            fragments_pct: self.fragments_collected as f64 / self.total_fragments as f64 * 100.0,
            time_pct: self.time_left / START_TIME_SECS * 100.0,
        }
    }

    // --- Event bus ---

    /// Register a listener for one event kind (invocation in registration
    /// order). Duplicate registrations are allowed.
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.events.subscribe(kind, listener)
    }

    /// Remove the first listener registered under `kind` with `id`.
    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) {
        self.events.unsubscribe(kind, id);
    }

    /// Publish an event to subscribers. No subscribers is a no-op.
    pub fn trigger_event(&mut self, event: &GameEvent) {
        self.events.emit(event);
    }

    /// Drop every registered listener. Scene teardown calls this before a
    /// new presentation layer subscribes, so stale callbacks never fire
    /// into a disposed scene.
    pub fn clear_listeners(&mut self) {
        self.events.clear();
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.events.listener_count(kind)
    }
}

// --- Snapshot views ---

/// Complete per-tick view of the session for the render/UI collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub status: GameStatus,
    pub hud: HudView,
    pub player_position: Position,
    pub enemy: EnemyView,
    /// Fragments still in play.
    pub fragments: Vec<FragmentView>,
    pub portal: PortalView,
    pub progress: ProgressView,
    /// Fire-and-forget effects accumulated this tick.
    pub effects: Vec<RenderEffect>,
    /// Populated once the run is over.
    pub final_score: Option<FinalScoreView>,
}

/// HUD numbers refreshed every tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: i64,
    pub fragments_collected: u32,
    pub total_fragments: u32,
    pub time_left: f64,
}

/// Enemy agent state exposed for display and debugging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub mode: AiMode,
    pub distance_to_player: f64,
}

/// A fragment still in play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentView {
    pub id: u32,
    pub position: Position,
}

/// Exit portal state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalView {
    pub position: Position,
    /// True once all fragments are collected.
    pub active: bool,
}

/// Completion percentages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressView {
    pub fragments_pct: f64,
    pub time_pct: f64,
}

/// End-of-run score breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinalScoreView {
    pub final_score: i64,
    pub base_score: i64,
    pub time_bonus: i64,
    pub perfect_run_bonus: i64,
    pub fragments_collected: u32,
    pub times_caught: u32,
}

/// Full post-run statistics for the end screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedStats {
    pub breakdown: FinalScoreView,
    pub grade: Grade,
    pub grade_description: String,
    /// Mean interval between fragment pickups, seconds.
    pub average_fragment_secs: f64,
    /// Shortest interval between fragment pickups, seconds. None until a
    /// second fragment has been collected.
    pub fastest_fragment_secs: Option<f64>,
    pub max_combo: u32,
    pub total_score_events: usize,
    /// Fragments collected as a percentage of the total.
    pub efficiency_pct: f64,
}

/// Exportable record of a whole run: history, aggregates, end state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub history: Vec<ScoreEvent>,
    pub fragments_collected: u32,
    pub times_caught: u32,
    pub perfect_run: bool,
    pub final_score: i64,
    pub time_left: f64,
    pub game_won: bool,
}
