//! Enemy system — advances the AI agent and applies capture outcomes.
//!
//! A strike charges the capture penalty, routes the game state through
//! the loss path, and queues the flash effect for the render layer.

use reverie_core::constants::{CAPTURE_FLASH_MS, CAUGHT_PENALTY};
use reverie_core::enums::ScoreReason;
use reverie_core::events::RenderEffect;
use reverie_core::state::GameState;
use reverie_core::types::Position;

use reverie_ai::EnemyAgent;

use crate::scoring::ScoringSystem;

/// Run the enemy for one tick. No-op once the run is over.
pub fn run(
    agent: &mut EnemyAgent,
    state: &mut GameState,
    scoring: &mut ScoringSystem,
    player_position: &Position,
    dt: f64,
    now_ms: u64,
    effects: &mut Vec<RenderEffect>,
) {
    if !state.is_running() {
        return;
    }

    let tick = agent.update(dt, player_position, state.enemy_speed());
    if tick.struck {
        scoring.subtract_score(state, CAUGHT_PENALTY, ScoreReason::CaughtByEnemy, now_ms);
        state.player_caught_by_enemy();
        effects.push(RenderEffect::EnemyFlash {
            duration_ms: CAPTURE_FLASH_MS,
        });
    }
}
