//! Enemy behavior finite state machine.
//!
//! Pure functions that compute mode transitions, pursuit targets, and
//! strike decisions from the agent's perception of the player.
//! No movement or world mutation here — plain data in, plain data out.

use reverie_core::constants::{
    ENEMY_ATTACK_BREAK_FACTOR, ENEMY_ATTACK_RANGE, ENEMY_VIEW_DISTANCE,
};
use reverie_core::enums::AiMode;
use reverie_core::types::Position;

/// Input to the FSM for a single tick.
pub struct EnemyContext {
    pub mode: AiMode,
    pub player_position: Position,
    pub distance_to_player: f64,
    /// Most recent player position the agent has perceived.
    pub last_seen: Option<Position>,
    /// Current waypoint of the patrol route.
    pub patrol_target: Position,
    pub attack_cooldown_secs: f64,
}

/// Output of the FSM for a single tick.
pub struct EnemyDecision {
    pub new_mode: AiMode,
    pub mode_changed: bool,
    /// Where to move this tick, if anywhere.
    pub move_target: Option<Position>,
    /// New value for the last-seen position; None keeps the current one.
    pub refreshed_last_seen: Option<Position>,
    /// The strike cooldown is running and should be decremented.
    pub tick_cooldown: bool,
    /// Execute the capture this tick.
    pub strike: bool,
}

impl EnemyDecision {
    fn stay(ctx: &EnemyContext) -> Self {
        Self {
            new_mode: ctx.mode,
            mode_changed: false,
            move_target: None,
            refreshed_last_seen: None,
            tick_cooldown: false,
            strike: false,
        }
    }
}

/// Whether the player is within perception range.
pub fn can_see_player(ctx: &EnemyContext) -> bool {
    ctx.distance_to_player <= ENEMY_VIEW_DISTANCE
}

/// Evaluate the FSM for one tick.
pub fn evaluate(ctx: &EnemyContext) -> EnemyDecision {
    match ctx.mode {
        AiMode::Patrol => evaluate_patrol(ctx),
        AiMode::Hunt => evaluate_hunt(ctx),
        AiMode::Attack => evaluate_attack(ctx),
    }
}

fn evaluate_patrol(ctx: &EnemyContext) -> EnemyDecision {
    let mut decision = EnemyDecision::stay(ctx);
    // Keep walking the route; the sighting check happens after the move,
    // so the agent still advances this tick even when it spots the player.
    decision.move_target = Some(ctx.patrol_target);

    if can_see_player(ctx) {
        decision.new_mode = AiMode::Hunt;
        decision.mode_changed = true;
        decision.refreshed_last_seen = Some(ctx.player_position);
    }
    decision
}

fn evaluate_hunt(ctx: &EnemyContext) -> EnemyDecision {
    let mut decision = EnemyDecision::stay(ctx);

    if ctx.distance_to_player <= ENEMY_ATTACK_RANGE {
        decision.new_mode = AiMode::Attack;
        decision.mode_changed = true;
        return decision;
    }

    if can_see_player(ctx) {
        decision.refreshed_last_seen = Some(ctx.player_position);
    }

    // Chase the freshest knowledge: live position while visible, the
    // last-seen position otherwise, live position if never seen.
    let target = if can_see_player(ctx) {
        ctx.player_position
    } else {
        ctx.last_seen.unwrap_or(ctx.player_position)
    };
    decision.move_target = Some(target);
    decision
}

fn evaluate_attack(ctx: &EnemyContext) -> EnemyDecision {
    let mut decision = EnemyDecision::stay(ctx);

    // Player broke away — resume the hunt.
    if ctx.distance_to_player > ENEMY_ATTACK_RANGE * ENEMY_ATTACK_BREAK_FACTOR {
        decision.new_mode = AiMode::Hunt;
        decision.mode_changed = true;
        return decision;
    }

    if ctx.attack_cooldown_secs > 0.0 {
        decision.tick_cooldown = true;
        return decision;
    }

    if ctx.distance_to_player <= ENEMY_ATTACK_RANGE {
        decision.strike = true;
    }
    decision
}
