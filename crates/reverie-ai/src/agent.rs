//! The enemy agent: owned state plus decision application.
//!
//! The agent owns its position, mode, patrol progress, and strike
//! cooldown. Each tick it feeds its perception through the FSM and
//! applies the decision: movement clamped to the maze bounding box,
//! waypoint cycling, cooldown bookkeeping, and the capture strike.
//! The outside world reads position/mode or issues set-position,
//! teleport, and reset commands.

use rand::Rng;
use tracing::{debug, info};

use reverie_core::constants::{
    ENEMY_ARRIVE_DISTANCE, ENEMY_ATTACK_COOLDOWN_SECS, ENEMY_BASE_SPEED, MAZE_MOVE_BOUND,
};
use reverie_core::enums::AiMode;
use reverie_core::types::Position;
use reverie_maze::layout::{ENEMY_SPAWN, PATROL_WAYPOINTS};

use crate::fsm::{evaluate, EnemyContext};

/// What happened during one agent tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyTick {
    /// The agent struck the player this tick.
    pub struck: bool,
}

/// The maze-chase enemy.
#[derive(Debug)]
pub struct EnemyAgent {
    position: Position,
    mode: AiMode,
    last_seen: Option<Position>,
    patrol_index: usize,
    attack_cooldown: f64,
    speed: f64,
}

impl Default for EnemyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyAgent {
    pub fn new() -> Self {
        Self {
            position: ENEMY_SPAWN,
            mode: AiMode::Patrol,
            last_seen: None,
            patrol_index: 0,
            attack_cooldown: 0.0,
            speed: ENEMY_BASE_SPEED,
        }
    }

    /// Advance the agent by one tick. `speed_multiplier` is the published
    /// game difficulty; movement speed ramps with it continuously.
    pub fn update(&mut self, dt: f64, player: &Position, speed_multiplier: f64) -> EnemyTick {
        self.speed = speed_multiplier * ENEMY_BASE_SPEED;
        let was_patrolling = self.mode == AiMode::Patrol;

        let ctx = EnemyContext {
            mode: self.mode,
            player_position: *player,
            distance_to_player: self.position.distance_to(player),
            last_seen: self.last_seen,
            patrol_target: PATROL_WAYPOINTS[self.patrol_index],
            attack_cooldown_secs: self.attack_cooldown,
        };
        let decision = evaluate(&ctx);

        if let Some(seen) = decision.refreshed_last_seen {
            self.last_seen = Some(seen);
        }

        if let Some(target) = decision.move_target {
            let arrived = self.move_towards(&target, dt);
            if was_patrolling && arrived {
                self.patrol_index = (self.patrol_index + 1) % PATROL_WAYPOINTS.len();
            }
        }

        if decision.mode_changed {
            debug!(from = ?self.mode, to = ?decision.new_mode, "enemy mode change");
        }
        self.mode = decision.new_mode;

        if decision.tick_cooldown {
            self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        }

        if decision.strike {
            self.attack_cooldown = ENEMY_ATTACK_COOLDOWN_SECS;
            info!("enemy caught the player");
            return EnemyTick { struck: true };
        }
        EnemyTick::default()
    }

    /// Step toward `target`, rejecting moves that leave the maze bounding
    /// box. Returns true when the target counts as reached (pre-move
    /// distance at most the arrive threshold).
    fn move_towards(&mut self, target: &Position, dt: f64) -> bool {
        let distance = self.position.distance_to(target);
        if distance > ENEMY_ARRIVE_DISTANCE {
            if let Some(dir) = self.position.direction_to(target) {
                let next = self.position.stepped(&dir, self.speed * dt);
                if next.x.abs() < MAZE_MOVE_BOUND && next.z.abs() < MAZE_MOVE_BOUND {
                    self.position = next;
                }
            }
        }
        distance <= ENEMY_ARRIVE_DISTANCE
    }

    // --- Capability surface ---

    pub fn mode(&self) -> AiMode {
        self.mode
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn last_seen(&self) -> Option<Position> {
        self.last_seen
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        self.position.distance_to(other)
    }

    /// Force the agent to a position, keeping its current mode.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Jump to a uniformly-random patrol waypoint and drop back to Patrol.
    pub fn teleport_to_random_waypoint<R: Rng>(&mut self, rng: &mut R) {
        let idx = rng.gen_range(0..PATROL_WAYPOINTS.len());
        self.position = PATROL_WAYPOINTS[idx];
        self.mode = AiMode::Patrol;
    }

    /// Restore the agent to its spawn state.
    pub fn reset(&mut self) {
        self.position = ENEMY_SPAWN;
        self.mode = AiMode::Patrol;
        self.last_seen = None;
        self.patrol_index = 0;
        self.attack_cooldown = 0.0;
        self.speed = ENEMY_BASE_SPEED;
    }
}
