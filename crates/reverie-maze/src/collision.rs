//! Pure geometric predicates.
//!
//! Stateless checks shared by player movement, the pickup/portal systems,
//! and the enemy strike logic. No game-state dependency — positions in,
//! booleans out.

use glam::DVec2;

use reverie_core::constants::{
    ENEMY_ATTACK_RANGE, FRAGMENT_PICKUP_DISTANCE, MAZE_WALK_BOUND, PORTAL_REACH_DISTANCE,
    WALL_MARGIN,
};
use reverie_core::types::Position;

use crate::layout::INNER_WALLS;

/// Whether a candidate position is standable: inside the outer bound
/// (minus the wall margin) and clear of every interior wall's inflated
/// footprint.
pub fn position_walkable(position: &Position) -> bool {
    let limit = MAZE_WALK_BOUND - WALL_MARGIN;
    if position.x.abs() >= limit || position.z.abs() >= limit {
        return false;
    }

    let p = DVec2::new(position.x, position.z);
    for wall in &INNER_WALLS {
        let center = DVec2::new(wall.center_x, wall.center_z);
        let half = DVec2::new(wall.width, wall.depth) * 0.5 + DVec2::splat(WALL_MARGIN);
        let offset = (p - center).abs();
        if offset.x <= half.x && offset.y <= half.y {
            return false;
        }
    }
    true
}

/// Whether the player is close enough to pick up a fragment.
pub fn fragment_reached(player: &Position, fragment: &Position) -> bool {
    player.distance_to(fragment) < FRAGMENT_PICKUP_DISTANCE
}

/// Whether the player is standing on the exit portal trigger.
/// The fragment-count gate is the caller's responsibility.
pub fn portal_reached(player: &Position, portal: &Position) -> bool {
    player.distance_to(portal) < PORTAL_REACH_DISTANCE
}

/// Whether the enemy can strike the player from here.
pub fn within_attack_range(enemy: &Position, player: &Position) -> bool {
    enemy.distance_to(player) <= ENEMY_ATTACK_RANGE
}
