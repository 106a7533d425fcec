//! Entity spawn factories for setting up the maze world.

use hecs::World;

use reverie_core::components::{Fragment, Player, Portal};
use reverie_core::types::Position;
use reverie_maze::layout::{FRAGMENT_POSITIONS, PLAYER_SPAWN, PORTAL_POSITION};

/// Set up the initial world: player, all fragments, and the exit portal.
pub fn setup_world(world: &mut World) -> hecs::Entity {
    spawn_fragments(world);
    spawn_portal(world);
    spawn_player(world)
}

/// Spawn the player at the spawn point.
pub fn spawn_player(world: &mut World) -> hecs::Entity {
    world.spawn((Player, PLAYER_SPAWN))
}

/// Spawn the full fragment set at the fixed placements.
pub fn spawn_fragments(world: &mut World) {
    for (id, position) in FRAGMENT_POSITIONS.iter().enumerate() {
        world.spawn((Fragment { id: id as u32 }, *position));
    }
}

/// Spawn the exit portal.
pub fn spawn_portal(world: &mut World) -> hecs::Entity {
    world.spawn((Portal, PORTAL_POSITION))
}

/// Read an entity's position, defaulting when it is missing.
pub fn entity_position(world: &World, entity: hecs::Entity) -> Position {
    world
        .get::<&Position>(entity)
        .map(|p| *p)
        .unwrap_or_default()
}
