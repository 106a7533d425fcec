//! Exit portal system.
//!
//! The portal only triggers once every fragment is collected; the win
//! itself goes through `win_game`, whose running guard makes it fire
//! exactly once.

use hecs::World;

use reverie_core::components::Portal;
use reverie_core::state::GameState;
use reverie_core::types::Position;

use reverie_maze::collision;

/// Check the player against the portal trigger.
pub fn run(world: &World, state: &mut GameState, player_position: &Position) {
    if !state.can_exit_level() {
        return;
    }
    for (_entity, (_portal, position)) in world.query::<(&Portal, &Position)>().iter() {
        if collision::portal_reached(player_position, position) {
            state.win_game();
        }
    }
}
