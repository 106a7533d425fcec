//! Fragment pickup system.
//!
//! Fragments within pickup range are despawned (one-shot by
//! construction), registered on the game state, and credited through the
//! scoring system with bonuses applied.

use hecs::World;
use tracing::debug;

use reverie_core::components::Fragment;
use reverie_core::constants::FRAGMENT_VALUE;
use reverie_core::enums::ScoreReason;
use reverie_core::events::RenderEffect;
use reverie_core::state::GameState;
use reverie_core::types::Position;

use reverie_maze::collision;

use crate::scoring::ScoringSystem;

/// Check every fragment still in play against the player position.
pub fn run(
    world: &mut World,
    state: &mut GameState,
    scoring: &mut ScoringSystem,
    player_position: &Position,
    now_ms: u64,
    despawn_buffer: &mut Vec<hecs::Entity>,
    effects: &mut Vec<RenderEffect>,
) {
    despawn_buffer.clear();
    let mut collected = Vec::new();

    for (entity, (fragment, position)) in world.query_mut::<(&Fragment, &Position)>() {
        if collision::fragment_reached(player_position, position) {
            despawn_buffer.push(entity);
            collected.push(fragment.id);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    collected.sort_unstable();
    for id in collected {
        debug!(fragment = id, "fragment collected");
        state.collect_fragment();
        scoring.add_score(state, FRAGMENT_VALUE, ScoreReason::DreamFragment, true, now_ms);
        effects.push(RenderEffect::FragmentDissolve { fragment_id: id });
    }
}
