//! Snapshot system: builds the complete per-tick view for the render/UI
//! collaborator.
//!
//! This system is read-only — it never modifies the world or the state.

use hecs::World;

use reverie_core::components::{Fragment, Portal};
use reverie_core::events::RenderEffect;
use reverie_core::state::{EnemyView, FragmentView, GameSnapshot, GameState, HudView, PortalView};
use reverie_core::types::{Position, SimTime};

use reverie_ai::EnemyAgent;

use crate::scoring::ScoringSystem;

/// Build a `GameSnapshot` from the current world and state.
pub fn build_snapshot(
    world: &World,
    state: &GameState,
    scoring: &ScoringSystem,
    enemy: &EnemyAgent,
    time: &SimTime,
    effects: Vec<RenderEffect>,
    player_position: Position,
) -> GameSnapshot {
    GameSnapshot {
        time: *time,
        status: state.status(),
        hud: HudView {
            score: state.score(),
            fragments_collected: state.fragments_collected(),
            total_fragments: state.total_fragments(),
            time_left: state.time_left(),
        },
        player_position,
        enemy: EnemyView {
            position: enemy.position(),
            mode: enemy.mode(),
            distance_to_player: enemy.distance_to(&player_position),
        },
        fragments: build_fragments(world),
        portal: build_portal(world, state),
        progress: state.progress(),
        effects,
        final_score: if state.is_running() {
            None
        } else {
            Some(scoring.final_score(state))
        },
    }
}

/// Fragments still in play, in id order for stable output.
fn build_fragments(world: &World) -> Vec<FragmentView> {
    let mut fragments: Vec<FragmentView> = world
        .query::<(&Fragment, &Position)>()
        .iter()
        .map(|(_, (fragment, position))| FragmentView {
            id: fragment.id,
            position: *position,
        })
        .collect();
    fragments.sort_by_key(|f| f.id);
    fragments
}

fn build_portal(world: &World, state: &GameState) -> PortalView {
    world
        .query::<(&Portal, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, position))| PortalView {
            position: *position,
            active: state.can_exit_level(),
        })
        .unwrap_or_default()
}
