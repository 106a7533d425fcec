//! Headless demo: drives a scripted session against the game loop.
//!
//! Steers the player greedily toward the nearest fragment (then the
//! portal) by issuing movement commands, exactly the way a render/input
//! collaborator would, and prints the end-of-run breakdown.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;
use tracing_subscriber::EnvFilter;

use reverie_app::game_loop::spawn_game_loop;
use reverie_app::state::new_shared_snapshot;
use reverie_core::commands::PlayerCommand;
use reverie_core::enums::GameStatus;
use reverie_core::state::GameSnapshot;
use reverie_core::types::Position;
use reverie_sim::engine::SimConfig;

/// Player drive speed (units/sec).
const DRIVE_SPEED: f64 = 4.0;

/// How often the driver issues a steering command.
const STEP_INTERVAL: Duration = Duration::from_millis(50);

/// Give up after this much wall-clock time.
const DEMO_DEADLINE: Duration = Duration::from_secs(150);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let slot = new_shared_snapshot();
    let handle = spawn_game_loop(SimConfig::default(), Arc::clone(&slot));
    info!("steering the dreamer through the maze");

    let deadline = Instant::now() + DEMO_DEADLINE;
    let mut reported_fragments = 0;
    let mut last_position = Position::default();
    let mut stuck_steps = 0u32;

    let final_snapshot = loop {
        std::thread::sleep(STEP_INTERVAL);
        let Some(snapshot) = slot.lock().unwrap().clone() else {
            continue;
        };
        if snapshot.status != GameStatus::Playing || Instant::now() > deadline {
            break snapshot;
        }

        if snapshot.hud.fragments_collected != reported_fragments {
            reported_fragments = snapshot.hud.fragments_collected;
            info!(
                collected = reported_fragments,
                total = snapshot.hud.total_fragments,
                score = snapshot.hud.score,
                time_left = snapshot.hud.time_left,
                "fragment secured"
            );
        }

        // A blocked straight line shows up as a stalled position; sidestep
        // along the wall for a few steps before resuming the beeline.
        let player = snapshot.player_position;
        if player.distance_to(&last_position) < 0.01 {
            stuck_steps += 1;
        } else {
            stuck_steps = 0;
        }
        last_position = player;

        let target = nearest_target(&snapshot);
        if let Some(dir) = player.direction_to(&target) {
            let step = DRIVE_SPEED * STEP_INTERVAL.as_secs_f64();
            let (dx, dz) = if stuck_steps >= 3 {
                (-dir.z * step, dir.x * step)
            } else {
                (dir.x * step, dir.z * step)
            };
            handle.send(PlayerCommand::MovePlayer { dx, dz });
        }
    };

    handle.shutdown();
    report(&final_snapshot);
}

/// Nearest fragment still in play, or the portal once they're all taken.
fn nearest_target(snapshot: &GameSnapshot) -> Position {
    snapshot
        .fragments
        .iter()
        .map(|f| f.position)
        .min_by(|a, b| {
            snapshot
                .player_position
                .distance_to(a)
                .total_cmp(&snapshot.player_position.distance_to(b))
        })
        .unwrap_or(snapshot.portal.position)
}

fn report(snapshot: &GameSnapshot) {
    match snapshot.status {
        GameStatus::Won => info!("the dreamer escaped"),
        GameStatus::Lost | GameStatus::Caught => info!("the nightmare won"),
        GameStatus::Playing => info!("demo deadline reached mid-run"),
    }
    if let Some(final_score) = &snapshot.final_score {
        println!(
            "{}",
            serde_json::to_string_pretty(final_score).expect("final score serializes")
        );
    } else {
        println!(
            "score {} | fragments {}/{} | time left {:.0}s",
            snapshot.hud.score,
            snapshot.hud.fragments_collected,
            snapshot.hud.total_fragments,
            snapshot.hud.time_left
        );
    }
}
