//! Game loop thread — runs the engine at the fixed tick rate and
//! publishes snapshots.
//!
//! The engine is created inside the thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel; the latest snapshot is
//! stored in a shared slot for synchronous polling. Shutting down the
//! handle joins the thread, so no two loops can ever drive a session at
//! once.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::debug;

use reverie_core::commands::PlayerCommand;
use reverie_core::constants::TICK_RATE;
use reverie_sim::engine::{GameEngine, SimConfig};

use crate::state::{GameLoopCommand, SharedSnapshot};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Running game loop: command channel plus the thread handle.
pub struct GameLoopHandle {
    cmd_tx: mpsc::Sender<GameLoopCommand>,
    thread: JoinHandle<()>,
}

impl GameLoopHandle {
    /// Forward a player command to the engine.
    pub fn send(&self, command: PlayerCommand) {
        let _ = self.cmd_tx.send(GameLoopCommand::PlayerCommand(command));
    }

    /// Clone the raw command sender.
    pub fn commands(&self) -> mpsc::Sender<GameLoopCommand> {
        self.cmd_tx.clone()
    }

    /// Stop the loop and wait for the thread to exit. After this returns
    /// no further snapshots are published, so a new loop can be spawned
    /// safely.
    pub fn shutdown(self) {
        let _ = self.cmd_tx.send(GameLoopCommand::Shutdown);
        let _ = self.thread.join();
    }
}

/// Spawn the game loop in a new thread.
pub fn spawn_game_loop(config: SimConfig, latest_snapshot: SharedSnapshot) -> GameLoopHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("reverie-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })
        .expect("failed to spawn game loop thread");

    GameLoopHandle { cmd_tx, thread }
}

/// The game loop. Runs until a Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) {
    let mut engine = GameEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands.
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    debug!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (the engine handles terminal states
        //    internally) and publish the snapshot.
        let snapshot = engine.tick();
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 3. Sleep until the next tick boundary.
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid a catch-up spiral.
            next_tick_time = now;
        }
    }
}
