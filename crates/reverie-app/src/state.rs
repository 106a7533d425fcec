//! Shared state between the host and the game-loop thread.

use std::sync::{Arc, Mutex};

use reverie_core::commands::PlayerCommand;
use reverie_core::state::GameSnapshot;

/// Commands sent from the host to the game-loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Slot holding the most recent snapshot for synchronous polling.
pub type SharedSnapshot = Arc<Mutex<Option<GameSnapshot>>>;

/// Create an empty snapshot slot.
pub fn new_shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}
