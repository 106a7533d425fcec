//! Commands sent from the input/render collaborator to the game core.
//!
//! Commands are queued and applied at the next tick boundary, keeping the
//! per-tick update order deterministic.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// All inbound actions the collaborator may issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Player movement ---
    /// Displace the player by a candidate ground-plane step; rejected if
    /// the destination fails the wall check.
    MovePlayer { dx: f64, dz: f64 },
    /// Force the player to a position (no wall check).
    SetPlayerPosition { position: Position },
    /// Move the player to a random respawn point.
    RespawnPlayer,

    // --- Enemy control ---
    /// Force the enemy to a position.
    SetEnemyPosition { position: Position },
    /// Send the enemy to a random patrol waypoint and reset it to Patrol.
    TeleportEnemy,

    // --- Session control ---
    /// Restore the whole session to its initial state.
    Reset,
}
