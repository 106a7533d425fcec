//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods; game logic lives in
//! the engine and its systems.

use serde::{Deserialize, Serialize};

/// Marks the player entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// A dream fragment pickup. Collected fragments are despawned, so the
/// presence of this component means the fragment is still in play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fragment {
    pub id: u32,
}

/// Marks the exit portal entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Portal;
