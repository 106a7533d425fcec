//! Enumeration types used throughout the game core.

use serde::{Deserialize, Serialize};

/// Enemy behavior mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiMode {
    /// Walking the fixed waypoint route, unaware of the player.
    #[default]
    Patrol,
    /// Pursuing the player's live or last-seen position.
    Hunt,
    /// In striking distance, executing or cooling down from a strike.
    Attack,
}

/// Top-level session status, derived from the win/lose/caught flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Caught,
    Won,
    Lost,
}

/// Why a run was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoseReason {
    /// The countdown reached zero.
    TimeUp,
    /// The enemy caught the player.
    Caught,
}

/// What a score event was credited or charged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreReason {
    /// A dream fragment pickup — the only reason that earns combo and
    /// speed bonuses.
    DreamFragment,
    /// Remaining-time bonus at the win.
    TimeBonus,
    /// Caught by the enemy.
    CaughtByEnemy,
}

impl ScoreReason {
    /// Whether this reason denotes a capture penalty.
    pub fn is_capture(&self) -> bool {
        matches!(self, ScoreReason::CaughtByEnemy)
    }
}

/// Performance grade bands over the maximum possible score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Flavor text shown on the end screen.
    pub fn description(&self) -> &'static str {
        match self {
            Grade::S => "Perfect Nightmare Escape!",
            Grade::A => "Excellent Escape!",
            Grade::B => "Good Escape!",
            Grade::C => "Decent Escape!",
            Grade::D => "Barely Escaped!",
            Grade::F => "Poor Performance!",
        }
    }
}
