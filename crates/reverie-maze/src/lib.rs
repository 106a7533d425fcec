//! Maze geometry for REVERIE.
//!
//! The fixed wall layout, waypoint/fragment/spawn tables, and the pure
//! collision predicates used by player movement and the game loop.

pub use reverie_core as core;

pub mod collision;
pub mod layout;

pub use collision::{fragment_reached, portal_reached, position_walkable, within_attack_range};
