//! Headless game engine for REVERIE.
//!
//! `GameEngine` owns the hecs world, the authoritative `GameState`, the
//! scoring system, and the enemy agent. It processes queued commands,
//! runs the per-tick systems in a fixed order, and produces
//! `GameSnapshot`s. No rendering dependency, enabling deterministic
//! testing.

pub mod engine;
pub mod scoring;
pub mod systems;
pub mod world_setup;

pub use reverie_core as core;

pub use engine::{GameEngine, SimConfig};
pub use scoring::ScoringSystem;
