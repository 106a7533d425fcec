//! REVERIE host application.
//!
//! Wires the headless engine to a dedicated game-loop thread and exposes
//! the command channel and latest-snapshot slot a render/UI collaborator
//! polls. The demo binary drives a scripted session against it.

pub mod game_loop;
pub mod state;

pub use reverie_core as core;
