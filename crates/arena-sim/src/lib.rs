//! Simulation engine for ARENA.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces ArenaSnapshots for whatever renders the match.

pub mod engine;
pub mod keyboard;
pub mod round;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use arena_core as core;
pub use engine::{ArenaEngine, SimConfig};

#[cfg(test)]
mod tests;
