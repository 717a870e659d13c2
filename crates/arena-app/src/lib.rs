//! ARENA headless runner.
//!
//! Wires the simulation, the map loader and the bots together: reads process
//! configuration, runs the engine on a dedicated game-loop thread and hands
//! every snapshot to a sink.

pub mod bots;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod state;

pub use arena_core as core;
pub use error::{AppError, ConfigError};
