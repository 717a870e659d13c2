//! Tile map for the arena: solid tiles, spawn points, and movement
//! resolution against walls and the arena bounds.

pub mod grid;
pub mod loader;

pub use grid::{ArenaMap, SpawnPoint};
pub use loader::MapError;
