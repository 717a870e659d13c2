//! ECS systems that operate on the arena world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; round and score state is passed in by the engine.

pub mod ammo;
pub mod cleanup;
pub mod combat;
pub mod input;
pub mod lifetime;
pub mod movement;
pub mod round;
pub mod snapshot;
