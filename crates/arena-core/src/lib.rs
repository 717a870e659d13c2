//! Core types and definitions for the ARENA simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, key bindings, state snapshots, events, and constants.
//! It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod controls;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
