//! Arena state snapshot: everything a renderer needs to draw one tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete arena state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub round: RoundView,
    pub arena: ArenaView,
    pub players: Vec<PlayerView>,
    pub projectiles: Vec<ProjectileView>,
    pub crates: Vec<CrateView>,
    pub explosions: Vec<Position>,
    pub scoreboard: Vec<ScoreEntry>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RoundView {
    /// 1-based round number; 0 before the first round.
    pub number: u32,
    pub phase: RoundPhase,
    /// Remaining countdown steps (only meaningful in `Countdown`).
    pub countdown: u32,
}

/// Arena dimensions for the render surface.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ArenaView {
    pub width: f64,
    pub height: f64,
    pub tile_size: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub slot: PlayerSlot,
    pub name: String,
    /// "Name: shots" label drawn above the sprite.
    pub label: String,
    pub position: Position,
    pub facing: Facing,
    /// Sprite rotation (radians).
    pub rotation: f64,
    /// Eliminated players are reported but not drawn.
    pub alive: bool,
    pub remaining_shots: u32,
    pub can_shoot: bool,
    pub anim: AnimState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub owner: PlayerSlot,
    pub position: Position,
    pub rotation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrateView {
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub slot: PlayerSlot,
    pub name: String,
    pub score: u32,
}
