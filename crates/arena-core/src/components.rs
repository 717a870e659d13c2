//! ECS components for hecs entities.
//!
//! Components are plain data structs.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::constants::INITIAL_AMMO;
use crate::enums::{AnimState, Facing, PlayerSlot};

/// A combatant controlled through one slot's key bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub slot: PlayerSlot,
    pub name: String,
    /// False once eliminated. Dead players stay in the world, hidden, until the round resets.
    pub alive: bool,
    pub remaining_shots: u32,
    /// Tick from which the player may fire again.
    pub cooldown_until_tick: u64,
    pub facing: Facing,
    pub anim: AnimState,
}

impl Player {
    pub fn new(slot: PlayerSlot) -> Self {
        Self {
            slot,
            name: slot.name().to_string(),
            alive: true,
            remaining_shots: INITIAL_AMMO,
            cooldown_until_tick: 0,
            facing: Facing::default(),
            anim: AnimState::default(),
        }
    }

    /// Whether the cooldown has elapsed at `tick`.
    pub fn can_shoot(&self, tick: u64) -> bool {
        tick >= self.cooldown_until_tick
    }

    /// Text shown above the player sprite.
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.remaining_shots)
    }
}

/// A shot in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Shooter. A projectile never hits its owner.
    pub owner: PlayerSlot,
    pub facing: Facing,
}

/// Ammunition pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmmoCrate {
    pub value: u32,
}

/// Short-lived visual left where a player was eliminated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion;

/// Despawn the entity once the simulation reaches this tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub expires_at_tick: u64,
}

/// Collision box half extents (px).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hitbox {
    pub half_width: f64,
    pub half_height: f64,
}

impl Hitbox {
    pub fn square(half: f64) -> Self {
        Self {
            half_width: half,
            half_height: half,
        }
    }
}

// Position and Velocity (types.rs) are also used as components.
