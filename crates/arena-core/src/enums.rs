//! Enumeration types used throughout the simulation.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_PLAYERS;

/// Direction a player is facing. Only the four cardinal directions exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Up,
    /// Sprites are drawn facing down, so new players start here.
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Sprite rotation (radians) for a player facing this way.
    pub fn rotation(self) -> f64 {
        match self {
            Facing::Left => FRAC_PI_2,
            Facing::Right => -FRAC_PI_2,
            Facing::Down => 0.0,
            Facing::Up => PI,
        }
    }

    /// Sprite rotation (radians) for a projectile travelling this way.
    pub fn projectile_rotation(self) -> f64 {
        match self {
            Facing::Up => 0.0,
            Facing::Down => PI,
            Facing::Left => -FRAC_PI_2,
            Facing::Right => FRAC_PI_2,
        }
    }

    /// Unit direction vector in arena space (+y is down).
    pub fn unit(self) -> (f64, f64) {
        match self {
            Facing::Up => (0.0, -1.0),
            Facing::Down => (0.0, 1.0),
            Facing::Left => (-1.0, 0.0),
            Facing::Right => (1.0, 0.0),
        }
    }

    /// Where a projectile appears relative to the shooter's centre.
    /// The small lateral offset lines the shot up with the rifle on the sprite.
    pub fn muzzle_offset(self) -> (f64, f64) {
        match self {
            Facing::Up => (5.0, -20.0),
            Facing::Down => (-5.0, 20.0),
            Facing::Left => (-20.0, -5.0),
            Facing::Right => (20.0, 5.0),
        }
    }
}

/// A player slot (0-based). Slots index the key bindings and the score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerSlot(pub u8);

impl PlayerSlot {
    /// All slots in score-table order.
    pub fn all() -> impl Iterator<Item = PlayerSlot> {
        (0..MAX_PLAYERS as u8).map(PlayerSlot)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Display name used on labels and the scoreboard.
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "Green",
            1 => "Red",
            2 => "Yellow",
            3 => "Blue",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keys that take part in a control scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Shift,
    W,
    A,
    S,
    D,
    Tab,
    I,
    J,
    K,
    L,
    O,
    T,
    F,
    G,
    H,
    Space,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No match running. Waiting for `StartMatch`.
    #[default]
    Lobby,
    Active,
    Paused,
}

/// Phase of the current round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Players are fighting.
    #[default]
    Playing,
    /// The round is decided; the next one starts when the countdown runs out.
    Countdown,
}

/// Presentation hint for renderers: which animation a player sprite shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Idle,
    Moving,
    Shooting,
}
