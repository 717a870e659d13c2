//! Fixed keyboard bindings and the per-slot input state derived from them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::enums::{Facing, KeyCode, PlayerSlot};

/// The five keys bound to one player slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlScheme {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub fire: KeyCode,
}

/// Bindings per slot. Not configurable at runtime.
pub const CONTROL_SCHEMES: [ControlScheme; 4] = [
    ControlScheme {
        up: KeyCode::ArrowUp,
        down: KeyCode::ArrowDown,
        left: KeyCode::ArrowLeft,
        right: KeyCode::ArrowRight,
        fire: KeyCode::Shift,
    },
    ControlScheme {
        up: KeyCode::W,
        down: KeyCode::S,
        left: KeyCode::A,
        right: KeyCode::D,
        fire: KeyCode::Tab,
    },
    ControlScheme {
        up: KeyCode::I,
        down: KeyCode::K,
        left: KeyCode::J,
        right: KeyCode::L,
        fire: KeyCode::O,
    },
    ControlScheme {
        up: KeyCode::T,
        down: KeyCode::G,
        left: KeyCode::F,
        right: KeyCode::H,
        fire: KeyCode::Space,
    },
];

impl ControlScheme {
    /// Scheme bound to `slot`, if the slot exists.
    pub fn for_slot(slot: PlayerSlot) -> Option<&'static ControlScheme> {
        CONTROL_SCHEMES.get(slot.index())
    }

    /// Poll the held keys for this scheme.
    pub fn read(&self, held: &HashSet<KeyCode>) -> InputState {
        InputState {
            up: held.contains(&self.up),
            down: held.contains(&self.down),
            left: held.contains(&self.left),
            right: held.contains(&self.right),
            fire: held.contains(&self.fire),
        }
    }
}

/// Key state of one player for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputState {
    /// The one direction this input moves in.
    /// Directions are mutually exclusive: left, then right, then down, then up.
    pub fn direction(&self) -> Option<Facing> {
        if self.left {
            Some(Facing::Left)
        } else if self.right {
            Some(Facing::Right)
        } else if self.down {
            Some(Facing::Down)
        } else if self.up {
            Some(Facing::Up)
        } else {
            None
        }
    }

    /// Input holding a single direction.
    pub fn moving(facing: Facing) -> Self {
        let mut input = Self::default();
        match facing {
            Facing::Up => input.up = true,
            Facing::Down => input.down = true,
            Facing::Left => input.left = true,
            Facing::Right => input.right = true,
        }
        input
    }

    pub fn with_fire(mut self) -> Self {
        self.fire = true;
        self
    }

    pub fn merge(self, other: InputState) -> InputState {
        InputState {
            up: self.up || other.up,
            down: self.down || other.down,
            left: self.left || other.left,
            right: self.right || other.right,
            fire: self.fire || other.fire,
        }
    }
}
