//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{Facing, PlayerSlot};
use crate::types::Position;

/// Things that happened during a tick, drained into the next snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A round began with this many players on the field.
    RoundStarted { round: u32, players: u32 },
    ShotFired { slot: PlayerSlot, facing: Facing },
    PlayerEliminated {
        slot: PlayerSlot,
        by: PlayerSlot,
        position: Position,
    },
    AmmoSpawned { position: Position },
    AmmoCollected {
        slot: PlayerSlot,
        remaining_shots: u32,
    },
    /// `winner` is `None` when nobody survived.
    RoundEnded {
        round: u32,
        winner: Option<PlayerSlot>,
    },
    CountdownTick { remaining: u32 },
}
