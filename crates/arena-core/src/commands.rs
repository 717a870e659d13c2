//! Commands sent from an input source to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::controls::InputState;
use crate::enums::{KeyCode, PlayerSlot};

/// All possible external actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Keyboard ---
    /// A key went down. Held until the matching `KeyUp`.
    KeyDown { key: KeyCode },
    /// A key was released.
    KeyUp { key: KeyCode },
    /// Inject input for one slot (bots, replays). Combined with whatever
    /// keys of that slot are held; replaces the previous injected input.
    SetInput { slot: PlayerSlot, input: InputState },

    // --- Match control ---
    /// Start a match from the lobby.
    StartMatch,
    /// Abandon the match and clear the score table.
    ReturnToLobby,
    /// Pacing hint for real-time runners, clamped to `0.0..=MAX_TIME_SCALE`
    /// (1.0 = normal, 2.0 = double). Runners treat 0.0 as normal speed;
    /// use `Pause` to stop the clock.
    SetTimeScale { scale: f64 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
