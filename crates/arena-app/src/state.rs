//! State shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use arena_core::commands::PlayerCommand;
use arena_core::state::ArenaSnapshot;

/// Messages sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A command to forward to the simulation engine.
    Command(PlayerCommand),
    /// Stop the game loop after the current tick.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each tick.
pub type SharedSnapshot = Arc<Mutex<Option<ArenaSnapshot>>>;

/// Handles held by whoever drives the game loop.
///
/// `mpsc::Sender` is wrapped in a `Mutex` so the state can be shared across
/// threads before the loop is started.
#[derive(Default)]
pub struct AppState {
    /// `None` until the game loop is running.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: SharedSnapshot,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a command to the running game loop. Returns false if no loop
    /// is running or it has already stopped.
    pub fn send(&self, command: PlayerCommand) -> bool {
        let Ok(guard) = self.command_tx.lock() else {
            return false;
        };
        match guard.as_ref() {
            Some(tx) => tx.send(GameLoopCommand::Command(command)).is_ok(),
            None => false,
        }
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<ArenaSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}
