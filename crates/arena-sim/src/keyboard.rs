//! Held-key state shared by all slots.

use std::collections::HashSet;

use arena_core::constants::MAX_PLAYERS;
use arena_core::controls::{ControlScheme, InputState};
use arena_core::enums::{KeyCode, PlayerSlot};

/// Keys currently held, plus optional per-slot input injected by bots.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: HashSet<KeyCode>,
    overrides: [Option<InputState>; MAX_PLAYERS],
}

impl Keyboard {
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Set the injected input for a slot. Ignored for slots that do not exist.
    pub fn set_input(&mut self, slot: PlayerSlot, input: InputState) {
        if let Some(entry) = self.overrides.get_mut(slot.index()) {
            *entry = Some(input);
        }
    }

    pub fn clear(&mut self) {
        self.held.clear();
        self.overrides = Default::default();
    }

    /// Poll the bindings of `slot`, combined with any injected input.
    pub fn input_for(&self, slot: PlayerSlot) -> InputState {
        let keys = ControlScheme::for_slot(slot)
            .map(|scheme| scheme.read(&self.held))
            .unwrap_or_default();
        match self.overrides.get(slot.index()).copied().flatten() {
            Some(injected) => keys.merge(injected),
            None => keys,
        }
    }
}
