//! Round and score data model.
//!
//! Stored in `ArenaEngine`, not as ECS entities: the world is cleared on
//! every restart but these survive it.

use arena_core::constants::{COUNTDOWN_STEPS, COUNTDOWN_STEP_TICKS, MAX_PLAYERS};
use arena_core::enums::{PlayerSlot, RoundPhase};
use arena_core::state::{RoundView, ScoreEntry};

/// Progress of the current round.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundState {
    /// 1-based; 0 before the first round starts.
    pub number: u32,
    pub phase: RoundPhase,
    /// Countdown steps left before the next round.
    pub countdown: u32,
    /// Tick at which the countdown next decrements.
    pub next_step_tick: u64,
}

impl RoundState {
    /// Move on to a fresh round.
    pub fn begin_next(&mut self) {
        self.number += 1;
        self.phase = RoundPhase::Playing;
        self.countdown = 0;
        self.next_step_tick = 0;
    }

    pub fn begin_countdown(&mut self, now: u64) {
        self.phase = RoundPhase::Countdown;
        self.countdown = COUNTDOWN_STEPS;
        self.next_step_tick = now + COUNTDOWN_STEP_TICKS;
    }

    /// Decrement the countdown when a step has elapsed.
    /// Returns the new remaining count if it changed this tick.
    pub fn step_countdown(&mut self, now: u64) -> Option<u32> {
        if self.phase != RoundPhase::Countdown || now < self.next_step_tick {
            return None;
        }
        self.countdown = self.countdown.saturating_sub(1);
        self.next_step_tick += COUNTDOWN_STEP_TICKS;
        Some(self.countdown)
    }

    pub fn view(&self) -> RoundView {
        RoundView {
            number: self.number,
            phase: self.phase,
            countdown: self.countdown,
        }
    }
}

/// Cumulative wins per slot for the whole session.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    scores: [u32; MAX_PLAYERS],
}

impl ScoreTable {
    /// Credit one round win. Unknown slots are ignored.
    pub fn credit(&mut self, slot: PlayerSlot) {
        if let Some(score) = self.scores.get_mut(slot.index()) {
            *score += 1;
        }
    }

    pub fn get(&self, slot: PlayerSlot) -> u32 {
        self.scores.get(slot.index()).copied().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.scores = [0; MAX_PLAYERS];
    }

    /// Scoreboard rows for every slot, in slot order.
    pub fn entries(&self) -> Vec<ScoreEntry> {
        PlayerSlot::all()
            .map(|slot| ScoreEntry {
                slot,
                name: slot.name().to_string(),
                score: self.get(slot),
            })
            .collect()
    }
}
