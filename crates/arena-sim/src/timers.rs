//! Tick-based timers. All timers are evaluated inside the tick; nothing runs
//! concurrently with the systems.

/// A timer that fires every `interval_ticks`, starting one interval after it is armed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepeatingTimer {
    pub interval_ticks: u64,
    /// Tick at which the timer next fires. `None` while disarmed.
    pub next_at_tick: Option<u64>,
}

impl RepeatingTimer {
    pub fn new(interval_ticks: u64) -> Self {
        Self {
            interval_ticks,
            next_at_tick: None,
        }
    }

    /// (Re)start the timer so it first fires one interval after `now`.
    pub fn arm(&mut self, now: u64) {
        self.next_at_tick = Some(now + self.interval_ticks);
    }

    pub fn disarm(&mut self) {
        self.next_at_tick = None;
    }

    /// Returns true once per elapsed interval.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.next_at_tick {
            Some(at) if now >= at => {
                self.next_at_tick = Some(at + self.interval_ticks.max(1));
                true
            }
            _ => false,
        }
    }
}
