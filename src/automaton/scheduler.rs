//! Wall-clock gate between animation frames and logic ticks.

/// Fires at most once per call, never replays missed intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickScheduler {
    pub interval_ms: u64,
    pub last_tick_ms: u64,
}

impl TickScheduler {
    pub fn new(interval_ms: u64, start_ms: u64) -> Self {
        TickScheduler {
            interval_ms,
            last_tick_ms: start_ms,
        }
    }

    /// Returns true and records `now_ms` if a logic tick is due.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        // A clock running backwards counts as no time elapsed
        if now_ms.saturating_sub(self.last_tick_ms) >= self.interval_ms {
            self.last_tick_ms = now_ms;
            true
        } else {
            false
        }
    }
}
