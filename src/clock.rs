use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running { interval: Duration, next_due: Instant },
    Stopped,
}

/// Periodic tick source for one game.
///
/// The clock never reads the system time itself: callers pass `now` in, so
/// a test can walk it forward tick by tick. Once stopped it stays stopped.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    state: ClockState,
}

impl SimulationClock {
    pub fn new() -> Self {
        SimulationClock { state: ClockState::Idle }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    pub fn interval(&self) -> Option<Duration> {
        match self.state {
            ClockState::Running { interval, .. } => Some(interval),
            _ => None,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            ClockState::Running { next_due, .. } => Some(next_due),
            _ => None,
        }
    }

    pub fn start(&mut self, interval: Duration, now: Instant) {
        if self.state != ClockState::Idle {
            tracing::warn!(state = ?self.state, "clock can only be started once");
            return;
        }

        tracing::debug!(interval_ms = interval.as_millis() as u64, "clock started");
        self.state = ClockState::Running { interval, next_due: now + interval };
    }

    /// Drops the pending deadline and starts firing every `interval` from `now`.
    pub fn reschedule(&mut self, interval: Duration, now: Instant) {
        if !self.is_running() {
            tracing::warn!(state = ?self.state, "reschedule ignored, clock not running");
            return;
        }

        tracing::debug!(interval_ms = interval.as_millis() as u64, "clock rescheduled");
        self.state = ClockState::Running { interval, next_due: now + interval };
    }

    pub fn stop(&mut self) {
        if self.state != ClockState::Stopped {
            tracing::debug!("clock stopped");
            self.state = ClockState::Stopped;
        }
    }

    /// Returns true when a tick is due at `now`, at most once per call.
    pub fn poll(&mut self, now: Instant) -> bool {
        let (interval, next_due) = match self.state {
            ClockState::Running { interval, next_due } => (interval, next_due),
            _ => return false,
        };

        if now < next_due {
            return false;
        }

        let mut following = next_due + interval;
        if following <= now {
            // Fell behind; skip the missed ticks instead of firing a burst.
            following = now + interval;
        }
        self.state = ClockState::Running { interval, next_due: following };
        true
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}
