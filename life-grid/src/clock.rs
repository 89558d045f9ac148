use std::time::{Duration, Instant};

/// Decides when the next generation is due. A zero interval makes every
/// frame due. The timer restarts from the moment a step actually runs, so a
/// slow frame pushes all later steps back.
#[derive(Clone, Copy, Debug)]
pub struct StepClock {
    interval: Duration,
    last_step: Instant,
}

impl StepClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_step: now,
        }
    }

    pub fn last_step(&self) -> Instant {
        self.last_step
    }

    pub fn is_step_due(&self, now: Instant) -> bool {
        self.interval.is_zero() || now.saturating_duration_since(self.last_step) >= self.interval
    }

    pub fn record_step(&mut self, now: Instant) {
        self.last_step = now;
    }

    pub fn try_step(&mut self, now: Instant) -> bool {
        let due = self.is_step_due(now);
        if due {
            self.record_step(now);
        }
        due
    }
}
