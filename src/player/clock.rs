use std::time::{Duration, Instant};

/// Time source for auto-advance deadlines.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A scheduled "track finished" event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAdvance {
    pub scheduled_at: Instant,
    /// Remaining track time when it was scheduled.
    pub delay: Duration,
}

impl AutoAdvance {
    pub fn new(scheduled_at: Instant, delay: Duration) -> Self {
        Self {
            scheduled_at,
            delay,
        }
    }

    pub fn due_at(&self) -> Instant {
        self.scheduled_at + self.delay
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due_at()
    }
}
