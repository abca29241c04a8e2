//! Explicit schedules polled from the animation-frame timestamp.
//!
//! Everything runs off `performance.now()` values handed in by the frame loop, the
//! same way a beat clock counts whole beats: when frames arrive late, every period
//! that elapsed is reported so no tick is lost.

/// Fixed-period repeating schedule. Inactive until [`Interval::start`].
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    period_ms: f64,
    next_due_ms: Option<f64>,
}

impl Interval {
    pub fn new(period_ms: f64) -> Self {
        Self { period_ms: period_ms.max(1.0), next_due_ms: None }
    }

    /// (Re)start counting from `now`; the first tick lands one period later.
    pub fn start(&mut self, now: f64) {
        self.next_due_ms = Some(now + self.period_ms);
    }

    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Number of whole periods that elapsed up to `now`, consuming them.
    pub fn due(&mut self, now: f64) -> u32 {
        let Some(mut next) = self.next_due_ms else { return 0 };
        let mut count = 0;
        while next <= now {
            count += 1;
            next += self.period_ms;
        }
        self.next_due_ms = Some(next);
        count
    }
}

/// One-shot schedule.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timeout {
    fire_at_ms: Option<f64>,
}

impl Timeout {
    pub fn arm(&mut self, now: f64, delay_ms: f64) {
        self.fire_at_ms = Some(now + delay_ms);
    }

    pub fn cancel(&mut self) {
        self.fire_at_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.fire_at_ms.is_some()
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn fired(&mut self, now: f64) -> bool {
        match self.fire_at_ms {
            Some(at) if now >= at => {
                self.fire_at_ms = None;
                true
            }
            _ => false,
        }
    }
}
