//! Cooperative repeating timer.
//!
//! The frame loop owns no timer itself; it hands the current instant to
//! [`TickHandle::poll`], which reports whether a tick is due. Dropping the
//! handle cancels it.

use std::time::{Duration, Instant};

/// A scheduled repeating tick. Exists only while the game is running.
#[derive(Debug, Clone)]
pub struct TickHandle {
    interval: Duration,
    next_due: Instant,
    fired: u64,
}

impl TickHandle {
    /// Schedules the first tick one `interval` after `now`.
    #[must_use]
    pub fn schedule(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
            fired: 0,
        }
    }

    /// Returns true at most once per call when a tick is due.
    ///
    /// Intervals missed while the caller was stalled are dropped, not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }

        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        self.fired += 1;
        true
    }

    /// Time left until the next tick, zero when overdue.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks this handle has fired.
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickHandle;

    const INTERVAL: Duration = Duration::from_millis(150);

    #[test]
    fn first_tick_fires_after_one_interval() {
        let start = Instant::now();
        let mut handle = TickHandle::schedule(INTERVAL, start);

        assert!(!handle.poll(start));
        assert!(!handle.poll(start + Duration::from_millis(149)));
        assert!(handle.poll(start + INTERVAL));
        assert!(!handle.poll(start + INTERVAL));
        assert_eq!(handle.fired(), 1);
    }

    #[test]
    fn ticks_keep_a_fixed_cadence() {
        let start = Instant::now();
        let mut handle = TickHandle::schedule(INTERVAL, start);

        assert!(handle.poll(start + Duration::from_millis(160)));
        assert!(!handle.poll(start + Duration::from_millis(299)));
        assert!(handle.poll(start + Duration::from_millis(300)));
    }

    #[test]
    fn stall_drops_missed_ticks() {
        let start = Instant::now();
        let mut handle = TickHandle::schedule(INTERVAL, start);
        let late = start + Duration::from_millis(1000);

        assert!(handle.poll(late));
        assert!(!handle.poll(late));
        assert_eq!(handle.remaining(late), INTERVAL);
    }

    #[test]
    fn remaining_saturates_when_overdue() {
        let start = Instant::now();
        let handle = TickHandle::schedule(INTERVAL, start);

        assert_eq!(handle.remaining(start), INTERVAL);
        assert_eq!(handle.remaining(start + INTERVAL * 2), Duration::ZERO);
    }
}
