//! Cancellable debounce timer driven by caller-supplied time.
//!
//! The debouncer never reads the wall clock. Callers pass `now` into
//! [`Debouncer::schedule`] and [`Debouncer::poll`], so the event loop can
//! feed `Instant::now()` while tests advance a virtual clock.

use std::time::{Duration, Instant};

/// Delays a value until it has stayed unchanged for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending value and restart the timer.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Drop the pending value without emitting it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The value waiting to settle, if any.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// When the pending value will settle, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Emit the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn nothing_emitted_before_first_settle() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule(1, t0);
        assert_eq!(d.poll(t0), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(299)), None);
        assert_eq!(d.poll(t0 + DELAY), Some(1));
    }

    #[test]
    fn burst_collapses_to_last_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        for (i, value) in [1.0, 1.5, 2.0, 2.5].into_iter().enumerate() {
            let now = t0 + Duration::from_millis(100 * i as u64);
            d.schedule(value, now);
            assert_eq!(d.poll(now), None);
        }

        // Last schedule at 300ms, so it settles at 600ms.
        assert_eq!(d.poll(t0 + Duration::from_millis(599)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(600)), Some(2.5));
        assert_eq!(d.poll(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn cancel_suppresses_emission() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule("x", t0);
        d.cancel();
        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn deadline_tracks_latest_schedule() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        assert_eq!(d.deadline(), None);
        d.schedule(1, t0);
        d.schedule(2, t0 + Duration::from_millis(50));
        assert_eq!(d.deadline(), Some(t0 + Duration::from_millis(350)));
    }
}
