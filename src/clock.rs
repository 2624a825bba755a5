//! Wall-clock source for session timestamps.

use std::cell::Cell;

use chrono::Utc;

/// Supplies the current time as epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// The system clock, via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    /// Create a clock reading `now` epoch milliseconds.
    #[must_use]
    pub fn new(now: i64) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Set the current reading.
    pub fn set(&self, now: i64) {
        self.now.set(now);
    }

    /// Move the reading forward by `millis`.
    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
