//! Trailing-edge debounce timer.
//!
//! The caller drives time explicitly: [`Debouncer::schedule`] arms the timer,
//! [`Debouncer::poll`] fires it once the delay has passed, and
//! [`Debouncer::cancel`] drops whatever is pending. Re-scheduling before the
//! deadline replaces the pending value and pushes the deadline back, so only
//! the last value of a burst is delivered.

use std::time::{Duration, Instant};

/// Default delay between the last keystroke and a search run.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: Instant,
    value: T,
}

/// Holds at most one pending value and the instant it becomes due.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The configured delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer for `now + delay`, replacing any pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            deadline: now + self.delay,
            value,
        });
    }

    /// Drop the pending value, returning it if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Whether a value is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Fire the pending value if its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.cancel(),
            _ => None,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
