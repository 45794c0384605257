//! Wall-clock abstraction.
//!
//! Every time read in the engine goes through a [`Clock`] so tests can pin
//! "today" and the current hour.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::sync::{Arc, Mutex};

/// Source of the local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn hour(&self) -> u32 {
        self.now().hour()
    }
}

/// The system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A settable clock for tests and simulations.
///
/// Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Clock at `hour:00` on `date`.
    ///
    /// # Panics
    /// Panics if `hour` is not in `0..24`.
    pub fn at(date: NaiveDate, hour: u32) -> Self {
        assert!(hour < 24, "FixedClock::at: hour {hour} is out of range");
        Self::new(date.and_time(NaiveTime::MIN) + chrono::Duration::hours(i64::from(hour)))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
