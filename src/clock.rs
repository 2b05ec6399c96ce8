//! Injectable time sources.
//!
//! Eviction scores are a continuous function of the current time, so the
//! cache never reads the system clock directly. Production code uses
//! [`SystemClock`]; tests use [`ManualClock`] to advance time explicitly
//! and make victim selection deterministic.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Source of "now" for score computation.
///
/// Timestamps are seconds as `f64`. The only requirement is that all values
/// come from the same monotonic-enough timeline; the absolute origin does
/// not matter because scoring only ever looks at differences.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> f64;
}

/// Wall-clock time source (seconds since the Unix epoch).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64()
    }
}

/// Hand-driven clock for deterministic tests.
///
/// # Example
///
/// ```
/// use dissonance_cache::{ManualClock, TimeSource};
///
/// let clock = ManualClock::new(0.0);
/// assert_eq!(clock.now(), 0.0);
///
/// clock.advance(1.5);
/// assert_eq!(clock.now(), 1.5);
///
/// clock.set(10.0);
/// assert_eq!(clock.now(), 10.0);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<f64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: f64) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: f64) {
        *self.now.lock() += secs;
    }

    /// Jump the clock to an absolute timestamp.
    pub fn set(&self, now: f64) {
        *self.now.lock() = now;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        *self.now.lock()
    }
}
