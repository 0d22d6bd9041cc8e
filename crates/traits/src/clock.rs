//! Clock trait so time-to-live logic can run against simulated time.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU32, Ordering};

/// A source of wall-clock seconds since the Unix epoch.
///
/// Stored timestamps are 32-bit to match the backing property store's
/// integer values.
pub trait Clock: Send + Sync + Debug {
    fn now_epoch(&self) -> u32;
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch(&self) -> u32 {
        chrono::Utc::now()
            .timestamp()
            .clamp(0, i64::from(u32::MAX)) as u32
    }
}

/// A settable clock for tests that simulate expiry windows.
#[derive(Debug, Default)]
pub struct ManualClock {
    epoch_secs: AtomicU32,
}

impl ManualClock {
    pub fn new(epoch_secs: u32) -> Self {
        Self {
            epoch_secs: AtomicU32::new(epoch_secs),
        }
    }

    pub fn set(&self, epoch_secs: u32) {
        self.epoch_secs.store(epoch_secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u32) {
        self.epoch_secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_epoch(&self) -> u32 {
        self.epoch_secs.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now_epoch(), 1_000);
        clock.advance(300);
        assert_eq!(clock.now_epoch(), 1_300);
        clock.set(5);
        assert_eq!(clock.now_epoch(), 5);
    }

    #[test]
    fn test_system_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_epoch() > 1_577_836_800);
    }
}
