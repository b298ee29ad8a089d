// src/sync/stop.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How often a sleeping worker re-checks its stop flag.
pub const STOP_CHECK_INTERVAL: Duration = Duration::from_millis(50);

/// A level-triggered cooperative cancellation flag.
///
/// `stop()` sets the flag once and forever; it stays observable for any
/// number of later checks, so a worker can notice it both at the top of
/// its loop and in the middle of a delay. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    flag: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop. Idempotent: calling it again, or before the
    /// worker has even started, is harmless.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Sleeps for `total`, decomposed into short slices so that a stop
    /// request takes effect within roughly one slice instead of the full
    /// delay. Returns early as soon as the flag is observed set.
    pub fn interruptible_sleep(&self, total: Duration) {
        let mut remaining = total;
        while !remaining.is_zero() && !self.is_stopped() {
            let slice = remaining.min(STOP_CHECK_INTERVAL);
            thread::sleep(slice);
            remaining -= slice;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn starts_unset_and_stays_set() {
        let token = StopToken::new();
        assert!(!token.is_stopped());

        token.stop();
        assert!(token.is_stopped());
        // Level-triggered: still set on every later check.
        token.stop();
        assert!(token.is_stopped());
    }

    #[test]
    fn clones_share_the_flag() {
        let token = StopToken::new();
        let observer = token.clone();

        token.stop();
        assert!(observer.is_stopped());
    }

    #[test]
    fn sleep_is_cut_short_by_stop() {
        let token = StopToken::new();
        let sleeper = token.clone();

        let handle = std::thread::spawn(move || {
            let started = Instant::now();
            sleeper.interruptible_sleep(Duration::from_secs(10));
            started.elapsed()
        });

        std::thread::sleep(Duration::from_millis(100));
        token.stop();

        let slept = handle.join().unwrap();
        // Must wake within about one slice of the stop request, not
        // after the full ten seconds.
        assert!(slept < Duration::from_secs(1));
    }

    #[test]
    fn sleep_runs_to_completion_without_stop() {
        let token = StopToken::new();
        let started = Instant::now();
        token.interruptible_sleep(Duration::from_millis(120));
        assert!(started.elapsed() >= Duration::from_millis(120));
    }
}
