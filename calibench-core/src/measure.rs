//! Monotonic Timing
//!
//! Thin wrappers over `std::time::Instant`, which is monotonic on every
//! supported platform. Elapsed times are reported as `f64` seconds, the unit
//! the statistics engine works in.

use std::time::Duration;

/// Monotonic instant used to bracket benchmark invocations
#[derive(Debug, Clone, Copy)]
pub struct Instant {
    instant: std::time::Instant,
}

impl Instant {
    /// Capture current instant
    #[inline(always)]
    pub fn now() -> Self {
        Self {
            instant: std::time::Instant::now(),
        }
    }

    /// Time elapsed since this instant
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }

    /// Time between `earlier` and this instant, saturating at zero
    #[inline(always)]
    pub fn duration_since(&self, earlier: Instant) -> Duration {
        self.instant.saturating_duration_since(earlier.instant)
    }
}

/// Timer for a single benchmark invocation
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed seconds
    #[inline(always)]
    pub fn stop(&self) -> f64 {
        Instant::now().duration_since(self.start).as_secs_f64()
    }
}

/// Time one invocation of `f`, returning elapsed seconds and its result
#[inline(always)]
pub fn time_call<T>(f: impl FnOnce() -> T) -> (f64, T) {
    let timer = Timer::start();
    let out = f();
    (timer.stop(), out)
}
