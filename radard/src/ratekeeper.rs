//! Paces the cycle loop to a fixed period and reports cumulative lag.

use std::thread;
use std::time::Duration;

use radar_env::Clock;

/// Targets a fixed period per `monitor_time` call, sleeping out any slack
/// and reporting how far the loop is behind schedule.
///
/// Reads time through the `Clock` abstraction rather than `Instant`
/// directly, so the same pacing logic runs against the system clock in
/// production or a `VirtualClock` in tests, with no real sleeping.
pub struct RateKeeper {
    period: Duration,
    last_monitor: f64,
}

impl RateKeeper {
    pub fn new(period_secs: f64, clock: &dyn Clock) -> Self {
        Self {
            period: Duration::from_secs_f64(period_secs),
            last_monitor: clock.now_secs(),
        }
    }

    /// Remaining time in the current tick, in seconds. Negative when the
    /// cycle has already overrun the configured period.
    pub fn remaining_secs(&self, clock: &dyn Clock) -> f64 {
        let elapsed = clock.now_secs() - self.last_monitor;
        self.period.as_secs_f64() - elapsed
    }

    /// `cumLagMs`: negative remaining time in the tick, in milliseconds.
    /// Positive when the cycle overran.
    pub fn cum_lag_ms(&self, clock: &dyn Clock) -> f64 {
        -self.remaining_secs(clock) * 1000.0
    }

    /// Sleeps out any remaining slack and resets the tick clock.
    pub fn monitor_time(&mut self, clock: &dyn Clock) {
        let remaining = self.remaining_secs(clock);
        if remaining > 0.0 {
            thread::sleep(Duration::from_secs_f64(remaining));
        }
        self.last_monitor = clock.now_secs();
    }
}
