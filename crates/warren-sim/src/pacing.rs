//! Wall-clock pacing for real-time runs.
//!
//! One simulated minute maps to `time_factor` wall-clock seconds.  Pacing is
//! non-strict: when the simulation falls behind the wall clock the pacer
//! stops sleeping instead of reporting an error.

use std::time::{Duration, Instant};

use warren_core::SimTime;

/// Sleeps the calling thread so simulated time tracks wall time.
#[derive(Debug, Clone)]
pub struct RealtimePacer {
    time_factor: f64,
    /// Wall instant and simulated time the pacer was anchored at.
    anchor:      Option<(Instant, SimTime)>,
}

impl RealtimePacer {
    pub fn new(time_factor: f64) -> Self {
        Self { time_factor, anchor: None }
    }

    pub fn time_factor(&self) -> f64 {
        self.time_factor
    }

    /// Pin simulated time `at` to the wall instant `wall`.
    pub fn anchor(&mut self, wall: Instant, at: SimTime) {
        self.anchor = Some((wall, at));
    }

    /// Wall time still to wait, as seen from `wall`, before `time` is due.
    ///
    /// Zero when unanchored, when `time` is already late, or when the time
    /// factor is not positive.
    pub fn delay_at(&self, time: SimTime, wall: Instant) -> Duration {
        let Some((origin, start)) = self.anchor else {
            return Duration::ZERO;
        };
        let secs = time.since(start) * self.time_factor;
        if !(secs.is_finite() && secs > 0.0) {
            return Duration::ZERO;
        }
        let target = origin + Duration::from_secs_f64(secs);
        target.saturating_duration_since(wall)
    }

    /// Block until `time` is due.  The first call anchors the pacer at
    /// `time` and returns immediately.
    pub fn wait_until(&mut self, time: SimTime) {
        let wall = Instant::now();
        if self.anchor.is_none() {
            self.anchor(wall, time);
            return;
        }
        let delay = self.delay_at(time, wall);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}
