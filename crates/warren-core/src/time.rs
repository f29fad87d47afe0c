//! Simulation time model.
//!
//! # Design
//!
//! Time is a non-negative real number of simulated minutes.  One tick (the
//! period of every agent life-cycle) is one minute; factories sample
//! fractional inter-arrival gaps, so the clock cannot be an integer counter.
//!
//! `SimTime` wraps an `OrderedFloat<f64>` so it can key the scheduler's
//! `BTreeMap` directly.  Constructors reject NaN and negative values, which
//! keeps the total order meaningful.
//!
//! In a real-time run one simulated unit maps to `time_factor` wall-clock
//! seconds:
//!
//!   wall_secs = sim_time * time_factor

use std::fmt;

use ordered_float::OrderedFloat;

/// Duration of one agent life-cycle step, in simulated minutes.
pub const TICK: f64 = 1.0;

/// Minutes in one simulated day.  Factory rates are expressed per day.
pub const DAY_MINUTES: f64 = 1440.0;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point on the simulated clock.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SimTime(OrderedFloat<f64>);

impl SimTime {
    pub const ZERO: SimTime = SimTime(OrderedFloat(0.0));

    /// Build a time from raw minutes.  Returns `None` for NaN, infinities,
    /// and negative values.
    #[inline]
    pub fn new(minutes: f64) -> Option<SimTime> {
        (minutes.is_finite() && minutes >= 0.0).then_some(SimTime(OrderedFloat(minutes)))
    }

    /// Raw minutes since the start of the run.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0.into_inner()
    }

    /// Return the time `duration` minutes after `self`.
    ///
    /// Callers are expected to pass finite, non-negative durations; the
    /// scheduler validates durations before calling this.
    #[inline]
    pub fn after(self, duration: f64) -> SimTime {
        SimTime(OrderedFloat(self.as_f64() + duration))
    }

    /// Minutes elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.as_f64() - earlier.as_f64()
    }

    /// Wall-clock seconds this time corresponds to in a real-time run.
    #[inline]
    pub fn wall_secs(self, time_factor: f64) -> f64 {
        self.as_f64() * time_factor
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        self.after(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_f64())
    }
}
