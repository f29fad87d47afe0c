//! Seeded simulation RNG.
//!
//! # Determinism strategy
//!
//! The whole simulation runs on one logical thread, so a single `SmallRng`
//! seeded from the settings drives every random decision: spawn cells,
//! random walks, nutrition draws, inter-arrival gaps, and trait
//! perturbation.  The same seed and settings always replay the same run on
//! the same `rand` version; reproducibility across RNG implementations is
//! not a goal.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG shared by all agent life-cycles.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Sample an exponentially distributed gap with the given `rate`
    /// (events per unit time), by inverting the CDF.
    ///
    /// Returns `f64::INFINITY` for a non-positive rate: the next event never
    /// comes.
    pub fn exponential(&mut self, rate: f64) -> f64 {
        if rate <= 0.0 {
            return f64::INFINITY;
        }
        // A standard `f64` draw is in [0, 1), so `1 - u` is in (0, 1] and ln is finite.
        let u: f64 = self.0.r#gen();
        -(1.0 - u).ln() / rate
    }

    /// `mean` plus a uniform perturbation in `±fraction · |mean|`.
    pub fn perturb(&mut self, mean: f64, fraction: f64) -> f64 {
        let spread = mean.abs() * fraction;
        if spread == 0.0 {
            return mean;
        }
        mean + self.0.gen_range(-spread..=spread)
    }
}
