//! Simulation observer trait for renderers, statistics sinks, and output.

use warren_agent::{CensusRecord, PopulationBest, World};
use warren_core::SimTime;

/// Callbacks invoked by the [`Sim`][crate::Sim] step driver.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: population printer
///
/// ```rust,ignore
/// struct PopulationPrinter;
///
/// impl SimObserver for PopulationPrinter {
///     fn on_census(&mut self, record: &CensusRecord) {
///         println!("{}: {} rabbits, {} food", record.time, record.rabbit_count, record.food_count);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the continuations due at `time` are resumed.
    fn on_tick_start(&mut self, _time: SimTime) {}

    /// Called once every continuation due at `time` has run, including
    /// processes spawned at `time`.
    ///
    /// `resumed` is the number of continuations resumed at that instant.
    fn on_tick_end(&mut self, _time: SimTime, _resumed: usize) {}

    /// Called for every census record, in the order they were taken.
    fn on_census(&mut self, _record: &CensusRecord) {}

    /// Called after each distinct due time is drained, with read-only
    /// access to the live registries.
    fn on_snapshot(&mut self, _time: SimTime, _world: &World) {}

    /// Called once by [`Sim::finish`][crate::Sim::finish].
    fn on_sim_end(&mut self, _time: SimTime, _best: &PopulationBest) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
