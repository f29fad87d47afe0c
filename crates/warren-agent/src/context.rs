//! Mutable simulation state handed to every step function.

use warren_core::{SimConfig, SimRng, SimTime};

use crate::World;

/// Everything a life-cycle step may read or change.
///
/// Built by the simulation loop for each resumed continuation; borrows end
/// when the step returns, so no step can hold on to world state across a
/// suspension point.
pub struct AgentContext<'a> {
    /// Time of the wake being processed.
    pub now:    SimTime,
    pub world:  &'a mut World,
    pub rng:    &'a mut SimRng,
    pub config: &'a SimConfig,
}

impl<'a> AgentContext<'a> {
    #[inline]
    pub fn new(
        now:    SimTime,
        world:  &'a mut World,
        rng:    &'a mut SimRng,
        config: &'a SimConfig,
    ) -> Self {
        Self { now, world, rng, config }
    }
}
