//! Statistics produced by the core: per-census aggregates and the running
//! best-of-population record.

use warren_core::{AgentId, SimTime};

use crate::Rabbit;

/// Aggregate counters sampled at one instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CensusRecord {
    pub time:            SimTime,
    pub rabbit_count:    u64,
    pub food_count:      u64,
    pub removed_rabbits: u64,
    pub eaten_food:      u64,
    pub decayed_food:    u64,
}

/// Running best values over every rabbit report, each with the id of the
/// rabbit that set it.
///
/// A field is replaced only on strict improvement, so a record never gets
/// worse and ties keep the earlier holder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopulationBest {
    pub lowest_hunger: Option<(f64, AgentId)>,
    pub longest_age:   Option<(f64, AgentId)>,
    pub max_breeding:  Option<(u32, AgentId)>,
}

impl PopulationBest {
    /// Fold one live rabbit's report into the record.
    pub fn observe(&mut self, rabbit: &Rabbit) {
        if self.lowest_hunger.is_none_or(|(h, _)| rabbit.hunger < h) {
            self.lowest_hunger = Some((rabbit.hunger, rabbit.id));
        }
        if self.longest_age.is_none_or(|(a, _)| rabbit.age > a) {
            self.longest_age = Some((rabbit.age, rabbit.id));
        }
        if self.max_breeding.is_none_or(|(b, _)| rabbit.breeding_count > b) {
            self.max_breeding = Some((rabbit.breeding_count, rabbit.id));
        }
    }
}
