//! `World`: grid bounds, live registries, and running counters.
//!
//! # Registries
//!
//! Live rabbits and live food are held in two `IndexMap<AgentId, _>`s.
//! Insertion order is the world's enumeration order (partner selection picks
//! the first eligible rabbit in it), so removals use `shift_remove` to keep
//! the remaining order stable.
//!
//! # Removal discipline
//!
//! Every removal is check-then-act: it returns `Option` and only touches the
//! counters when the entity was actually present.  Two rabbits reaching the
//! same food in one tick, or a decay wake landing on eaten food, therefore
//! resolve to a harmless `None`.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::warn;
use warren_core::{AgentId, GridPos, IdAllocator, SimConfig, SimRng, SimTime};

use crate::journal::Journal;
use crate::stats::{CensusRecord, PopulationBest};
use crate::{Food, Rabbit};

/// Running totals since the start of the run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub removed_rabbits: u64,
    pub eaten_food:      u64,
    pub decayed_food:    u64,
}

/// All shared mutable simulation state.
pub struct World {
    grid_size:   i32,
    time_factor: f64,
    ids:         IdAllocator,
    rabbits:     IndexMap<AgentId, Rabbit>,
    food:        IndexMap<AgentId, Food>,
    counters:    Counters,
    best:        PopulationBest,
    /// Census records produced since the last `drain_census`.
    census:      Vec<CensusRecord>,
    journal:     Journal,
}

impl World {
    pub fn new(grid_size: i32, time_factor: f64) -> Self {
        Self {
            grid_size,
            time_factor,
            ids:      IdAllocator::new(),
            rabbits:  IndexMap::new(),
            food:     IndexMap::new(),
            counters: Counters::default(),
            best:     PopulationBest::default(),
            census:   Vec::new(),
            journal:  Journal::default(),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.environment.grid_size, config.environment.time_factor)
    }

    // ── Identity ──────────────────────────────────────────────────────────

    /// Allocate a fresh, never-reused agent id.
    pub fn next_id(&mut self) -> AgentId {
        self.ids.allocate()
    }

    // ── Read-only accessors ───────────────────────────────────────────────

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn time_factor(&self) -> f64 {
        self.time_factor
    }

    /// Live rabbits in enumeration order.
    pub fn rabbits(&self) -> impl Iterator<Item = &Rabbit> {
        self.rabbits.values()
    }

    /// Live food in enumeration order.
    pub fn food(&self) -> impl Iterator<Item = &Food> {
        self.food.values()
    }

    pub fn rabbit(&self, id: AgentId) -> Option<&Rabbit> {
        self.rabbits.get(&id)
    }

    pub fn food_item(&self, id: AgentId) -> Option<&Food> {
        self.food.get(&id)
    }

    pub fn rabbit_count(&self) -> usize {
        self.rabbits.len()
    }

    pub fn food_count(&self) -> usize {
        self.food.len()
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Best-of-population record reported by live rabbits.
    pub fn best(&self) -> &PopulationBest {
        &self.best
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn journal_mut(&mut self) -> &mut Journal {
        &mut self.journal
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    pub(crate) fn rabbit_mut(&mut self, id: AgentId) -> Option<&mut Rabbit> {
        self.rabbits.get_mut(&id)
    }

    pub(crate) fn food_mut(&mut self, id: AgentId) -> Option<&mut Food> {
        self.food.get_mut(&id)
    }

    pub(crate) fn best_mut(&mut self) -> &mut PopulationBest {
        &mut self.best
    }

    /// Register a live rabbit.  Positions outside the grid are rejected.
    pub fn add_rabbit(&mut self, rabbit: Rabbit) -> bool {
        if !self.accepts(rabbit.id, rabbit.pos) {
            return false;
        }
        self.rabbits.insert(rabbit.id, rabbit);
        true
    }

    /// Register a live food item.  Positions outside the grid are rejected.
    pub fn add_food(&mut self, food: Food) -> bool {
        if !self.accepts(food.id, food.pos) {
            return false;
        }
        self.food.insert(food.id, food);
        true
    }

    fn accepts(&self, id: AgentId, pos: GridPos) -> bool {
        if !pos.in_bounds(self.grid_size) {
            warn!(agent = %id, %pos, "rejecting agent outside the grid");
            return false;
        }
        if self.rabbits.contains_key(&id) || self.food.contains_key(&id) {
            warn!(agent = %id, "rejecting duplicate agent id");
            return false;
        }
        true
    }

    /// Remove a starved rabbit, marking it dead and counting the removal.
    pub fn starve_rabbit(&mut self, id: AgentId) -> Option<Rabbit> {
        let mut rabbit = self.rabbits.shift_remove(&id)?;
        rabbit.is_alive = false;
        self.counters.removed_rabbits += 1;
        Some(rabbit)
    }

    /// Remove a food item eaten by a rabbit and count it.
    pub fn consume_food(&mut self, id: AgentId) -> Option<Food> {
        let food = self.food.shift_remove(&id)?;
        self.counters.eaten_food += 1;
        Some(food)
    }

    /// Remove a food item whose lifespan ran out and count it.
    pub fn decay_food(&mut self, id: AgentId) -> Option<Food> {
        let food = self.food.shift_remove(&id)?;
        self.counters.decayed_food += 1;
        Some(food)
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// `true` if any live rabbit or food sits on `pos`.
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.rabbits.values().any(|r| r.pos == pos) || self.food.values().any(|f| f.pos == pos)
    }

    /// Every cell holding at least one live rabbit or food.
    pub fn occupied_cells(&self) -> FxHashSet<GridPos> {
        self.rabbits
            .values()
            .map(|r| r.pos)
            .chain(self.food.values().map(|f| f.pos))
            .collect()
    }

    /// Reject-and-retry sample of an unoccupied cell.
    ///
    /// Returns `None` when every cell is taken.
    pub fn random_free_cell(&self, rng: &mut SimRng) -> Option<GridPos> {
        let occupied = self.occupied_cells();
        let side = self.grid_size as usize;
        if occupied.len() >= side * side {
            return None;
        }
        loop {
            let pos = GridPos::new(
                rng.gen_range(0..self.grid_size),
                rng.gen_range(0..self.grid_size),
            );
            if !occupied.contains(&pos) {
                return Some(pos);
            }
        }
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Aggregate record for `time`.
    pub fn census_at(&self, time: SimTime) -> CensusRecord {
        CensusRecord {
            time,
            rabbit_count:    self.rabbits.len() as u64,
            food_count:      self.food.len() as u64,
            removed_rabbits: self.counters.removed_rabbits,
            eaten_food:      self.counters.eaten_food,
            decayed_food:    self.counters.decayed_food,
        }
    }

    pub(crate) fn push_census(&mut self, record: CensusRecord) {
        self.census.push(record);
    }

    /// Take the census records produced since the last call.
    pub fn drain_census(&mut self) -> Vec<CensusRecord> {
        std::mem::take(&mut self.census)
    }
}
