//! Stochastic population sources for rabbits and food.
//!
//! A factory seeds `start_count` agents when it is constructed, then, while
//! `generate_new` holds, sleeps an exponential gap with rate
//! `rate / DAY_MINUTES` and spawns one more agent per wake.  New agents land
//! on a random unoccupied cell; if the grid is full the spawn is skipped.

use tracing::warn;
use warren_core::{AgentId, DAY_MINUTES, FoodSettings, RabbitSettings, TICK};

use crate::journal::{AgentTag, JournalKind};
use crate::process::{AgentKind, Process};
use crate::rabbit::RabbitTraits;
use crate::{AgentContext, Food, Intent, Rabbit};

/// Sample the next inter-arrival gap; `None` when the factory should go
/// dormant (generation off, or a zero rate).
fn next_gap(generate_new: bool, rate_per_day: f64, ctx: &mut AgentContext<'_>) -> Option<f64> {
    if !generate_new {
        return None;
    }
    let gap = ctx.rng.exponential(rate_per_day / DAY_MINUTES);
    gap.is_finite().then_some(gap)
}

fn factory_tag(kind: AgentKind, id: AgentId) -> Option<AgentTag> {
    Some(AgentTag { kind, id })
}

// ── RabbitFactory ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct RabbitFactory {
    pub start_count:  usize,
    /// Arrivals per simulated day.
    pub rate_per_day: f64,
    pub generate_new: bool,
    pub traits:       RabbitTraits,
    pub speed:        f64,
}

impl RabbitFactory {
    pub fn from_settings(s: &RabbitSettings) -> Self {
        Self {
            start_count:  s.start_rabbits_count,
            rate_per_day: s.rate,
            generate_new: s.generate_new,
            traits:       RabbitTraits::from_settings(s),
            speed:        s.base_speed,
        }
    }

    /// Seed the initial population and request the first arrival wake.
    pub fn start(&self, pid: AgentId, ctx: &mut AgentContext<'_>) -> Vec<Intent> {
        let mut intents: Vec<Intent> =
            (0..self.start_count).filter_map(|_| self.spawn_one(pid, ctx)).collect();
        if let Some(gap) = next_gap(self.generate_new, self.rate_per_day, ctx) {
            intents.push(Intent::Sleep(gap));
        }
        intents
    }

    /// One steady-state wake: spawn a rabbit, sleep until the next arrival.
    pub fn step(&self, pid: AgentId, ctx: &mut AgentContext<'_>) -> Vec<Intent> {
        let mut intents: Vec<Intent> = self.spawn_one(pid, ctx).into_iter().collect();
        if let Some(gap) = next_gap(self.generate_new, self.rate_per_day, ctx) {
            intents.push(Intent::Sleep(gap));
        }
        intents
    }

    fn spawn_one(&self, pid: AgentId, ctx: &mut AgentContext<'_>) -> Option<Intent> {
        let Some(pos) = ctx.world.random_free_cell(ctx.rng) else {
            warn!(factory = %pid, "grid full, skipping rabbit spawn");
            return None;
        };
        let id = ctx.world.next_id();
        if !ctx.world.add_rabbit(Rabbit::new(id, pos, self.traits, self.speed)) {
            return None;
        }
        let now = ctx.now;
        ctx.world.journal_mut().record(
            now,
            factory_tag(AgentKind::RabbitFactory, pid),
            JournalKind::Spawned,
            format!("Generated rabbit {id} at {pos}"),
        );
        Some(Intent::Spawn { pid: id, process: Process::Rabbit, delay: 0.0 })
    }
}

// ── FoodFactory ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct FoodFactory {
    pub start_count:   usize,
    /// Arrivals per simulated day.
    pub rate_per_day:  f64,
    pub generate_new:  bool,
    pub min_nutrition: f64,
    pub max_nutrition: f64,
    pub lifespan:      u32,
}

impl FoodFactory {
    pub fn from_settings(s: &FoodSettings) -> Self {
        Self {
            start_count:   s.start_food_count,
            rate_per_day:  s.rate,
            generate_new:  s.generate_new,
            min_nutrition: s.min_nutrition,
            max_nutrition: s.max_nutrition,
            lifespan:      s.lifespan,
        }
    }

    /// Seed the initial food and request the first arrival wake.
    pub fn start(&self, pid: AgentId, ctx: &mut AgentContext<'_>) -> Vec<Intent> {
        let mut intents: Vec<Intent> =
            (0..self.start_count).filter_map(|_| self.spawn_one(pid, ctx)).collect();
        if let Some(gap) = next_gap(self.generate_new, self.rate_per_day, ctx) {
            intents.push(Intent::Sleep(gap));
        }
        intents
    }

    /// One steady-state wake: spawn a food item, sleep until the next arrival.
    pub fn step(&self, pid: AgentId, ctx: &mut AgentContext<'_>) -> Vec<Intent> {
        let mut intents: Vec<Intent> = self.spawn_one(pid, ctx).into_iter().collect();
        if let Some(gap) = next_gap(self.generate_new, self.rate_per_day, ctx) {
            intents.push(Intent::Sleep(gap));
        }
        intents
    }

    fn spawn_one(&self, pid: AgentId, ctx: &mut AgentContext<'_>) -> Option<Intent> {
        let Some(pos) = ctx.world.random_free_cell(ctx.rng) else {
            warn!(factory = %pid, "grid full, skipping food spawn");
            return None;
        };
        let nutrition = if self.max_nutrition > self.min_nutrition {
            ctx.rng.gen_range(self.min_nutrition..=self.max_nutrition)
        } else {
            self.min_nutrition
        };
        let id = ctx.world.next_id();
        if !ctx.world.add_food(Food::new(id, pos, nutrition, self.lifespan)) {
            return None;
        }
        let now = ctx.now;
        ctx.world.journal_mut().record(
            now,
            factory_tag(AgentKind::FoodFactory, pid),
            JournalKind::Spawned,
            format!("Generated food at {pos}"),
        );
        // The countdown begins with a sleep, so the first wake is one tick out.
        Some(Intent::Spawn { pid: id, process: Process::Food, delay: TICK })
    }
}
