//! Rabbit agents: foraging, breeding, and starvation.
//!
//! # Per-tick life-cycle
//!
//! ```text
//! ① target   fed & off cooldown → first eligible partner in the box
//!            otherwise          → nearest food in the box (Manhattan)
//! ② step     compass step that best closes the distance (speed-scaled
//!            comparison), else a random one
//! ③ reflect  invert any axis that would leave the grid
//! ④ move
//! ⑤ interact reached partner → breed; reached food → eat
//! ⑥ hunger   += accrual; ≥ death threshold → starve, terminate
//! ⑦ age, cooldown, report to PopulationBest, sleep one tick
//! ```
//!
//! Targets are ids, re-looked-up after the move: a partner or food removed
//! by someone else earlier in the tick simply fails the lookup.

use warren_core::{
    AgentId, DIRECTIONS, GridPos, RabbitSettings, SimRng, Step, TICK,
    adjust_move_if_outside_grid,
};

use crate::journal::{AgentTag, JournalKind};
use crate::process::{AgentKind, Process};
use crate::{AgentContext, Intent, World};

/// Heritable per-rabbit parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RabbitTraits {
    pub scan_radius:               f64,
    pub base_hunger:               f64,
    pub hunger_accrual_rate:       f64,
    pub hunger_death_threshold:    f64,
    pub hunger_breed_threshold:    f64,
    pub breed_cooldown_base:       f64,
    pub breed_cooldown_decay_rate: f64,
}

/// Offspring traits deviate from the parents' mean by at most this fraction.
pub const INHERITANCE_JITTER: f64 = 0.1;

impl RabbitTraits {
    pub fn from_settings(s: &RabbitSettings) -> Self {
        Self {
            scan_radius:               s.scan_radius,
            base_hunger:               s.base_hunger,
            hunger_accrual_rate:       s.base_hunger_factor,
            hunger_death_threshold:    s.hunger_fatigue,
            hunger_breed_threshold:    s.hunger_to_breed,
            breed_cooldown_base:       s.base_breed_timeout,
            breed_cooldown_decay_rate: s.breeding_reset_speed,
        }
    }

    /// Per-trait parental mean, each perturbed by up to ±10 % of that mean.
    pub fn inherit(a: &RabbitTraits, b: &RabbitTraits, rng: &mut SimRng) -> Self {
        let mut mix = |x: f64, y: f64| rng.perturb((x + y) / 2.0, INHERITANCE_JITTER);
        Self {
            scan_radius:               mix(a.scan_radius, b.scan_radius),
            base_hunger:               mix(a.base_hunger, b.base_hunger),
            hunger_accrual_rate:       mix(a.hunger_accrual_rate, b.hunger_accrual_rate),
            hunger_death_threshold:    mix(a.hunger_death_threshold, b.hunger_death_threshold),
            hunger_breed_threshold:    mix(a.hunger_breed_threshold, b.hunger_breed_threshold),
            breed_cooldown_base:       mix(a.breed_cooldown_base, b.breed_cooldown_base),
            breed_cooldown_decay_rate: mix(a.breed_cooldown_decay_rate, b.breed_cooldown_decay_rate),
        }
    }
}

/// A live (or just-removed) rabbit.
#[derive(Clone, Debug, PartialEq)]
pub struct Rabbit {
    pub id:     AgentId,
    pub pos:    GridPos,
    pub traits: RabbitTraits,
    /// Scale applied to compass steps when judging which is closer.
    pub speed:  f64,
    /// Lower is better fed.
    pub hunger: f64,
    pub breeding_cooldown_remaining: f64,
    /// Set by breeding; the next cooldown decay is skipped and clears it.
    pub cooldown_fresh: bool,
    pub age:            f64,
    pub breeding_count: u32,
    pub is_alive:       bool,
    /// Partner chosen this tick; cleared once resolved.
    pub partner:        Option<AgentId>,
    /// Food chosen this tick; cleared once resolved.
    pub food_target:    Option<AgentId>,
}

impl Rabbit {
    /// A rabbit with the given traits, hungry at its `base_hunger`, ready to
    /// breed.
    pub fn new(id: AgentId, pos: GridPos, traits: RabbitTraits, speed: f64) -> Self {
        Self {
            id,
            pos,
            traits,
            speed,
            hunger: traits.base_hunger,
            breeding_cooldown_remaining: 0.0,
            cooldown_fresh: false,
            age: 0.0,
            breeding_count: 0,
            is_alive: true,
            partner: None,
            food_target: None,
        }
    }

    /// A newborn: like [`Rabbit::new`] but starting on a full cooldown.
    pub fn offspring(id: AgentId, pos: GridPos, traits: RabbitTraits, speed: f64) -> Self {
        Self {
            breeding_cooldown_remaining: traits.breed_cooldown_base,
            ..Self::new(id, pos, traits, speed)
        }
    }

    /// Fed iff hunger is at or below the breed threshold.
    #[inline]
    pub fn is_fed(&self) -> bool {
        self.hunger <= self.traits.hunger_breed_threshold
    }

    /// Fed and off cooldown.
    #[inline]
    pub fn can_breed(&self) -> bool {
        self.is_fed() && self.breeding_cooldown_remaining <= 0.0
    }

    fn tag(&self) -> AgentTag {
        AgentTag { kind: AgentKind::Rabbit, id: self.id }
    }
}

/// Cooldown granted after breeding: the base timeout, shortened by half of
/// any hunger below zero (rounded down).
pub fn fresh_cooldown(base: f64, hunger: f64) -> f64 {
    base - ((-hunger).max(0.0) / 2.0).floor().max(0.0)
}

/// The compass step whose speed-scaled result is strictly closest to
/// `target`, or `None` if no step improves on the current distance.
///
/// Ties keep the earliest step in [`DIRECTIONS`].
pub fn step_towards(from: GridPos, speed: f64, target: GridPos) -> Option<Step> {
    let mut best = None;
    let mut min_distance = f64::from(from.manhattan(target));
    for step in DIRECTIONS {
        let distance = step.scaled_distance(from, speed, target);
        if distance < min_distance {
            min_distance = distance;
            best = Some(step);
        }
    }
    best
}

/// A uniformly random compass step.
pub fn random_step(rng: &mut SimRng) -> Step {
    DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())]
}

/// What a rabbit decided to walk towards this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Partner(AgentId, GridPos),
    Food(AgentId, GridPos),
}

impl Target {
    pub fn pos(self) -> GridPos {
        match self {
            Target::Partner(_, pos) | Target::Food(_, pos) => pos,
        }
    }
}

/// First rabbit in enumeration order, other than `me`, inside `me`'s box
/// that can breed itself.
pub fn find_partner(world: &World, me: &Rabbit) -> Option<(AgentId, GridPos)> {
    world
        .rabbits()
        .find(|other| {
            other.id != me.id
                && me.pos.within_box(other.pos, me.traits.scan_radius)
                && other.can_breed()
        })
        .map(|other| (other.id, other.pos))
}

/// Food inside `me`'s box with the smallest Manhattan distance; the first
/// one in enumeration order wins ties.
pub fn find_food(world: &World, me: &Rabbit) -> Option<(AgentId, GridPos)> {
    world
        .food()
        .filter(|food| me.pos.within_box(food.pos, me.traits.scan_radius))
        .min_by_key(|food| me.pos.manhattan(food.pos))
        .map(|food| (food.id, food.pos))
}

/// Step ①: decide what to walk towards.
pub fn choose_target(world: &World, me: &Rabbit) -> Option<Target> {
    if me.can_breed() {
        if let Some((id, pos)) = find_partner(world, me) {
            return Some(Target::Partner(id, pos));
        }
    }
    find_food(world, me).map(|(id, pos)| Target::Food(id, pos))
}

/// Run one tick of rabbit `id`'s life-cycle.
///
/// A rabbit that is no longer in the world is not resumed: the call is a
/// no-op that returns no intents.
pub fn step(id: AgentId, ctx: &mut AgentContext<'_>) -> Vec<Intent> {
    let Some(mut me) = ctx.world.rabbit(id).cloned() else {
        return vec![];
    };
    if !me.is_alive {
        return vec![];
    }
    let now = ctx.now;
    let mut intents = Vec::new();

    // ── ① decide target ───────────────────────────────────────────────────
    let target = choose_target(ctx.world, &me);
    match target {
        Some(Target::Partner(pid, _)) => me.partner = Some(pid),
        Some(Target::Food(fid, pos)) => {
            me.food_target = Some(fid);
            ctx.world.journal_mut().record(
                now,
                Some(me.tag()),
                JournalKind::MoveToFood,
                format!("Moving towards food at {pos}"),
            );
        }
        None => {}
    }

    // ── ② – ④ move ────────────────────────────────────────────────────────
    let step = target
        .and_then(|t| step_towards(me.pos, me.speed, t.pos()))
        .unwrap_or_else(|| random_step(ctx.rng));
    let step = adjust_move_if_outside_grid(me.pos, step, ctx.world.grid_size());
    me.pos = me.pos.offset(step);

    // ── ⑤ resolve interaction ─────────────────────────────────────────────
    if let Some(pid) = me.partner.take() {
        let reached = ctx.world.rabbit(pid).is_some_and(|p| p.pos == me.pos);
        if reached {
            if let Some(spawn) = breed(&mut me, pid, ctx) {
                intents.push(spawn);
            }
        }
    }
    if let Some(fid) = me.food_target.take() {
        let reached = ctx.world.food_item(fid).is_some_and(|f| f.pos == me.pos);
        if reached {
            if let Some(food) = ctx.world.consume_food(fid) {
                me.hunger -= food.nutrition;
                ctx.world.journal_mut().record(
                    now,
                    Some(me.tag()),
                    JournalKind::Consumed,
                    format!("Consumed food at {} and has {:.2} hunger", food.pos, me.hunger),
                );
                intents.push(Intent::Interrupt(fid));
            }
        }
    }

    // ── ⑥ hunger ──────────────────────────────────────────────────────────
    me.hunger += me.traits.hunger_accrual_rate;
    let starving = me.hunger >= me.traits.hunger_death_threshold;

    if let Some(slot) = ctx.world.rabbit_mut(id) {
        *slot = me;
    }

    if starving {
        if let Some(dead) = ctx.world.starve_rabbit(id) {
            ctx.world.journal_mut().record(
                now,
                Some(dead.tag()),
                JournalKind::Died,
                format!("Rabbit at {} died", dead.pos),
            );
        }
        return intents;
    }

    // ── ⑦ age, cooldown, report, sleep ────────────────────────────────────
    if let Some(me) = ctx.world.rabbit_mut(id) {
        me.age += TICK;
        if me.cooldown_fresh {
            me.cooldown_fresh = false;
        } else {
            me.breeding_cooldown_remaining -= me.traits.breed_cooldown_decay_rate;
        }
        let report = me.clone();
        ctx.world.best_mut().observe(&report);
    }
    intents.push(Intent::Sleep(TICK));
    intents
}

/// Step ⑤ with a partner: reset both cooldowns and register an offspring at
/// the shared cell.  Returns the offspring's spawn intent.
fn breed(me: &mut Rabbit, partner_id: AgentId, ctx: &mut AgentContext<'_>) -> Option<Intent> {
    let partner = ctx.world.rabbit_mut(partner_id)?;
    partner.breeding_cooldown_remaining =
        fresh_cooldown(partner.traits.breed_cooldown_base, partner.hunger);
    partner.cooldown_fresh = true;
    let partner_traits = partner.traits;

    me.breeding_cooldown_remaining = fresh_cooldown(me.traits.breed_cooldown_base, me.hunger);
    me.cooldown_fresh = true;
    me.breeding_count += 1;

    let traits = RabbitTraits::inherit(&me.traits, &partner_traits, ctx.rng);
    let child_id = ctx.world.next_id();
    let child = Rabbit::offspring(child_id, me.pos, traits, ctx.config.rabbit.base_speed);

    let now = ctx.now;
    ctx.world.journal_mut().record(
        now,
        Some(me.tag()),
        JournalKind::BreedStart,
        format!("Breeding with Rabbit {} at {}", partner_id, me.pos),
    );
    if !ctx.world.add_rabbit(child) {
        return None;
    }
    ctx.world.journal_mut().record(
        now,
        Some(AgentTag { kind: AgentKind::Rabbit, id: child_id }),
        JournalKind::Spawned,
        format!("Born at {}", me.pos),
    );
    Some(Intent::Spawn { pid: child_id, process: Process::Rabbit, delay: 0.0 })
}
