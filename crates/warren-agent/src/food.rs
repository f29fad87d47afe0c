//! Food agents and their decay countdown.

use warren_core::{AgentId, GridPos, TICK};
use warren_schedule::Resume;

use crate::journal::{AgentTag, JournalKind};
use crate::process::AgentKind;
use crate::{AgentContext, Intent};

/// A food item lying on the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Food {
    pub id:        AgentId,
    pub pos:       GridPos,
    /// Hunger removed from the rabbit that eats this.
    pub nutrition: f64,
    pub lifespan:  u32,
    pub remaining_lifespan: u32,
    /// Set once, when nutrition is halved.
    pub decayed:   bool,
}

impl Food {
    pub fn new(id: AgentId, pos: GridPos, nutrition: f64, lifespan: u32) -> Self {
        Self {
            id,
            pos,
            nutrition,
            lifespan,
            remaining_lifespan: lifespan,
            decayed: false,
        }
    }

    /// `true` once the remaining lifespan is at or below half the lifespan.
    #[inline]
    pub fn is_decayed(&self) -> bool {
        f64::from(self.remaining_lifespan) <= f64::from(self.lifespan) / 2.0
    }

    /// Count one tick down, halving nutrition the first time the remaining
    /// lifespan reaches the half-life.  Returns `true` when the countdown
    /// hits zero.
    pub fn tick_down(&mut self) -> bool {
        self.remaining_lifespan = self.remaining_lifespan.saturating_sub(1);
        if !self.decayed && self.is_decayed() {
            self.nutrition /= 2.0;
            self.decayed = true;
        }
        self.remaining_lifespan == 0
    }
}

/// Run one tick of food `id`'s countdown.
///
/// Food removed by a rabbit is not resumed: an interrupt, or a timeout that
/// lands after the food left the world, ends the life-cycle without a decay.
pub fn step(id: AgentId, resume: Resume, ctx: &mut AgentContext<'_>) -> Vec<Intent> {
    if resume == Resume::Interrupted {
        return vec![];
    }
    let Some(food) = ctx.world.food_mut(id) else {
        return vec![];
    };
    if !food.tick_down() {
        return vec![Intent::Sleep(TICK)];
    }

    if let Some(food) = ctx.world.decay_food(id) {
        let now = ctx.now;
        ctx.world.journal_mut().record(
            now,
            Some(AgentTag { kind: AgentKind::Food, id }),
            JournalKind::Decayed,
            format!("Food at {} decayed", food.pos),
        );
    }
    vec![]
}
