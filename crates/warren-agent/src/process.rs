//! The closed set of life-cycles the scheduler can drive.

use warren_core::{AgentId, TICK};
use warren_schedule::Resume;

use crate::factory::{FoodFactory, RabbitFactory};
use crate::{AgentContext, Intent, food, rabbit};

/// Which kind of agent owns a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Rabbit,
    Food,
    RabbitFactory,
    FoodFactory,
    Census,
}

/// Periodic statistics collector: records a census every `interval`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Census {
    pub interval: f64,
}

impl Default for Census {
    fn default() -> Self {
        Self { interval: TICK }
    }
}

/// One agent life-cycle.
///
/// Rabbit and food state lives in the [`World`](crate::World) registries,
/// keyed by the process id; the variant only selects the step function.
/// Factory and census state is small and immutable, so it rides along.
#[derive(Clone, Debug, PartialEq)]
pub enum Process {
    Rabbit,
    Food,
    RabbitFactory(RabbitFactory),
    FoodFactory(FoodFactory),
    Census(Census),
}

impl Process {
    pub fn kind(&self) -> AgentKind {
        match self {
            Process::Rabbit => AgentKind::Rabbit,
            Process::Food => AgentKind::Food,
            Process::RabbitFactory(_) => AgentKind::RabbitFactory,
            Process::FoodFactory(_) => AgentKind::FoodFactory,
            Process::Census(_) => AgentKind::Census,
        }
    }

    /// Work done when the process is registered, before its first wake.
    ///
    /// Factories seed their initial population here and return their first
    /// sleep; every other kind returns nothing and waits for its first wake.
    pub fn start(&self, pid: AgentId, ctx: &mut AgentContext<'_>) -> Vec<Intent> {
        match self {
            Process::RabbitFactory(f) => f.start(pid, ctx),
            Process::FoodFactory(f) => f.start(pid, ctx),
            Process::Rabbit | Process::Food | Process::Census(_) => vec![],
        }
    }

    /// Resume the life-cycle once.
    pub fn step(&self, pid: AgentId, resume: Resume, ctx: &mut AgentContext<'_>) -> Vec<Intent> {
        match self {
            Process::Rabbit => rabbit::step(pid, ctx),
            Process::Food => food::step(pid, resume, ctx),
            Process::RabbitFactory(f) => f.step(pid, ctx),
            Process::FoodFactory(f) => f.step(pid, ctx),
            Process::Census(c) => {
                let record = ctx.world.census_at(ctx.now);
                ctx.world.push_census(record);
                vec![Intent::Sleep(c.interval)]
            }
        }
    }
}
