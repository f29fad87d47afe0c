//! Fluent builder for constructing a [`Sim`].

use std::collections::HashMap;

use tracing::info;
use warren_agent::{Census, FoodFactory, Process, RabbitFactory, World};
use warren_core::{SimConfig, SimRng};
use warren_schedule::Scheduler;

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                      |
/// |-----------------|----------------------------------------------|
/// | `.journal(b)`   | `false`: events go to `tracing` only         |
/// | `.census(b)`    | `true`: census every `config.census_interval` |
///
/// # Example
///
/// ```rust,ignore
/// let config = SimConfig::load(Path::new("simulation_settings.json"))?;
/// let mut sim = SimBuilder::new(config).journal(true).build()?;
/// sim.run_until(SimTime::new(DAY_MINUTES).unwrap(), &mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:  SimConfig,
    journal: bool,
    census:  bool,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, journal: false, census: true }
    }

    /// Buffer journal events for [`Sim::drain_journal`].
    pub fn journal(mut self, on: bool) -> Self {
        self.journal = on;
        self
    }

    /// Register the periodic census collector.
    pub fn census(mut self, on: bool) -> Self {
        self.census = on;
        self
    }

    /// Validate the configuration, register both factories (which seed the
    /// initial population at time zero), then the census collector.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let mut world = World::from_config(&self.config);
        if self.journal {
            world.journal_mut().log_on();
        }
        let rabbit_factory = RabbitFactory::from_settings(&self.config.rabbit);
        let food_factory = FoodFactory::from_settings(&self.config.food);
        let census_interval = self.config.census_interval;

        let mut sim = Sim {
            rng:        SimRng::new(self.config.seed),
            config:     self.config,
            scheduler:  Scheduler::new(),
            world,
            processes:  HashMap::new(),
            census_pid: None,
            census:     Vec::new(),
            reported:   0,
        };

        let pid = sim.world.next_id();
        sim.spawn(pid, Process::RabbitFactory(rabbit_factory), 0.0)?;
        let pid = sim.world.next_id();
        sim.spawn(pid, Process::FoodFactory(food_factory), 0.0)?;

        if self.census {
            let pid = sim.world.next_id();
            sim.spawn(pid, Process::Census(Census { interval: census_interval }), 0.0)?;
            sim.census_pid = Some(pid);
        }

        info!(
            grid_size = sim.world.grid_size(),
            rabbits   = sim.world.rabbit_count(),
            food      = sim.world.food_count(),
            seed      = sim.config.seed,
            "simulation built"
        );
        Ok(sim)
    }
}
