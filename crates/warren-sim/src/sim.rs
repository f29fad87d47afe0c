//! The `Sim` struct and its step driver.

use std::collections::HashMap;

use tracing::{debug, trace};
use warren_agent::{
    AgentContext, CensusRecord, Food, Intent, JournalEvent, PopulationBest, Process, Rabbit,
    RabbitTraits, World,
};
use warren_core::{AgentId, GridPos, SimConfig, SimRng, SimTime, TICK};
use warren_schedule::{Scheduler, Wake};

use crate::{RealtimePacer, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns the scheduler, the world, the single RNG, and the process
/// table.  Each resumed continuation runs one step function:
///
/// 1. **Pop**: take the earliest wake; the clock moves to its due time.
/// 2. **Step**: look up the process and run it against an
///    [`AgentContext`].  A wake for a process that no longer exists is
///    dropped.
/// 3. **Apply**: in order, `Sleep(d)` re-queues the process, `Spawn{..}`
///    registers a new one, `Interrupt(pid)` wakes a sleeper early.  A step
///    that returns no `Sleep` has terminated and leaves the table.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub(crate) config:     SimConfig,
    pub(crate) scheduler:  Scheduler,
    pub(crate) world:      World,
    pub(crate) rng:        SimRng,
    /// Live processes, keyed by the id of the agent (or factory) they drive.
    pub(crate) processes:  HashMap<AgentId, Process>,
    pub(crate) census_pid: Option<AgentId>,
    /// Every census record taken so far.
    pub(crate) census:     Vec<CensusRecord>,
    /// How many of `census` have been handed to an observer.
    pub(crate) reported:   usize,
}

impl Sim {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current simulated time.
    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn best(&self) -> &PopulationBest {
        self.world.best()
    }

    /// Full census history.
    pub fn census(&self) -> &[CensusRecord] {
        &self.census
    }

    /// Number of live processes, the census collector included.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// `true` when no agent or factory continuation is pending.
    ///
    /// The census collector alone never keeps a run alive.
    pub fn is_quiescent(&self) -> bool {
        let census = self
            .census_pid
            .is_some_and(|pid| self.scheduler.is_pending(pid));
        self.scheduler.len() <= usize::from(census)
    }

    /// Hand buffered journal events to the caller.
    pub fn drain_journal(&mut self) -> Vec<JournalEvent> {
        self.world.journal_mut().drain()
    }

    pub fn log_on(&mut self) {
        self.world.journal_mut().log_on();
    }

    pub fn log_off(&mut self) {
        self.world.journal_mut().log_off();
    }

    // ── Seeding ───────────────────────────────────────────────────────────

    /// Add a rabbit with the configured traits at `pos`; its first wake is
    /// now.  Returns `None` if the world rejects the position.
    pub fn place_rabbit(&mut self, pos: GridPos) -> SimResult<Option<AgentId>> {
        let id = self.world.next_id();
        let traits = RabbitTraits::from_settings(&self.config.rabbit);
        let rabbit = Rabbit::new(id, pos, traits, self.config.rabbit.base_speed);
        if !self.world.add_rabbit(rabbit) {
            return Ok(None);
        }
        self.spawn(id, Process::Rabbit, 0.0)?;
        Ok(Some(id))
    }

    /// Add a food item with the configured lifespan at `pos`; its first
    /// wake is one tick from now.  Returns `None` if the world rejects the
    /// position.
    pub fn place_food(&mut self, pos: GridPos, nutrition: f64) -> SimResult<Option<AgentId>> {
        let id = self.world.next_id();
        if !self.world.add_food(Food::new(id, pos, nutrition, self.config.food.lifespan)) {
            return Ok(None);
        }
        self.spawn(id, Process::Food, TICK)?;
        Ok(Some(id))
    }

    // ── Step driver ───────────────────────────────────────────────────────

    /// Resume exactly one continuation, the earliest due.
    ///
    /// Returns `Ok(None)` without touching the clock when the simulation is
    /// quiescent.
    pub fn step(&mut self) -> SimResult<Option<Wake>> {
        if self.is_quiescent() {
            return Ok(None);
        }
        let Some(due) = self.scheduler.peek_time() else {
            return Ok(None);
        };
        let Some(wake) = self.scheduler.pop_next(due) else {
            return Ok(None);
        };
        self.resume(wake)?;
        self.collect_census();
        Ok(Some(wake))
    }

    /// Resume everything due strictly before `until`, then set the clock to
    /// `until`.
    ///
    /// Processes spawned at a due time run before the next due time is
    /// considered.  Fails if `until` is earlier than [`now`](Self::now).
    pub fn run_until<O: SimObserver>(&mut self, until: SimTime, observer: &mut O) -> SimResult<()> {
        while let Some(due) = self.next_due_before(until) {
            self.drain_due(due, observer)?;
        }
        self.scheduler.advance_to(until)?;
        Ok(())
    }

    /// Like [`run_until`](Self::run_until), but each due time waits for the
    /// wall clock first.
    pub fn run_until_paced<O: SimObserver>(
        &mut self,
        until:    SimTime,
        pacer:    &mut RealtimePacer,
        observer: &mut O,
    ) -> SimResult<()> {
        while let Some(due) = self.next_due_before(until) {
            pacer.wait_until(due);
            self.drain_due(due, observer)?;
        }
        pacer.wait_until(until);
        self.scheduler.advance_to(until)?;
        Ok(())
    }

    /// Advance the clock by one tick.
    pub fn advance_one_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.run_until(self.now() + TICK, observer)
    }

    /// Advance the clock by `n` ticks.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.advance_one_tick(observer)?;
        }
        Ok(())
    }

    /// Advance tick by tick until quiescent or until the clock reaches
    /// `limit`.  Returns the time reached.
    pub fn run_to_quiescence<O: SimObserver>(
        &mut self,
        limit:    SimTime,
        observer: &mut O,
    ) -> SimResult<SimTime> {
        while !self.is_quiescent() && self.now() < limit {
            let next = (self.now() + TICK).min(limit);
            self.run_until(next, observer)?;
        }
        debug!(now = %self.now(), quiescent = self.is_quiescent(), "run stopped");
        Ok(self.now())
    }

    /// Report the final population best to `observer`.
    pub fn finish<O: SimObserver>(&mut self, observer: &mut O) {
        self.report_census(observer);
        observer.on_sim_end(self.now(), self.world.best());
    }

    // ── Core processing ───────────────────────────────────────────────────

    fn next_due_before(&self, until: SimTime) -> Option<SimTime> {
        self.scheduler.peek_time().filter(|&due| due < until)
    }

    /// Resume every continuation due at `due`, including ones queued while
    /// draining, then notify `observer`.
    fn drain_due<O: SimObserver>(&mut self, due: SimTime, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(due);
        let mut resumed = 0;
        while let Some(wake) = self.scheduler.pop_next(due) {
            self.resume(wake)?;
            resumed += 1;
        }
        self.collect_census();
        observer.on_tick_end(due, resumed);
        self.report_census(observer);
        observer.on_snapshot(due, &self.world);
        Ok(())
    }

    fn resume(&mut self, wake: Wake) -> SimResult<()> {
        let Some(process) = self.processes.remove(&wake.pid) else {
            trace!(pid = %wake.pid, "wake for finished process dropped");
            return Ok(());
        };
        let mut ctx = AgentContext::new(
            self.scheduler.now(),
            &mut self.world,
            &mut self.rng,
            &self.config,
        );
        let intents = process.step(wake.pid, wake.resume, &mut ctx);
        if self.apply_intents(wake.pid, intents)? {
            self.processes.insert(wake.pid, process);
        } else {
            trace!(pid = %wake.pid, kind = ?process.kind(), "process terminated");
        }
        Ok(())
    }

    /// Apply `pid`'s intents in order.  Returns whether `pid` suspended.
    fn apply_intents(&mut self, pid: AgentId, intents: Vec<Intent>) -> SimResult<bool> {
        let mut suspended = false;
        for intent in intents {
            match intent {
                Intent::Sleep(duration) => {
                    self.scheduler.schedule_after(pid, duration)?;
                    suspended = true;
                }
                Intent::Spawn { pid: child, process, delay } => {
                    self.spawn(child, process, delay)?;
                }
                Intent::Interrupt(target) => {
                    self.scheduler.interrupt(target);
                }
            }
        }
        Ok(suspended)
    }

    /// Register `process` under `pid` and schedule its first wake.
    ///
    /// Factories seed their population in `start` and pick their own first
    /// wake; every other process first wakes `delay` minutes from now.
    pub(crate) fn spawn(&mut self, pid: AgentId, process: Process, delay: f64) -> SimResult<()> {
        let mut ctx = AgentContext::new(
            self.scheduler.now(),
            &mut self.world,
            &mut self.rng,
            &self.config,
        );
        let intents = process.start(pid, &mut ctx);
        let self_scheduling = matches!(process, Process::RabbitFactory(_) | Process::FoodFactory(_));

        let mut suspended = self.apply_intents(pid, intents)?;
        if !self_scheduling && !suspended {
            self.scheduler.schedule_after(pid, delay)?;
            suspended = true;
        }
        if suspended {
            self.processes.insert(pid, process);
        } else {
            debug!(%pid, kind = ?process.kind(), "process dormant after start");
        }
        Ok(())
    }

    fn collect_census(&mut self) {
        self.census.extend(self.world.drain_census());
    }

    fn report_census<O: SimObserver>(&mut self, observer: &mut O) {
        self.collect_census();
        for record in &self.census[self.reported..] {
            observer.on_census(record);
        }
        self.reported = self.census.len();
    }
}
