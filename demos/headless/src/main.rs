//! headless: run one simulated day of the warren ecology without a GUI.
//!
//! Usage:
//!
//! ```text
//! headless [SETTINGS] [OUT_DIR] [--paced]
//! ```
//!
//! Defaults to `simulation_settings.json` next to this crate and
//! `output/headless`.  `--paced` ties the run to the wall clock through
//! `environment.time_factor`.  Log verbosity follows `RUST_LOG` (default
//! `info`; `warren::journal=debug` adds movement and breeding events).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use warren_agent::{CensusRecord, World};
use warren_core::{DAY_MINUTES, SimConfig, SimTime};
use warren_output::{CsvWriter, SimOutputObserver};
use warren_sim::{RealtimePacer, SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_SETTINGS:  &str = concat!(env!("CARGO_MANIFEST_DIR"), "/simulation_settings.json");
const DEFAULT_OUTPUT:    &str = "output/headless";
const SNAPSHOT_INTERVAL: f64  = 60.0; // one snapshot per simulated hour

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "headless")]
#[command(about = "Run one simulated day of the warren ecology")]
#[command(version)]
struct Cli {
    /// Settings JSON file
    settings: Option<PathBuf>,

    /// Directory for census.csv, snapshots.csv and best.csv
    out_dir: Option<PathBuf>,

    /// Tie the run to the wall clock through `environment.time_factor`
    #[arg(long)]
    paced: bool,
}

// ── Observer wrapper for progress lines ───────────────────────────────────────

struct ProgressObserver<O: SimObserver> {
    inner: O,
    last:  Option<CensusRecord>,
    hours: u64,
}

impl<O: SimObserver> ProgressObserver<O> {
    fn new(inner: O) -> Self {
        Self { inner, last: None, hours: 0 }
    }
}

impl<O: SimObserver> SimObserver for ProgressObserver<O> {
    fn on_census(&mut self, record: &CensusRecord) {
        let hour = (record.time.as_f64() / 60.0) as u64;
        if hour > self.hours || self.last.is_none() {
            self.hours = hour;
            info!(
                time    = %record.time,
                rabbits = record.rabbit_count,
                food    = record.food_count,
                "census"
            );
        }
        self.last = Some(*record);
        self.inner.on_census(record);
    }

    fn on_snapshot(&mut self, time: SimTime, world: &World) {
        self.inner.on_snapshot(time, world);
    }

    fn on_sim_end(&mut self, time: SimTime, best: &warren_agent::PopulationBest) {
        self.inner.on_sim_end(time, best);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = cli.settings.unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS));
    let out_dir = cli.out_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    // 1. Settings.
    let config = SimConfig::load(&settings)
        .with_context(|| format!("loading settings from {}", settings.display()))?;
    println!("=== headless: warren ecology ===");
    println!(
        "Grid: {0}x{0}  |  Rabbits: {1}  |  Food: {2}  |  Seed: {3}",
        config.environment.grid_size,
        config.rabbit.start_rabbits_count,
        config.food.start_food_count,
        config.seed,
    );
    let time_factor = config.environment.time_factor;

    // 2. Build sim.
    let mut sim = SimBuilder::new(config).build()?;

    // 3. Set up output.
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let writer = CsvWriter::new(&out_dir)?;
    let inner = SimOutputObserver::new(writer).with_snapshot_interval(SNAPSHOT_INTERVAL);
    let mut obs = ProgressObserver::new(inner);

    // 4. Run one simulated day.
    let end = SimTime::new(DAY_MINUTES).context("day length is a valid time")?;
    let t0 = Instant::now();
    if cli.paced {
        let mut pacer = RealtimePacer::new(time_factor);
        sim.run_until_paced(end, &mut pacer, &mut obs)?;
    } else {
        sim.run_until(end, &mut obs)?;
    }
    sim.finish(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!("output error: {e}");
    }

    // 5. Summary.
    let world = sim.world();
    let counters = world.counters();
    println!();
    println!("Simulation complete in {:.3} s (t = {})", elapsed.as_secs_f64(), sim.now());
    println!("  live rabbits     : {}", world.rabbit_count());
    println!("  live food        : {}", world.food_count());
    println!("  removed rabbits  : {}", counters.removed_rabbits);
    println!("  eaten food       : {}", counters.eaten_food);
    println!("  decayed food     : {}", counters.decayed_food);
    println!("  census records   : {}", sim.census().len());
    println!();

    // 6. Best-of-population table.
    let best = sim.best();
    println!("{:<16} {:>10} {:>10}", "Metric", "Value", "Rabbit");
    println!("{}", "-".repeat(38));
    let metrics = [
        ("lowest_hunger", best.lowest_hunger),
        ("longest_age", best.longest_age),
        ("max_breeding", best.max_breeding.map(|(n, id)| (f64::from(n), id))),
    ];
    for (name, entry) in metrics {
        match entry {
            Some((value, id)) => println!("{name:<16} {value:>10.2} {:>10}", id.0),
            None => println!("{name:<16} {:>10} {:>10}", "-", "-"),
        }
    }
    println!();
    println!("Output written to {}", out_dir.display());
    Ok(())
}
