//! Static simulation settings.
//!
//! The settings record is read once at startup (typically from
//! `simulation_settings.json`) and treated as an immutable parameter bag by
//! every other crate.  Field names follow the settings file; the doc
//! comments give the domain meaning.

use std::path::Path;

use serde::Deserialize;

use crate::time::TICK;
use crate::{WarrenError, WarrenResult};

/// Environment (grid and pacing) settings.
#[derive(Clone, Debug, Deserialize)]
pub struct EnvironmentSettings {
    /// Number of cells on each axis.  Must be at least 2.
    pub grid_size: i32,

    /// Window size hints for a renderer.  Unused by the core.
    #[serde(default)]
    pub win_width: u32,
    #[serde(default)]
    pub win_height: u32,

    /// Wall-clock seconds per simulated unit in a real-time run.
    pub time_factor: f64,
}

/// Rabbit population and per-rabbit trait settings.
#[derive(Clone, Debug, Deserialize)]
pub struct RabbitSettings {
    /// Rabbits seeded by the factory at construction.
    pub start_rabbits_count: usize,
    /// Stochastic arrivals per simulated day.
    pub rate: f64,
    /// Whether the factory keeps generating after seeding.
    pub generate_new: bool,
    /// Half-width of the square scan neighbourhood.
    pub scan_radius: f64,
    /// Hunger at birth.
    pub base_hunger: f64,
    /// Hunger accrued per tick.
    pub base_hunger_factor: f64,
    /// Hunger at which a rabbit starves.
    pub hunger_fatigue: f64,
    /// A rabbit is fed (may breed) while hunger is at or below this.
    pub hunger_to_breed: f64,
    /// Step scale used when judging which direction is closer to a target.
    pub base_speed: f64,
    /// Cooldown granted after breeding.
    pub base_breed_timeout: f64,
    /// Cooldown removed per tick.
    pub breeding_reset_speed: f64,
}

/// Food population settings.
#[derive(Clone, Debug, Deserialize)]
pub struct FoodSettings {
    /// Food items seeded by the factory at construction.
    pub start_food_count: usize,
    /// Stochastic arrivals per simulated day.
    pub rate: f64,
    /// Whether the factory keeps generating after seeding.
    pub generate_new: bool,
    pub min_nutrition: f64,
    pub max_nutrition: f64,
    /// Ticks a food item survives before decaying out.
    pub lifespan: u32,
}

fn default_seed() -> u64 {
    42
}

fn default_census_interval() -> f64 {
    TICK
}

/// Top-level simulation settings.
#[derive(Clone, Debug, Deserialize)]
pub struct SimConfig {
    pub environment: EnvironmentSettings,
    pub rabbit: RabbitSettings,
    pub food: FoodSettings,

    /// Master RNG seed.  The same seed always produces identical results.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Simulated minutes between census records.  Default: one tick.
    #[serde(default = "default_census_interval")]
    pub census_interval: f64,
}

impl SimConfig {
    /// Parse settings from a JSON string and validate them.
    pub fn from_json_str(json: &str) -> WarrenResult<Self> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| WarrenError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON settings file.
    pub fn load(path: &Path) -> WarrenResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Total number of grid cells.
    pub fn cell_count(&self) -> usize {
        let side = self.environment.grid_size.max(0) as usize;
        side * side
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> WarrenResult<()> {
        let env = &self.environment;
        if env.grid_size < 2 {
            return Err(config_err(format!(
                "grid_size must be at least 2, got {}",
                env.grid_size
            )));
        }
        if !(env.time_factor.is_finite() && env.time_factor > 0.0) {
            return Err(config_err(format!(
                "time_factor must be positive, got {}",
                env.time_factor
            )));
        }

        let r = &self.rabbit;
        check_non_negative("rabbit.rate", r.rate)?;
        check_non_negative("rabbit.scan_radius", r.scan_radius)?;
        check_non_negative("rabbit.base_hunger_factor", r.base_hunger_factor)?;
        check_non_negative("rabbit.base_breed_timeout", r.base_breed_timeout)?;
        check_non_negative("rabbit.breeding_reset_speed", r.breeding_reset_speed)?;
        check_non_negative("rabbit.base_speed", r.base_speed)?;
        for (name, value) in [
            ("rabbit.base_hunger", r.base_hunger),
            ("rabbit.hunger_fatigue", r.hunger_fatigue),
            ("rabbit.hunger_to_breed", r.hunger_to_breed),
        ] {
            if !value.is_finite() {
                return Err(config_err(format!("{name} must be finite, got {value}")));
            }
        }

        let f = &self.food;
        check_non_negative("food.rate", f.rate)?;
        check_non_negative("food.min_nutrition", f.min_nutrition)?;
        check_non_negative("food.max_nutrition", f.max_nutrition)?;
        if f.min_nutrition > f.max_nutrition {
            return Err(config_err(format!(
                "food.min_nutrition ({}) exceeds food.max_nutrition ({})",
                f.min_nutrition, f.max_nutrition
            )));
        }
        if f.lifespan == 0 {
            return Err(config_err("food.lifespan must be at least 1".to_string()));
        }

        let seeded = r.start_rabbits_count + f.start_food_count;
        if seeded > self.cell_count() {
            return Err(config_err(format!(
                "{seeded} seeded agents do not fit on a {0}x{0} grid",
                env.grid_size
            )));
        }

        if !(self.census_interval.is_finite() && self.census_interval > 0.0) {
            return Err(config_err(format!(
                "census_interval must be positive, got {}",
                self.census_interval
            )));
        }
        Ok(())
    }
}

fn config_err(msg: String) -> WarrenError {
    WarrenError::Config(msg)
}

fn check_non_negative(name: &str, value: f64) -> WarrenResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(config_err(format!("{name} must be a non-negative number, got {value}")))
    }
}
