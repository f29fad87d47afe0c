//! `warren-core`: foundational types for the warren ecology simulator.
//!
//! This crate is a dependency of every other `warren-*` crate and has no
//! `warren-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `IdAllocator`                                   |
//! | [`geo`]     | `GridPos`, `Step`, `DIRECTIONS`, reflective boundary       |
//! | [`time`]    | `SimTime`, `TICK`, `DAY_MINUTES`                           |
//! | [`rng`]     | `SimRng` (seeded, exponential gaps, trait perturbation)    |
//! | [`config`]  | `SimConfig` and its per-species settings                   |
//! | [`error`]   | `WarrenError`, `WarrenResult`                              |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EnvironmentSettings, FoodSettings, RabbitSettings, SimConfig};
pub use error::{WarrenError, WarrenResult};
pub use geo::{DIRECTIONS, GridPos, Step, adjust_move_if_outside_grid};
pub use ids::{AgentId, IdAllocator};
pub use rng::SimRng;
pub use time::{DAY_MINUTES, SimTime, TICK};
