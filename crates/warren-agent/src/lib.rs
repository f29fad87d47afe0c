//! `warren-agent`: the world and the agent life-cycles.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`world`]   | `World` registries, `Counters`, occupancy sampling            |
//! | [`rabbit`]  | `Rabbit`, `RabbitTraits`, target choice, movement, breeding   |
//! | [`food`]    | `Food` and its decay countdown                                |
//! | [`factory`] | `RabbitFactory`, `FoodFactory`                                |
//! | [`process`] | `Process` tagged union, `Census`, `AgentKind`                 |
//! | [`intent`]  | `Intent` (`Sleep`, `Spawn`, `Interrupt`)                      |
//! | [`context`] | `AgentContext<'a>`: mutable state passed to every step       |
//! | [`stats`]   | `CensusRecord`, `PopulationBest`                              |
//! | [`journal`] | `Journal` event log                                           |
//!
//! # Design notes
//!
//! A step function runs to completion between two suspension points.  It
//! mutates the world directly (moves, removals, births are visible to every
//! later step in the same tick) and returns `Intent`s for the scheduler:
//! sleep, spawn a process, or interrupt one.  `warren-sim` applies them.

pub mod context;
pub mod factory;
pub mod food;
pub mod intent;
pub mod journal;
pub mod process;
pub mod rabbit;
pub mod stats;
pub mod world;


pub use context::AgentContext;
pub use factory::{FoodFactory, RabbitFactory};
pub use food::Food;
pub use intent::Intent;
pub use journal::{AgentTag, Journal, JournalEvent, JournalKind};
pub use process::{AgentKind, Census, Process};
pub use rabbit::{Rabbit, RabbitTraits, Target};
pub use stats::{CensusRecord, PopulationBest};
pub use world::{Counters, World};
