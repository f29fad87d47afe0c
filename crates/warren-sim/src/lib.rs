//! `warren-sim`: step driver for the warren ecology simulator.
//!
//! # Resume loop
//!
//! ```text
//! run_until(until):
//!   while next due time T < until:
//!     ① on_tick_start(T)
//!     ② resume every continuation due at T, FIFO; processes spawned at T
//!        join the back of T's queue and run before T + ε
//!     ③ apply each step's intents: Sleep → re-queue, Spawn → register,
//!        Interrupt → wake early; no Sleep → terminate
//!     ④ on_tick_end, on_census (new records), on_snapshot(T, &World)
//!   now := until
//! ```
//!
//! `step()` resumes a single continuation for drivers that interleave
//! rendering between world updates; `run_until_paced` ties the loop to the
//! wall clock through a [`RealtimePacer`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use warren_core::{SimConfig, SimTime, DAY_MINUTES};
//! use warren_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config).build()?;
//! sim.run_until(SimTime::new(DAY_MINUTES).unwrap(), &mut NoopObserver)?;
//! println!("{:?}", sim.best());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod pacing;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use pacing::RealtimePacer;
pub use sim::Sim;
