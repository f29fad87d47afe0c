//! `warren-schedule`: the cooperative discrete-event engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`event_queue`] | `EventQueue` (`BTreeMap<SimTime, VecDeque<Wake>>`)    |
//! | [`scheduler`]   | `Scheduler`: clock, `schedule_after`, `interrupt`    |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                  |
//!
//! # Process model (summary)
//!
//! ```text
//! pop_next(until)  → Wake { pid, resume }   now := due time
//! owner runs pid's step function
//! step asks for    → schedule_after(pid, d)  (suspend)
//!                  → nothing                 (terminate)
//! ```
//!
//! The scheduler does not know what a process is; it only orders wakes.
//! `warren-sim` owns the process table and dispatches each wake.

pub mod error;
pub mod event_queue;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use event_queue::{EventQueue, Resume, Wake};
pub use scheduler::Scheduler;
