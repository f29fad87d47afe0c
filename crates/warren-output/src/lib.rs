//! `warren-output`: simulation output writers for the warren simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                  |
//! |-----------|---------|------------------------------------------------|
//! | *(none)*  | CSV     | `census.csv`, `snapshots.csv`, `best.csv`      |
//! | `sqlite`  | SQLite  | `output.db` (`census`, `snapshots`, `best`)    |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `warren_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use warren_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer).with_snapshot_interval(10.0);
//! sim.run_until(end, &mut obs)?;
//! sim.finish(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{BestRow, CensusRow, SnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
