//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use warren_agent::{CensusRecord, PopulationBest, World};
use warren_core::SimTime;
use warren_sim::SimObserver;

use crate::row::{BestRow, CensusRow, SnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes census rows, agent snapshots, and the final
/// best-of-population record to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    /// Minimum simulated minutes between two written snapshots; `0.0`
    /// writes every snapshot.
    snapshot_interval: f64,
    next_snapshot:     f64,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer` that writes every snapshot.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            snapshot_interval: 0.0,
            next_snapshot:     0.0,
            last_error:        None,
        }
    }

    /// Write a snapshot only once `interval` minutes have passed since the
    /// last written one.
    pub fn with_snapshot_interval(mut self, interval: f64) -> Self {
        self.snapshot_interval = interval.max(0.0);
        self
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_census(&mut self, record: &CensusRecord) {
        let result = self.writer.write_census(&CensusRow::from(record));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, time: SimTime, world: &World) {
        let t = time.as_f64();
        if t < self.next_snapshot {
            return;
        }
        self.next_snapshot = t + self.snapshot_interval;

        let rows: Vec<SnapshotRow> = world
            .rabbits()
            .map(|r| SnapshotRow::rabbit(t, r))
            .chain(world.food().map(|f| SnapshotRow::food(t, f)))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _time: SimTime, best: &PopulationBest) {
        let result = self.writer.write_best(&BestRow::from_best(best));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
