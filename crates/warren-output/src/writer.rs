//! The `OutputWriter` trait implemented by all backend writers.

use crate::{BestRow, CensusRow, OutputResult, SnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one census row.
    fn write_census(&mut self, row: &CensusRow) -> OutputResult<()>;

    /// Write a batch of agent positions taken at one instant.
    fn write_snapshots(&mut self, rows: &[SnapshotRow]) -> OutputResult<()>;

    /// Write the final best-of-population record.
    fn write_best(&mut self, rows: &[BestRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent, safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
