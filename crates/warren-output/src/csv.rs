//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `census.csv`
//! - `snapshots.csv`
//! - `best.csv` (written at finish)

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{BestRow, CensusRow, OutputResult, SnapshotRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    census:    Writer<File>,
    snapshots: Writer<File>,
    best:      Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut census = Writer::from_path(dir.join("census.csv"))?;
        census.write_record([
            "time",
            "rabbit_count",
            "food_count",
            "removed_rabbits",
            "eaten_food",
            "decayed_food",
        ])?;

        let mut snapshots = Writer::from_path(dir.join("snapshots.csv"))?;
        snapshots.write_record(["time", "kind", "agent_id", "x", "y", "decayed"])?;

        let mut best = Writer::from_path(dir.join("best.csv"))?;
        best.write_record(["metric", "value", "agent_id"])?;

        Ok(Self { census, snapshots, best, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_census(&mut self, row: &CensusRow) -> OutputResult<()> {
        self.census.write_record(&[
            row.time.to_string(),
            row.rabbit_count.to_string(),
            row.food_count.to_string(),
            row.removed_rabbits.to_string(),
            row.eaten_food.to_string(),
            row.decayed_food.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[SnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.time.to_string(),
                row.kind.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                (row.decayed as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_best(&mut self, rows: &[BestRow]) -> OutputResult<()> {
        for row in rows {
            self.best.write_record(&[
                row.metric.to_string(),
                row.value.to_string(),
                row.agent_id.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.census.flush()?;
        self.snapshots.flush()?;
        self.best.flush()?;
        Ok(())
    }
}
