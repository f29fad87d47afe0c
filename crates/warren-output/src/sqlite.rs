//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `census`, `snapshots`, and `best`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{BestRow, CensusRow, OutputResult, SnapshotRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS census (
                 time            REAL    NOT NULL,
                 rabbit_count    INTEGER NOT NULL,
                 food_count      INTEGER NOT NULL,
                 removed_rabbits INTEGER NOT NULL,
                 eaten_food      INTEGER NOT NULL,
                 decayed_food    INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS snapshots (
                 time     REAL    NOT NULL,
                 kind     TEXT    NOT NULL,
                 agent_id INTEGER NOT NULL,
                 x        INTEGER NOT NULL,
                 y        INTEGER NOT NULL,
                 decayed  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS best (
                 metric   TEXT PRIMARY KEY,
                 value    REAL    NOT NULL,
                 agent_id INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_census(&mut self, row: &CensusRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO census \
             (time, rabbit_count, food_count, removed_rabbits, eaten_food, decayed_food) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.time,
                row.rabbit_count as i64,
                row.food_count as i64,
                row.removed_rabbits as i64,
                row.eaten_food as i64,
                row.decayed_food as i64,
            ],
        )?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[SnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO snapshots (time, kind, agent_id, x, y, decayed) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.time,
                    row.kind,
                    row.agent_id as i64,
                    row.x,
                    row.y,
                    row.decayed as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_best(&mut self, rows: &[BestRow]) -> OutputResult<()> {
        for row in rows {
            self.conn.execute(
                "INSERT OR REPLACE INTO best (metric, value, agent_id) VALUES (?1, ?2, ?3)",
                rusqlite::params![row.metric, row.value, row.agent_id as i64],
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
