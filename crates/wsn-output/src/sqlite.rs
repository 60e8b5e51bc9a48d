//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `node_snapshots` and `step_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{NodeSnapshotRow, OutputResult, StepSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        // Steps restart at 0 after a reset, so no table is keyed on step.
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS node_snapshots (
                 step            INTEGER NOT NULL,
                 node_id         INTEGER NOT NULL,
                 x               REAL    NOT NULL,
                 y               REAL    NOT NULL,
                 is_cluster_head INTEGER NOT NULL,
                 active          INTEGER NOT NULL,
                 battery         REAL    NOT NULL,
                 cluster_id      INTEGER NOT NULL,
                 energy_rate     REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS step_summaries (
                 step                  INTEGER NOT NULL,
                 action                TEXT    NOT NULL,
                 active_nodes          INTEGER NOT NULL,
                 cluster_heads         INTEGER NOT NULL,
                 messages_transmitted  INTEGER NOT NULL,
                 total_energy_consumed REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_node_snapshots(&mut self, rows: &[NodeSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO node_snapshots \
                 (step, node_id, x, y, is_cluster_head, active, battery, cluster_id, energy_rate) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.step as i64,
                    row.node_id,
                    row.x,
                    row.y,
                    row.is_cluster_head as i64,
                    row.active as i64,
                    row.battery,
                    row.cluster_id,
                    row.energy_rate,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO step_summaries \
             (step, action, active_nodes, cluster_heads, messages_transmitted, total_energy_consumed) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.step as i64,
                row.action,
                row.active_nodes as i64,
                row.cluster_heads as i64,
                row.messages_transmitted as i64,
                row.total_energy_consumed,
            ],
        )?;
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
