//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `node_snapshots.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{NodeSnapshotRow, OutputResult, StepSummaryRow};

pub const NODE_SNAPSHOT_HEADER: [&str; 9] = [
    "step", "node_id", "x", "y", "is_cluster_head", "active", "battery", "cluster_id", "energy_rate",
];
pub const STEP_SUMMARY_HEADER: [&str; 6] = [
    "step", "action", "active_nodes", "cluster_heads", "messages_transmitted", "total_energy_consumed",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files in it, and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("node_snapshots.csv"))?;
        snapshots.write_record(NODE_SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(STEP_SUMMARY_HEADER)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_node_snapshots(&mut self, rows: &[NodeSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.step.to_string(),
                row.node_id.to_string(),
                format!("{:.4}", row.x),
                format!("{:.4}", row.y),
                (row.is_cluster_head as u8).to_string(),
                (row.active as u8).to_string(),
                format!("{:.3}", row.battery),
                row.cluster_id.to_string(),
                format!("{:.3}", row.energy_rate),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.action.to_owned(),
            row.active_nodes.to_string(),
            row.cluster_heads.to_string(),
            row.messages_transmitted.to_string(),
            format!("{:.3}", row.total_energy_consumed),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
