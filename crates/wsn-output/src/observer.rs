//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use log::warn;
use wsn_core::Step;
use wsn_sim::{SimObserver, Snapshot, StepReport};

use crate::row::{NodeSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes node snapshots and step summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  Check with [`take_error`][Self::take_error] once
/// the run is over.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Batch callers that never reach `on_sim_end` call
    /// this directly.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_nodes(&mut self, snapshot: &Snapshot) {
        let rows: Vec<NodeSnapshotRow> = snapshot
            .network
            .nodes
            .iter()
            .map(|n| NodeSnapshotRow::from_node(snapshot.step, n))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_node_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_initialized(&mut self, snapshot: &Snapshot) {
        self.write_nodes(snapshot);
    }

    fn on_step_end(&mut self, report: &StepReport) {
        let result = self.writer.write_step_summary(&StepSummaryRow::from(report));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.write_nodes(snapshot);
    }

    fn on_sim_end(&mut self, _final_step: Step) {
        self.finish();
    }
}
