//! The `OutputWriter` trait implemented by all backend writers.

use crate::{NodeSnapshotRow, OutputResult, StepSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// keeps the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write the state of every node at one step.
    fn write_node_snapshots(&mut self, rows: &[NodeSnapshotRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
