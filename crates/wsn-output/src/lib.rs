//! `wsn-output`: simulation output writers.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                  |
//! |-----------|---------|------------------------------------------------|
//! | *(none)*  | CSV     | `node_snapshots.csv`, `step_summaries.csv`     |
//! | `sqlite`  | SQLite  | `output.db`                                    |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `wsn_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wsn_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run_steps(100, &mut obs);
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{NodeSnapshotRow, StepSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
