//! Simulation observer trait for progress reporting and data collection.

use wsn_core::Step;

use crate::{Snapshot, StepReport};

/// Callbacks invoked by [`Simulation::execute`][crate::Simulation::execute]
/// and the driver at key points.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, report: &StepReport) {
///         println!("{}: {} active nodes", report.step, report.active_nodes);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after the network (and possibly sensors) were rebuilt by
    /// initialize, reset, or a node-count change.
    fn on_initialized(&mut self, _snapshot: &Snapshot) {}

    /// Called after every tick, whatever its action.
    fn on_step_end(&mut self, _report: &StepReport) {}

    /// Called at snapshot intervals (every `config.output_interval_steps`
    /// steps) with the post-step state.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called when periodic ticking starts or stops.
    fn on_running_changed(&mut self, _step: Step, _running: bool) {}

    /// Called once when the driver shuts down, or by batch callers when
    /// they are done.
    fn on_sim_end(&mut self, _final_step: Step) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
