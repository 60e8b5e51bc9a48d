//! Read-only view handed to consumers.

use std::sync::Arc;

use wsn_core::Step;
use wsn_network::{EnergyForecast, NetworkState};
use wsn_sensor::Sensor;

/// A consistent picture of the simulation between two steps.
///
/// Cloning is cheap (reference counts only).  The data behind the `Arc`s is
/// never mutated; the simulation swaps in new allocations instead.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub step:     Step,
    pub running:  bool,
    pub network:  Arc<NetworkState>,
    pub sensors:  Arc<Vec<Sensor>>,
    /// Result of the most recent `PredictEnergy` tick, if any.
    pub forecast: Option<Arc<EnergyForecast>>,
}

impl Snapshot {
    pub fn active_nodes(&self) -> usize {
        self.network.active_count()
    }

    pub fn active_heads(&self) -> usize {
        self.network.active_head_count()
    }
}
