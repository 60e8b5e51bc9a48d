//! Energy forecast consumed by the `PredictEnergy` action.
//!
//! A read-only summary: group averages for heads vs regular nodes and a
//! short linear projection of each.  Computing one never touches the model.

use crate::{NetworkState, Node};

/// Number of projected points per series.
pub const FORECAST_POINTS: usize = 3;
/// Projected battery loss per point, in percent.
pub const HEAD_DRAIN_PER_POINT: f64 = 1.2;
pub const MEMBER_DRAIN_PER_POINT: f64 = 0.7;
/// Projected relative consumption growth per point.
pub const HEAD_GROWTH_PER_POINT: f64 = 0.10;
pub const MEMBER_GROWTH_PER_POINT: f64 = 0.05;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyForecast {
    pub head_count:                usize,
    pub regular_count:             usize,
    pub avg_head_battery:          f64,
    pub avg_regular_battery:       f64,
    pub avg_head_rate:             f64,
    pub avg_regular_rate:          f64,
    pub projected_head_battery:    [f64; FORECAST_POINTS],
    pub projected_regular_battery: [f64; FORECAST_POINTS],
    pub projected_head_rate:       [f64; FORECAST_POINTS],
    pub projected_regular_rate:    [f64; FORECAST_POINTS],
}

impl EnergyForecast {
    /// Summarise `state`.  Groups are split on the head flag alone; an empty
    /// group averages to 0.
    pub fn from_state(state: &NetworkState) -> Self {
        let (heads, regular): (Vec<_>, Vec<_>) =
            state.nodes.iter().partition(|n| n.is_cluster_head);

        let mean = |xs: &[&Node], f: fn(&Node) -> f64| -> f64 {
            if xs.is_empty() {
                0.0
            } else {
                xs.iter().map(|n| f(n)).sum::<f64>() / xs.len() as f64
            }
        };

        let avg_head_battery = mean(&heads, |n| n.battery);
        let avg_regular_battery = mean(&regular, |n| n.battery);
        let avg_head_rate = mean(&heads, |n| n.energy_consumption_rate);
        let avg_regular_rate = mean(&regular, |n| n.energy_consumption_rate);

        Self {
            head_count: heads.len(),
            regular_count: regular.len(),
            avg_head_battery,
            avg_regular_battery,
            avg_head_rate,
            avg_regular_rate,
            projected_head_battery: project_drain(avg_head_battery, HEAD_DRAIN_PER_POINT),
            projected_regular_battery: project_drain(avg_regular_battery, MEMBER_DRAIN_PER_POINT),
            projected_head_rate: project_growth(avg_head_rate, HEAD_GROWTH_PER_POINT),
            projected_regular_rate: project_growth(avg_regular_rate, MEMBER_GROWTH_PER_POINT),
        }
    }
}

fn project_drain(start: f64, per_point: f64) -> [f64; FORECAST_POINTS] {
    std::array::from_fn(|i| (start - per_point * (i + 1) as f64).max(0.0))
}

fn project_growth(start: f64, per_point: f64) -> [f64; FORECAST_POINTS] {
    std::array::from_fn(|i| start * (1.0 + per_point * (i + 1) as f64))
}
