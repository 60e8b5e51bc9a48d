//! `wsn-network`: the network simulation model.
//!
//! A flat `Vec<Node>` plus two cumulative counters.  Every operation here is
//! a plain function over `&mut NetworkState`; ownership, snapshots and
//! scheduling live in `wsn-sim`.
//!
//! | Operation                    | Module       |
//! |------------------------------|--------------|
//! | [`initialize`]               | [`init`]     |
//! | [`tick`]                     | [`tick`]     |
//! | [`rotate_cluster_heads`]     | [`rotation`] |
//! | [`EnergyForecast::from_state`] | [`forecast`] |
//!
//! Head selection, reactive succession and proactive rotation all choose a
//! node through one helper, [`election::elect`], so the three call sites
//! differ only in their eligibility predicate and pick strategy.

pub mod election;
pub mod forecast;
pub mod init;
pub mod node;
pub mod rotation;
pub mod state;
pub mod tick;

#[cfg(test)]
mod tests;

pub use election::{Pick, elect};
pub use forecast::{EnergyForecast, FORECAST_POINTS};
pub use init::initialize;
pub use node::{Node, Role};
pub use rotation::{Rotation, RotationReport, rotate_cluster_heads};
pub use state::NetworkState;
pub use tick::{Succession, TickReport, tick};
