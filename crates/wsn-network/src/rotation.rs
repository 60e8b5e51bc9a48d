//! Proactive cluster-head rotation.
//!
//! Unlike reactive succession in [`tick`](crate::tick), rotation retires
//! heads that are low but not yet empty, keeps them alive as members of the
//! new head, and charges the rate bookkeeping for both sides.

use log::{debug, info};
use wsn_core::NodeId;

use crate::init::HEAD_RATE_INCREMENT;
use crate::{NetworkState, Pick, elect};

/// Heads strictly below this battery are retired.
pub const ROTATION_THRESHOLD: f64 = 30.0;
/// A replacement must hold strictly more than this battery.
pub const ROTATION_MIN_BATTERY: f64 = 70.0;
/// Rate shed by a demoted head.
pub const DEMOTION_RATE_DECREMENT: f64 = 0.3;
/// Control messages per successful rotation.
pub const ROTATION_MESSAGES: u64 = 5;
/// Energy per successful rotation.
pub const ROTATION_ENERGY: f64 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rotation {
    pub retired:  NodeId,
    pub promoted: NodeId,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RotationReport {
    pub rotations:      Vec<Rotation>,
    /// Low-battery heads left in place because no member qualified.
    pub skipped:        Vec<NodeId>,
    pub energy_delta:   f64,
    pub messages_delta: u64,
}

/// Replace every head below [`ROTATION_THRESHOLD`] with the highest-battery
/// eligible member of its own cluster.
///
/// Never reduces the number of active heads: each rotation swaps one head
/// for one active member, and a head with no candidate is left alone.
pub fn rotate_cluster_heads(state: &mut NetworkState) -> RotationReport {
    let mut report = RotationReport::default();

    let low: Vec<NodeId> = state
        .cluster_heads()
        .filter(|n| n.battery < ROTATION_THRESHOLD)
        .map(|n| n.id)
        .collect();

    for old in low {
        let Some(j) = elect(
            &state.nodes,
            |n| {
                n.is_member_of(old)
                    && n.active
                    && !n.is_cluster_head
                    && n.battery > ROTATION_MIN_BATTERY
            },
            Pick::HighestBattery,
        ) else {
            debug!("no rotation candidate for head {old}");
            report.skipped.push(old);
            continue;
        };

        let new = state.nodes[j].id;
        {
            let promoted = &mut state.nodes[j];
            promoted.promote();
            promoted.energy_consumption_rate += HEAD_RATE_INCREMENT;
        }
        state.reassign_members(old, new);
        if let Some(retired) = state.node_mut(old) {
            retired.is_cluster_head = false;
            retired.cluster_id = Some(new);
            retired.energy_consumption_rate =
                (retired.energy_consumption_rate - DEMOTION_RATE_DECREMENT).max(0.0);
        }

        info!("rotated head {old} -> {new}");
        report.rotations.push(Rotation { retired: old, promoted: new });
        report.messages_delta += ROTATION_MESSAGES;
        report.energy_delta += ROTATION_ENERGY;
    }

    state.accumulate(report.messages_delta, report.energy_delta);
    report
}
