//! The regular simulation step: battery drain, depletion, reactive
//! succession, and traffic accounting.

use log::{debug, info, warn};
use wsn_core::{NodeId, SimRng};

use crate::{NetworkState, Pick, elect};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Per-tick battery draw for a cluster head.
pub const HEAD_DRAW: std::ops::Range<f64> = 0.2..0.5;
/// Per-tick battery draw for a regular node.
pub const MEMBER_DRAW: std::ops::Range<f64> = 0.05..0.20;
/// A successor must hold strictly more than this battery.
pub const SUCCESSION_MIN_BATTERY: f64 = 20.0;
/// Control messages exchanged to announce a new head.
pub const SUCCESSION_MESSAGES: u64 = 3;
/// Energy spent on the succession handshake.
pub const SUCCESSION_ENERGY: f64 = 0.1;

/// A head replaced after its battery ran out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Succession {
    pub depleted:  NodeId,
    pub successor: NodeId,
}

/// What one call to [`tick`] did.  The deltas are already folded into the
/// state's cumulative counters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub energy_delta:     f64,
    pub messages_delta:   u64,
    /// Nodes whose battery reached 0 this tick, in scan order.
    pub depleted:         Vec<NodeId>,
    pub successions:      Vec<Succession>,
    /// Heads that died with no eligible successor.  Their members keep the
    /// stale `cluster_id` until an explicit rotation.
    pub headless:         Vec<NodeId>,
}

/// Advance `state` by one step.
///
/// Nodes are processed in order and mutated in place, so a successor
/// promoted early in the scan already drains at the head rate when the scan
/// reaches it.
pub fn tick(state: &mut NetworkState, rng: &mut SimRng) -> TickReport {
    let mut report = TickReport::default();

    for i in 0..state.nodes.len() {
        let node = &mut state.nodes[i];
        if !node.active {
            continue;
        }

        let draw = if node.is_cluster_head {
            rng.gen_range(HEAD_DRAW)
        } else {
            rng.gen_range(MEMBER_DRAW)
        };
        node.battery = (node.battery - draw).max(0.0);
        report.energy_delta += draw;

        if node.battery > 0.0 {
            continue;
        }

        node.active = false;
        let dead = node.id;
        let was_head = node.is_cluster_head;
        report.depleted.push(dead);
        debug!("{dead} depleted");

        if !was_head {
            continue;
        }

        match elect(
            &state.nodes,
            |n| n.is_member_of(dead) && n.active && n.battery > SUCCESSION_MIN_BATTERY,
            Pick::HighestBattery,
        ) {
            Some(j) => {
                let successor = state.nodes[j].id;
                state.nodes[j].promote();
                let moved = state.reassign_members(dead, successor);
                info!("{successor} succeeds depleted head {dead} ({moved} members moved)");
                report.messages_delta += SUCCESSION_MESSAGES;
                report.energy_delta += SUCCESSION_ENERGY;
                report.successions.push(Succession { depleted: dead, successor });
            }
            None => {
                warn!("head {dead} depleted with no eligible successor; cluster left headless");
                report.headless.push(dead);
            }
        }
    }

    // About half of the surviving nodes report a reading.
    report.messages_delta += (state.active_count() as u64).div_ceil(2);

    state.accumulate(report.messages_delta, report.energy_delta);
    report
}
