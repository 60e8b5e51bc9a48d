//! Network initializer: random placement, head selection, nearest-head
//! assignment.

use log::{debug, info, warn};
use wsn_core::{NodeId, Position, SimRng};

use crate::{NetworkState, Node, Pick, elect};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Probability that a freshly created node starts active.
pub const ACTIVE_PROBABILITY: f64 = 0.9;
/// Initial battery is an integer percentage drawn from this range.
pub const INITIAL_BATTERY_PERCENT: std::ops::Range<u32> = 50..100;
/// Base consumption rate range for every node.
pub const BASE_RATE: std::ops::Range<f64> = 0.5..1.5;
/// One head per this many nodes (rounded up, min 1), i.e. 10 %.
pub const NODES_PER_HEAD: usize = 10;
/// A node must hold strictly more than this battery to be elected head.
pub const HEAD_MIN_BATTERY: f64 = 70.0;
/// Extra consumption rate carried by a cluster head.
pub const HEAD_RATE_INCREMENT: f64 = 0.5;

/// Number of heads the initializer aims for with `node_count` nodes.
///
/// `max(1, ⌈0.1·N⌉)`.  Zero nodes still targets one head; the empty
/// candidate pool then ends selection immediately.
pub fn head_target(node_count: usize) -> usize {
    node_count.div_ceil(NODES_PER_HEAD).max(1)
}

/// Build a fresh network of `node_count` nodes with zeroed counters.
///
/// Never fails.  If fewer than [`head_target`] nodes qualify as heads the
/// network simply ends up with fewer heads; members are then assigned to
/// whichever heads exist (or left unassigned when there are none).
pub fn initialize(node_count: usize, rng: &mut SimRng) -> NetworkState {
    let mut nodes: Vec<Node> = (0..node_count)
        .map(|i| Node {
            id:                      NodeId::from_offset(i),
            position:                Position::new(rng.random(), rng.random()),
            is_cluster_head:         false,
            active:                  rng.gen_bool(ACTIVE_PROBABILITY),
            battery:                 f64::from(rng.gen_range(INITIAL_BATTERY_PERCENT)),
            cluster_id:              None,
            energy_consumption_rate: rng.gen_range(BASE_RATE),
        })
        .collect();

    // ── Head selection ────────────────────────────────────────────────────
    let target = head_target(node_count);
    let mut elected = 0;
    for _ in 0..target {
        let Some(i) = elect(
            &nodes,
            |n| n.active && n.battery > HEAD_MIN_BATTERY && !n.is_cluster_head,
            Pick::Random(&mut *rng),
        ) else {
            break;
        };
        let head = &mut nodes[i];
        head.is_cluster_head = true;
        head.energy_consumption_rate += HEAD_RATE_INCREMENT;
        elected += 1;
    }
    if elected < target && node_count > 0 {
        warn!("only {elected} of {target} cluster heads could be elected");
    }

    assign_nearest_heads(&mut nodes);

    info!("initialized network: {node_count} nodes, {elected} cluster heads");
    NetworkState::from_nodes(nodes)
}

/// Point every active non-head node at its geometrically nearest active
/// head.  The first head scanned wins a tie.
pub(crate) fn assign_nearest_heads(nodes: &mut [Node]) {
    let heads: Vec<(NodeId, Position)> = nodes
        .iter()
        .filter(|n| n.is_active_head())
        .map(|n| (n.id, n.position))
        .collect();
    if heads.is_empty() {
        return;
    }

    for node in nodes.iter_mut().filter(|n| n.active && !n.is_cluster_head) {
        let mut nearest = heads[0].0;
        let mut best = node.position.distance_sq(heads[0].1);
        for &(id, pos) in &heads[1..] {
            let d = node.position.distance_sq(pos);
            if d < best {
                best = d;
                nearest = id;
            }
        }
        debug!("{} -> cluster {}", node.id, nearest);
        node.cluster_id = Some(nearest);
    }
}
