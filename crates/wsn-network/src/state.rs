//! `NetworkState`: the node collection plus cumulative traffic/energy
//! counters.

use rustc_hash::FxHashMap;
use wsn_core::NodeId;

use crate::Node;

/// Aggregate network model.
///
/// `nodes` keeps creation order for stable rendering; node `k` (1-based) is
/// normally at offset `k - 1`, but lookups fall back to a scan so callers may
/// reorder the vector freely.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkState {
    pub nodes:                 Vec<Node>,
    /// Cumulative; never decreases.
    pub messages_transmitted:  u64,
    /// Cumulative; never decreases.
    pub total_energy_consumed: f64,
}

impl NetworkState {
    /// An empty network with zeroed counters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap `nodes` with zeroed counters.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes, ..Self::default() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Offset of `id` in `nodes`.
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        if let Some(i) = id.zero_based() {
            if self.nodes.get(i).is_some_and(|n| n.id == id) {
                return Some(i);
            }
        }
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.position_of(id).map(|i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.position_of(id).map(move |i| &mut self.nodes[i])
    }

    pub fn active_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.active).count()
    }

    /// Nodes flagged as head, active or not.
    pub fn cluster_heads(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_cluster_head)
    }

    pub fn active_head_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_active_head()).count()
    }

    /// Nodes whose `cluster_id` points at `head`.
    pub fn members_of(&self, head: NodeId) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.is_member_of(head))
    }

    /// Re-point every node routed through `from` to `to`.  Returns how many
    /// nodes moved.
    pub fn reassign_members(&mut self, from: NodeId, to: NodeId) -> usize {
        let mut moved = 0;
        for node in self.nodes.iter_mut().filter(|n| n.cluster_id == Some(from)) {
            node.cluster_id = Some(to);
            moved += 1;
        }
        moved
    }

    /// Member count per `cluster_id`, including ids that point at a dead head.
    pub fn cluster_sizes(&self) -> FxHashMap<NodeId, usize> {
        let mut sizes: FxHashMap<NodeId, usize> = FxHashMap::default();
        for ch in self.nodes.iter().filter_map(|n| n.cluster_id) {
            *sizes.entry(ch).or_default() += 1;
        }
        sizes
    }

    /// Cluster ids still referenced by members but whose head is inactive or
    /// no longer a head.  Sorted ascending.
    pub fn headless_clusters(&self) -> Vec<NodeId> {
        let mut headless: Vec<NodeId> = self
            .cluster_sizes()
            .into_keys()
            .filter(|&ch| !self.node(ch).is_some_and(Node::is_active_head))
            .collect();
        headless.sort_unstable();
        headless
    }

    /// Mean battery over active nodes; 0 for an all-dead network.
    pub fn mean_active_battery(&self) -> f64 {
        let (sum, count) = self
            .nodes
            .iter()
            .filter(|n| n.active)
            .fold((0.0, 0usize), |(s, c), n| (s + n.battery, c + 1));
        if count == 0 { 0.0 } else { sum / count as f64 }
    }

    /// Fold a per-operation delta into the cumulative counters.
    pub(crate) fn accumulate(&mut self, messages: u64, energy: f64) {
        self.messages_transmitted += messages;
        self.total_energy_consumed += energy.max(0.0);
    }
}
