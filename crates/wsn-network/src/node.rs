//! A single simulated sensor/relay device.

use wsn_core::{NodeId, Position};

/// A node's place in the two-level cluster hierarchy, derived from
/// `is_cluster_head` and `cluster_id`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    /// Routes directly to the base station.
    ClusterHead,
    /// Routes through exactly one cluster head.
    Member(NodeId),
    /// Neither head nor member (inactive at init, or no head existed).
    Unassigned,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id:                      NodeId,
    /// Fixed at creation.
    pub position:                Position,
    pub is_cluster_head:         bool,
    /// `false` once the battery reaches 0.  Never flips back outside reset.
    pub active:                  bool,
    /// Percentage in `[0, 100]`; non-increasing while the node lives.
    pub battery:                 f64,
    /// Head this node routes through.  `None` for heads and unassigned nodes.
    pub cluster_id:              Option<NodeId>,
    /// Synthetic mAh/hour rate; heads run higher than members.
    pub energy_consumption_rate: f64,
}

impl Node {
    pub fn role(&self) -> Role {
        match (self.is_cluster_head, self.cluster_id) {
            (true, _)         => Role::ClusterHead,
            (false, Some(ch)) => Role::Member(ch),
            (false, None)     => Role::Unassigned,
        }
    }

    /// Active and currently acting as a head.
    #[inline]
    pub fn is_active_head(&self) -> bool {
        self.active && self.is_cluster_head
    }

    /// `true` if this node routes through `head`.
    #[inline]
    pub fn is_member_of(&self, head: NodeId) -> bool {
        self.cluster_id == Some(head)
    }

    /// Take on head duties: flag set, cluster link cleared.
    pub(crate) fn promote(&mut self) {
        self.is_cluster_head = true;
        self.cluster_id = None;
    }
}
