//! Plain data row types written by output backends.

use wsn_core::{NodeId, Step};
use wsn_network::Node;
use wsn_sim::StepReport;

/// One node's state at a given step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSnapshotRow {
    pub step:            u64,
    pub node_id:         u32,
    pub x:               f64,
    pub y:               f64,
    pub is_cluster_head: bool,
    pub active:          bool,
    pub battery:         f64,
    /// Head this node reports to; `u32::MAX` for heads and unassigned nodes.
    pub cluster_id:      u32,
    pub energy_rate:     f64,
}

impl NodeSnapshotRow {
    pub fn from_node(step: Step, node: &Node) -> Self {
        Self {
            step:            step.0,
            node_id:         node.id.0,
            x:               node.position.x,
            y:               node.position.y,
            is_cluster_head: node.is_cluster_head,
            active:          node.active,
            battery:         node.battery,
            cluster_id:      node.cluster_id.unwrap_or(NodeId::INVALID).0,
            energy_rate:     node.energy_consumption_rate,
        }
    }
}

/// Aggregate counters after one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step:                  u64,
    pub action:                &'static str,
    pub active_nodes:          u64,
    pub cluster_heads:         u64,
    pub messages_transmitted:  u64,
    pub total_energy_consumed: f64,
}

impl From<&StepReport> for StepSummaryRow {
    fn from(report: &StepReport) -> Self {
        Self {
            step:                  report.step.0,
            action:                report.action.as_str(),
            active_nodes:          report.active_nodes as u64,
            cluster_heads:         report.active_heads as u64,
            messages_transmitted:  report.messages_transmitted,
            total_energy_consumed: report.total_energy_consumed,
        }
    }
}
