//! Unit tests for wsn-network.

use wsn_core::{NodeId, Position, SimRng};

use crate::{NetworkState, Node};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn node(id: u32, battery: f64, head: bool, cluster: Option<u32>) -> Node {
    Node {
        id:                      NodeId(id),
        position:                Position::new(id as f64 * 0.05, 0.5),
        is_cluster_head:         head,
        active:                  true,
        battery,
        cluster_id:              cluster.map(NodeId),
        energy_consumption_rate: if head { 1.5 } else { 1.0 },
    }
}

/// Head 1 with members 2..=4, head 5 with member 6.
fn two_clusters(head1_battery: f64) -> NetworkState {
    NetworkState::from_nodes(vec![
        node(1, head1_battery, true, None),
        node(2, 60.0, false, Some(1)),
        node(3, 90.0, false, Some(1)),
        node(4, 15.0, false, Some(1)),
        node(5, 95.0, true, None),
        node(6, 99.0, false, Some(5)),
    ])
}

// ── Election ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod election_tests {
    use super::*;
    use crate::{Pick, elect};

    #[test]
    fn highest_battery_wins() {
        let state = two_clusters(50.0);
        let i = elect(&state.nodes, |n| n.is_member_of(NodeId(1)), Pick::HighestBattery);
        assert_eq!(i.map(|i| state.nodes[i].id), Some(NodeId(3)));
    }

    #[test]
    fn first_node_wins_a_tie() {
        let state = NetworkState::from_nodes(vec![
            node(1, 80.0, false, None),
            node(2, 80.0, false, None),
        ]);
        assert_eq!(elect(&state.nodes, |_| true, Pick::HighestBattery), Some(0));
    }

    #[test]
    fn empty_pool_elects_nobody() {
        let state = two_clusters(50.0);
        let mut rng = SimRng::new(1);
        assert_eq!(elect(&state.nodes, |n| n.battery > 100.0, Pick::HighestBattery), None);
        assert_eq!(elect(&state.nodes, |n| n.battery > 100.0, Pick::Random(&mut rng)), None);
    }

    #[test]
    fn random_pick_respects_predicate() {
        let state = two_clusters(50.0);
        let mut rng = SimRng::new(9);
        for _ in 0..200 {
            let i = elect(&state.nodes, |n| n.battery > 80.0, Pick::Random(&mut rng)).unwrap();
            assert!(state.nodes[i].battery > 80.0);
        }
    }
}

// ── Initializer ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod init_tests {
    use super::*;
    use crate::init::{HEAD_MIN_BATTERY, head_target};
    use crate::initialize;

    #[test]
    fn head_target_rounds_up() {
        assert_eq!(head_target(0), 1);
        assert_eq!(head_target(1), 1);
        assert_eq!(head_target(10), 1);
        assert_eq!(head_target(11), 2);
        assert_eq!(head_target(20), 2);
        assert_eq!(head_target(30), 3);
        assert_eq!(head_target(95), 10);
    }

    #[test]
    fn twenty_nodes_two_heads() {
        let mut rng = SimRng::new(42);
        let state = initialize(20, &mut rng);
        assert_eq!(state.len(), 20);
        assert_eq!(state.cluster_heads().count(), 2);
        assert_eq!(state.messages_transmitted, 0);
        assert_eq!(state.total_energy_consumed, 0.0);
    }

    #[test]
    fn zero_nodes_is_empty() {
        let mut rng = SimRng::new(42);
        let state = initialize(0, &mut rng);
        assert!(state.is_empty());
        assert_eq!(state.cluster_heads().count(), 0);
    }

    #[test]
    fn fields_in_range_across_seeds() {
        for seed in 0..50 {
            let mut rng = SimRng::new(seed);
            let n = 1 + (seed as usize * 7) % 60;
            let state = initialize(n, &mut rng);
            assert_eq!(state.len(), n);

            for (i, node) in state.nodes.iter().enumerate() {
                assert_eq!(node.id, NodeId(i as u32 + 1));
                assert!((50.0..=100.0).contains(&node.battery), "battery {}", node.battery);
                assert!((0.0..1.0).contains(&node.position.x));
                assert!((0.0..1.0).contains(&node.position.y));
                assert!(node.energy_consumption_rate >= 0.5);
            }

            let eligible = state
                .nodes
                .iter()
                .filter(|n| n.active && n.battery > HEAD_MIN_BATTERY)
                .count();
            assert_eq!(
                state.cluster_heads().count(),
                head_target(n).min(eligible),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn heads_pay_rate_increment() {
        let mut rng = SimRng::new(3);
        let state = initialize(50, &mut rng);
        for head in state.cluster_heads() {
            assert!(head.energy_consumption_rate >= 1.0);
            assert!(head.active);
            assert!(head.battery > HEAD_MIN_BATTERY);
            assert_eq!(head.cluster_id, None);
        }
    }

    #[test]
    fn members_join_nearest_head() {
        let mut rng = SimRng::new(11);
        let state = initialize(40, &mut rng);
        let heads: Vec<&Node> = state.cluster_heads().collect();
        assert!(!heads.is_empty());

        for n in state.nodes.iter().filter(|n| !n.is_cluster_head) {
            if !n.active {
                assert_eq!(n.cluster_id, None, "inactive nodes stay unassigned");
                continue;
            }
            let ch = state.node(n.cluster_id.unwrap()).unwrap();
            let assigned = n.position.distance(ch.position);
            for h in &heads {
                assert!(assigned <= n.position.distance(h.position) + 1e-12);
            }
        }
    }
}

// ── Tick ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;
    use crate::{initialize, rotate_cluster_heads, tick};

    #[test]
    fn drain_ranges_by_role() {
        let mut state = two_clusters(50.0);
        let before = state.clone();
        let mut rng = SimRng::new(5);
        let report = tick(&mut state, &mut rng);

        for (b, a) in before.nodes.iter().zip(&state.nodes) {
            let drop = b.battery - a.battery;
            if b.is_cluster_head {
                assert!((0.2..0.5).contains(&drop), "head drop {drop}");
            } else {
                assert!((0.05..0.20).contains(&drop), "member drop {drop}");
            }
        }
        assert!(report.depleted.is_empty());
        // 6 active nodes → 3 readings.
        assert_eq!(report.messages_delta, 3);
        assert_eq!(state.messages_transmitted, 3);
        assert!((state.total_energy_consumed - report.energy_delta).abs() < 1e-12);
    }

    #[test]
    fn readings_round_half_up() {
        let mut state = NetworkState::from_nodes(vec![
            node(1, 90.0, true, None),
            node(2, 90.0, false, Some(1)),
            node(3, 90.0, false, Some(1)),
        ]);
        let report = tick(&mut state, &mut SimRng::new(0));
        assert_eq!(report.messages_delta, 2);
    }

    #[test]
    fn inactive_nodes_do_not_drain() {
        let mut state = two_clusters(50.0);
        state.nodes[1].active = false;
        tick(&mut state, &mut SimRng::new(1));
        assert_eq!(state.nodes[1].battery, 60.0);
    }

    #[test]
    fn depleted_head_succeeded_by_strongest_member() {
        let mut state = two_clusters(0.01);
        // A stronger but inactive member must be ignored.
        state.nodes.push(Node { active: false, ..node(7, 97.0, false, Some(1)) });

        let report = tick(&mut state, &mut SimRng::new(2));

        assert_eq!(report.depleted, vec![NodeId(1)]);
        assert_eq!(
            report.successions,
            vec![crate::Succession { depleted: NodeId(1), successor: NodeId(3) }]
        );

        let old = state.node(NodeId(1)).unwrap();
        assert!(!old.active);
        assert_eq!(old.battery, 0.0);

        let new = state.node(NodeId(3)).unwrap();
        assert!(new.is_cluster_head);
        assert_eq!(new.cluster_id, None);

        for id in [2, 4, 7] {
            assert_eq!(state.node(NodeId(id)).unwrap().cluster_id, Some(NodeId(3)));
        }
        // Other cluster untouched.
        assert_eq!(state.node(NodeId(6)).unwrap().cluster_id, Some(NodeId(5)));
        // 5 active nodes → 3 readings, plus 3 for the succession.
        assert_eq!(report.messages_delta, 3 + 3);
    }

    #[test]
    fn no_eligible_successor_leaves_cluster_headless() {
        let mut state = NetworkState::from_nodes(vec![
            node(1, 0.01, true, None),
            node(2, 15.0, false, Some(1)),
            node(3, 20.0, false, Some(1)),
        ]);
        let report = tick(&mut state, &mut SimRng::new(4));

        assert!(report.successions.is_empty());
        assert_eq!(report.headless, vec![NodeId(1)]);
        assert_eq!(state.node(NodeId(2)).unwrap().cluster_id, Some(NodeId(1)));
        assert_eq!(state.node(NodeId(3)).unwrap().cluster_id, Some(NodeId(1)));
        assert_eq!(state.headless_clusters(), vec![NodeId(1)]);

        // Later ticks do not repair it.
        for _ in 0..10 {
            tick(&mut state, &mut SimRng::new(4));
        }
        assert_eq!(state.headless_clusters(), vec![NodeId(1)]);
    }

    #[test]
    fn forced_low_head_has_exactly_one_succession() {
        let mut rng = SimRng::new(42);
        let mut state = initialize(20, &mut rng);
        assert_eq!(state.cluster_heads().count(), 2);

        let head = state
            .cluster_heads()
            .max_by_key(|h| state.members_of(h.id).count())
            .map(|h| h.id)
            .unwrap();
        state.node_mut(head).unwrap().battery = 5.0;

        let mut successions = Vec::new();
        for _ in 0..100 {
            let former: Vec<NodeId> = state.members_of(head).map(|n| n.id).collect();
            let report = tick(&mut state, &mut rng);
            if !report.successions.is_empty() {
                assert_eq!(report.successions.len(), 1);
                let s = report.successions[0];
                assert_eq!(s.depleted, head);
                assert!(former.contains(&s.successor));
                for id in former.iter().filter(|&&id| id != s.successor) {
                    assert_eq!(state.node(*id).unwrap().cluster_id, Some(s.successor));
                }
            }
            successions.extend(report.successions);
            if !state.node(head).unwrap().active {
                break;
            }
        }
        assert!(!state.node(head).unwrap().active);
        assert_eq!(successions.len(), 1);
    }

    #[test]
    fn battery_and_counters_are_monotonic() {
        let mut rng = SimRng::new(77);
        let mut state = initialize(60, &mut rng);

        for step in 0..600 {
            let before = state.clone();
            if step % 25 == 0 {
                rotate_cluster_heads(&mut state);
            } else {
                tick(&mut state, &mut rng);
            }

            assert!(state.messages_transmitted >= before.messages_transmitted);
            assert!(state.total_energy_consumed >= before.total_energy_consumed);
            for (b, a) in before.nodes.iter().zip(&state.nodes) {
                assert!((0.0..=100.0).contains(&a.battery));
                assert!(a.battery <= b.battery);
                assert!(a.energy_consumption_rate >= 0.0);
                if !b.active {
                    assert!(!a.active, "inactive is irreversible");
                }
                if a.is_cluster_head {
                    assert_eq!(a.cluster_id, None);
                }
            }
        }
    }
}

// ── Rotation ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rotation_tests {
    use super::*;
    use crate::rotation::DEMOTION_RATE_DECREMENT;
    use crate::{Rotation, initialize, rotate_cluster_heads, tick};

    #[test]
    fn low_head_rotated_to_strongest_member() {
        let mut state = two_clusters(25.0);
        state.nodes.push(node(7, 80.0, false, Some(1)));

        let report = rotate_cluster_heads(&mut state);

        assert_eq!(report.rotations, vec![Rotation { retired: NodeId(1), promoted: NodeId(3) }]);
        assert_eq!(report.messages_delta, 5);
        assert!((report.energy_delta - 0.1).abs() < 1e-12);
        assert_eq!(state.messages_transmitted, 5);

        let old = state.node(NodeId(1)).unwrap();
        assert!(!old.is_cluster_head);
        assert!(old.active, "rotation never deactivates");
        assert_eq!(old.cluster_id, Some(NodeId(3)));
        assert!((old.energy_consumption_rate - (1.5 - DEMOTION_RATE_DECREMENT)).abs() < 1e-12);

        let new = state.node(NodeId(3)).unwrap();
        assert!(new.is_cluster_head);
        assert_eq!(new.cluster_id, None);
        assert!((new.energy_consumption_rate - 1.5).abs() < 1e-12);

        for id in [2, 4, 7] {
            assert_eq!(state.node(NodeId(id)).unwrap().cluster_id, Some(NodeId(3)));
        }
        assert_eq!(state.node(NodeId(5)).unwrap().battery, 95.0);
    }

    #[test]
    fn head_without_candidate_left_in_place() {
        let mut state = NetworkState::from_nodes(vec![
            node(1, 10.0, true, None),
            node(2, 70.0, false, Some(1)),
            node(3, 50.0, false, Some(1)),
        ]);
        let before = state.clone();
        let report = rotate_cluster_heads(&mut state);

        assert!(report.rotations.is_empty());
        assert_eq!(report.skipped, vec![NodeId(1)]);
        assert_eq!(state, before);
    }

    #[test]
    fn healthy_heads_ignored() {
        let mut state = two_clusters(30.0);
        let report = rotate_cluster_heads(&mut state);
        assert!(report.rotations.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn rotation_heals_headless_cluster() {
        let mut state = NetworkState::from_nodes(vec![
            node(1, 0.01, true, None),
            node(2, 15.0, false, Some(1)),
        ]);
        tick(&mut state, &mut SimRng::new(0));
        assert_eq!(state.headless_clusters(), vec![NodeId(1)]);

        state.nodes.push(node(3, 85.0, false, Some(1)));
        let report = rotate_cluster_heads(&mut state);
        assert_eq!(report.rotations.len(), 1);
        assert!(state.headless_clusters().is_empty());
        assert_eq!(state.active_head_count(), 1);
    }

    #[test]
    fn never_reduces_active_heads() {
        for seed in 0..20 {
            let mut rng = SimRng::new(seed);
            let mut state = initialize(50, &mut rng);
            for _ in 0..150 {
                tick(&mut state, &mut rng);
            }
            for h in state.nodes.iter_mut().filter(|n| n.is_active_head()) {
                h.battery = h.battery.min(20.0);
            }
            let before = state.active_head_count();
            rotate_cluster_heads(&mut state);
            assert!(state.active_head_count() >= before, "seed {seed}");
        }
    }
}

// ── Forecast ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod forecast_tests {
    use super::*;
    use crate::EnergyForecast;

    #[test]
    fn group_averages_and_projection() {
        let state = two_clusters(50.0);
        let f = EnergyForecast::from_state(&state);

        assert_eq!(f.head_count, 2);
        assert_eq!(f.regular_count, 4);
        assert!((f.avg_head_battery - 72.5).abs() < 1e-12);
        assert!((f.avg_regular_battery - 66.0).abs() < 1e-12);
        assert!((f.projected_head_battery[0] - 71.3).abs() < 1e-9);
        assert!((f.projected_regular_battery[2] - 63.9).abs() < 1e-9);
        assert!((f.projected_head_rate[1] - 1.5 * 1.2).abs() < 1e-12);
        assert!((f.projected_regular_rate[0] - 1.05).abs() < 1e-12);
    }

    #[test]
    fn empty_network_forecasts_zero() {
        let f = EnergyForecast::from_state(&NetworkState::empty());
        assert_eq!(f.avg_head_battery, 0.0);
        assert_eq!(f.projected_regular_battery, [0.0; 3]);
    }

    #[test]
    fn projection_floors_at_zero() {
        let state = NetworkState::from_nodes(vec![node(1, 1.0, true, None)]);
        let f = EnergyForecast::from_state(&state);
        assert_eq!(f.projected_head_battery, [0.0, 0.0, 0.0]);
    }
}
