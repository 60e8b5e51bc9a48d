//! Candidate election shared by head selection, succession and rotation.
//!
//! All three call sites have the same shape: filter the node list by an
//! eligibility predicate, then pick one survivor.  Only the predicate and the
//! pick strategy vary, so they are the two parameters.

use wsn_core::SimRng;

use crate::Node;

/// How to choose among eligible candidates.
pub enum Pick<'r> {
    /// Uniformly at random (initial head selection).
    Random(&'r mut SimRng),
    /// Strictly highest battery; the earliest node wins a tie.
    HighestBattery,
}

/// Return the offset in `nodes` of the elected candidate, or `None` when no
/// node satisfies `eligible`.
pub fn elect<F>(nodes: &[Node], eligible: F, pick: Pick<'_>) -> Option<usize>
where
    F: Fn(&Node) -> bool,
{
    match pick {
        Pick::Random(rng) => {
            let pool: Vec<usize> = nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| eligible(n))
                .map(|(i, _)| i)
                .collect();
            rng.choose_index(pool.len()).map(|k| pool[k])
        }
        Pick::HighestBattery => {
            let mut best: Option<usize> = None;
            for (i, node) in nodes.iter().enumerate().filter(|(_, n)| eligible(n)) {
                match best {
                    Some(b) if nodes[b].battery >= node.battery => {}
                    _ => best = Some(i),
                }
            }
            best
        }
    }
}
