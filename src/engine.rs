use crate::buffer;
use crate::cand::{BufPlace, Frontier};
use crate::error::{Error, Result};
use crate::merge;
use crate::params::{BufferParams, WireParams};
use crate::prune;
use crate::tree::{NodeKind, Tree};
use crate::wire;

/// The Van Ginneken engine's answer: the RAT and capacitance seen at the
/// driver under the winning solution, and the concrete buffer placements
/// that achieve it.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub rat: f64,
    pub c: f64,
    pub placements: Vec<BufPlace>,
}

/// Runs the Van Ginneken dynamic program over `tree`, maximizing the RAT
/// seen at the driver, and returns the winning solution.
///
/// The post-order recursion seeds a single-candidate frontier at each sink,
/// walks it edge by edge toward the driver (one [`wire::extend`] plus a
/// [`buffer::consider`] fork per unit length, pruned at every step), and
/// merges sibling frontiers at every branching node. At the driver a buffer
/// is mandatory: see [`Error::MalformedTree`] below for the only way this
/// can fail on a well-formed tree.
pub fn solve(tree: &Tree, wire: WireParams, buffer: BufferParams) -> Result<Solution> {
    log::info!("solving Van Ginneken buffer insertion over {} nodes", tree.len());

    let root = tree.root();
    let frontier = solve_node(tree, root, wire, buffer);

    let driver_place = BufPlace {
        parent_id: 0,
        child_id: 0,
        len_from_child: 0,
    };
    let forked = buffer::consider(&frontier, buffer, 0, 0, 0);
    let mut at_driver: Frontier = forked
        .into_iter()
        .filter(|cand| cand.placements.last() == Some(driver_place))
        .collect();
    at_driver = prune::prune(at_driver);

    if at_driver.is_empty() {
        debug_assert!(
            false,
            "frontier at the driver is empty after the mandatory buffer filter; \
             every sink contributes at least one candidate by construction, so \
             this can only happen on a tree TreeBuilder should have rejected"
        );
        return Err(Error::malformed_tree(
            "no feasible solution: frontier at the driver was empty after \
             inserting the mandatory driver buffer",
        ));
    }

    let best = at_driver
        .into_iter()
        .max_by(|a, b| a.rat.partial_cmp(&b.rat).expect("rat must not be NaN"))
        .expect("checked non-empty above");

    log::info!("solved: rat={} c={} buffers={}", best.rat, best.c, best.placements.to_vec().len());

    Ok(Solution {
        rat: best.rat,
        c: best.c,
        placements: best.placements.to_vec(),
    })
}

/// Computes the frontier at `node_id`, as seen from its parent's side of the
/// tree (i.e. at offset 0 of whatever edge connects `node_id` to its
/// parent).
fn solve_node(tree: &Tree, node_id: usize, wire: WireParams, buffer: BufferParams) -> Frontier {
    let node = tree.node(node_id);
    match node.kind {
        NodeKind::Sink { c_load, rat } => {
            log::debug!("sink {node_id}: c={c_load} rat={rat}");
            vec![crate::cand::Cand::new(c_load, rat)]
        }
        NodeKind::Driver | NodeKind::Steiner => {
            let mut child_frontiers = Vec::with_capacity(node.children.len());
            for &(child_id, length) in &node.children {
                let child_frontier = solve_node(tree, child_id, wire, buffer);
                let child_is_sink =
                    matches!(tree.node(child_id).kind, NodeKind::Sink { .. });
                let walked = walk_edge(
                    child_frontier,
                    wire,
                    buffer,
                    node_id,
                    child_id,
                    length,
                    child_is_sink,
                );
                child_frontiers.push(walked);
            }
            let merged = prune::prune(merge::merge_all(child_frontiers));
            log::debug!("node {node_id}: merged frontier size={}", merged.len());
            merged
        }
    }
}

/// Walks a child's frontier across its edge to the parent, applying WireOp
/// and a pruned BufferOp fork at every candidate unit offset. Sink-terminated
/// edges consider buffer offsets `1..=length`; Steiner/driver-terminated
/// edges consider `0..length` (avoiding a buffer trial coincident with the
/// next node). A zero-length edge only considers a buffer at offset 0.
fn walk_edge(
    mut frontier: Frontier,
    wire: WireParams,
    buffer: BufferParams,
    parent_id: usize,
    child_id: usize,
    length: usize,
    child_is_sink: bool,
) -> Frontier {
    if length == 0 {
        frontier = buffer::consider(&frontier, buffer, parent_id, child_id, 0);
        return prune::prune(frontier);
    }

    if child_is_sink {
        for k in 1..=length {
            wire::extend(&mut frontier, wire);
            frontier = buffer::consider(&frontier, buffer, parent_id, child_id, k);
            frontier = prune::prune(frontier);
        }
    } else {
        for k in 0..length {
            wire::extend(&mut frontier, wire);
            frontier = buffer::consider(&frontier, buffer, parent_id, child_id, k);
            frontier = prune::prune(frontier);
        }
    }
    frontier
}
