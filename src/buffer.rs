use crate::cand::{BufPlace, Frontier};
use crate::params::BufferParams;

/// Forks the frontier at `(parent_id, child_id, len_from_child)`: the result
/// is the union of the unmodified frontier (no buffer here) and, for every
/// candidate, a new candidate that inserts a buffer at this point. At most
/// doubles the frontier's cardinality.
pub fn consider(
    frontier: &Frontier,
    buffer: BufferParams,
    parent_id: usize,
    child_id: usize,
    len_from_child: usize,
) -> Frontier {
    let mut out = Vec::with_capacity(frontier.len() * 2);
    out.extend(frontier.iter().cloned());

    let place = BufPlace {
        parent_id,
        child_id,
        len_from_child,
    };
    for cand in frontier {
        let mut buffered = cand.clone();
        buffered.rat = cand.rat - buffer.r_drive * cand.c - buffer.intrinsic_delay;
        buffered.c = buffer.c_in;
        buffered.placements = cand.placements.pushed(place);
        out.push(buffered);
    }
    out
}
