use crate::cand::{Cand, Frontier};

/// Removes dominated candidates from a frontier: after pruning, no surviving
/// candidate has both a smaller-or-equal `c` and a greater-or-equal `rat`
/// than another. The result is sorted by strictly increasing `c` and
/// strictly increasing `rat`.
///
/// Implemented as a single forward scan over the frontier sorted by `c`
/// ascending, maintaining a result stack: a later candidate is admitted only
/// if it beats the current top on `rat`, and admitting it may retire the top
/// (when the two tie on `c`). Because the stack is kept Pareto-maximal at
/// every step, comparing only against the current top is sufficient.
pub fn prune(frontier: Frontier) -> Frontier {
    let before = frontier.len();
    let mut sorted = frontier;
    sorted.sort_by(|a, b| a.c.partial_cmp(&b.c).expect("c must not be NaN"));

    let mut result: Vec<Cand> = Vec::with_capacity(sorted.len());
    for cand in sorted {
        let mut cand = Some(cand);
        while let Some(c) = cand.take() {
            match result.last() {
                None => {
                    result.push(c);
                }
                Some(top) if top.c < c.c => {
                    if top.rat < c.rat {
                        result.push(c);
                    }
                    // else: c is dominated by top, drop it.
                }
                Some(top) => {
                    debug_assert_eq!(top.c, c.c);
                    if top.rat >= c.rat {
                        // c is dominated (or an exact duplicate), drop it.
                    } else {
                        // top is dominated by c: retire it and re-compare c
                        // against whatever is now on top (if anything).
                        result.pop();
                        cand = Some(c);
                    }
                }
            }
        }
    }
    log::trace!("pruned frontier {} -> {}", before, result.len());
    result
}
