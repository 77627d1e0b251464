use crate::cand::{Cand, Frontier};
use crate::prune::prune;

/// Merges two frontiers, each already sorted by `c` ascending (as every
/// pruned frontier is). Walks both in lockstep, combining one candidate from
/// each side per step: `c` adds, `rat` takes the minimum, and placement
/// lists concatenate and never deduplicate, since the two subtrees are
/// disjoint.
///
/// The cursor on whichever side contributed the emitted minimum `rat`
/// advances; ties advance the left side. The walk stops as soon as either
/// side is exhausted, so it emits at most `a.len() + b.len() - 1` candidates;
/// the caller prunes the result down further.
pub fn merge(a: &Frontier, b: &Frontier) -> Frontier {
    let mut result = Vec::with_capacity(a.len() + b.len());
    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        let left = &a[i];
        let right = &b[j];
        let rat = left.rat.min(right.rat);
        let cand = Cand {
            c: left.c + right.c,
            rat,
            placements: left.placements.concat(&right.placements),
        };
        result.push(cand);
        if left.rat <= right.rat {
            i += 1;
        } else {
            j += 1;
        }
    }
    log::trace!("merged frontiers of size {} and {} into {}", a.len(), b.len(), result.len());
    result
}

/// Folds [`merge`] across `K >= 1` per-child frontiers, pruning after every
/// pairwise step. For a single child the frontier is returned unchanged.
pub fn merge_all(frontiers: Vec<Frontier>) -> Frontier {
    let mut iter = frontiers.into_iter();
    let Some(mut acc) = iter.next() else {
        return Vec::new();
    };
    for next in iter {
        acc = prune(merge(&acc, &next));
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cand::BufPlace;

    fn cand(c: f64, rat: f64) -> Cand {
        Cand::new(c, rat)
    }

    #[test]
    fn merges_sums_c_and_takes_min_rat() {
        let a = vec![cand(1.0, 10.0), cand(2.0, 20.0)];
        let b = vec![cand(1.0, 5.0), cand(3.0, 30.0)];
        let merged = merge(&a, &b);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].c, 2.0);
        assert_eq!(merged[0].rat, 5.0);
    }

    #[test]
    fn concatenates_placements_without_deduplication() {
        let mut a0 = cand(1.0, 1.0);
        a0.placements = a0.placements.pushed(BufPlace {
            parent_id: 0,
            child_id: 1,
            len_from_child: 0,
        });
        let mut b0 = cand(1.0, 1.0);
        b0.placements = b0.placements.pushed(BufPlace {
            parent_id: 0,
            child_id: 2,
            len_from_child: 0,
        });
        let merged = merge(&[a0], &[b0]);
        assert_eq!(merged[0].placements.to_vec().len(), 2);
    }

    #[test]
    fn bounded_by_sum_of_lengths() {
        let a = vec![cand(1.0, 1.0), cand(2.0, 2.0), cand(3.0, 3.0)];
        let b = vec![cand(1.0, 1.0), cand(2.0, 2.0)];
        let merged = merge(&a, &b);
        assert!(merged.len() <= a.len() + b.len());
    }

    #[test]
    fn merge_all_single_child_is_unchanged() {
        let only = vec![cand(1.0, 1.0), cand(2.0, 2.0)];
        let merged = merge_all(vec![only.clone()]);
        assert_eq!(merged.len(), only.len());
    }

    #[test]
    fn merge_all_is_commutative_up_to_tie_break() {
        let a = vec![cand(1.0, 10.0)];
        let b = vec![cand(1.0, 5.0)];
        let c = vec![cand(1.0, 8.0)];
        let ab_c = merge_all(vec![a.clone(), b.clone(), c.clone()]);
        let c_ab = merge_all(vec![c, b, a]);
        let ab_c_pairs: Vec<(f64, f64)> = ab_c.iter().map(|x| (x.c, x.rat)).collect();
        let c_ab_pairs: Vec<(f64, f64)> = c_ab.iter().map(|x| (x.c, x.rat)).collect();
        assert_eq!(ab_c_pairs, c_ab_pairs);
    }
}
