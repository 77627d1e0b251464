use std::rc::Rc;

/// A single buffer insertion: a buffer sits on edge `(parent_id, child_id)`,
/// `len_from_child` unit steps from the child end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufPlace {
    pub parent_id: usize,
    pub child_id: usize,
    pub len_from_child: usize,
}

/// A persistent, `Rc`-shared cons list of [`BufPlace`]s.
///
/// Exponentially many candidates share long common placement prefixes before
/// pruning collapses them; appending to a plain `Vec` on every wire/buffer
/// step would make that sharing cost O(n) per step. Appending to a cons list
/// is O(1) and shares structure with every candidate that has not yet
/// diverged.
#[derive(Debug, Clone, Default)]
pub struct Placements(Option<Rc<PlacementNode>>);

#[derive(Debug)]
struct PlacementNode {
    place: BufPlace,
    rest: Placements,
}

impl Placements {
    pub fn new() -> Self {
        Placements(None)
    }

    /// Returns a new list with `place` appended after everything in `self`.
    pub fn pushed(&self, place: BufPlace) -> Self {
        Placements(Some(Rc::new(PlacementNode {
            place,
            rest: self.clone(),
        })))
    }

    /// The most recently appended placement, if any.
    pub fn last(&self) -> Option<BufPlace> {
        self.0.as_ref().map(|node| node.place)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Concatenates `other` onto the end of `self`, preserving order:
    /// `self`'s placements first, then `other`'s.
    pub fn concat(&self, other: &Placements) -> Self {
        let mut prefix: Vec<BufPlace> = self.to_vec();
        prefix.extend(other.to_vec());
        Placements::from_vec(prefix)
    }

    pub fn to_vec(&self) -> Vec<BufPlace> {
        let mut out = Vec::new();
        let mut cur = &self.0;
        // The list is built newest-first (each push conses onto the front),
        // so collecting and reversing restores insertion order.
        while let Some(node) = cur {
            out.push(node.place);
            cur = &node.rest.0;
        }
        out.reverse();
        out
    }

    pub fn from_vec(places: Vec<BufPlace>) -> Self {
        places
            .into_iter()
            .fold(Placements::new(), |acc, place| acc.pushed(place))
    }
}

/// A single frontier point: the downstream capacitance and required-arrival
/// time seen from a candidate point in the tree, together with the buffer
/// placements already committed below it.
#[derive(Debug, Clone)]
pub struct Cand {
    pub c: f64,
    pub rat: f64,
    pub placements: Placements,
}

impl Cand {
    pub fn new(c: f64, rat: f64) -> Self {
        Cand {
            c,
            rat,
            placements: Placements::new(),
        }
    }
}

/// Pointwise equality on `(c, rat)` only. Used in tests; production code
/// never uses `Cand` as a map key.
impl PartialEq for Cand {
    fn eq(&self, other: &Self) -> bool {
        self.c == other.c && self.rat == other.rat
    }
}

/// An unordered set of non-inferior [`Cand`]s at one point of the tree.
pub type Frontier = Vec<Cand>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placements_preserve_append_order() {
        let p = Placements::new()
            .pushed(BufPlace {
                parent_id: 0,
                child_id: 1,
                len_from_child: 0,
            })
            .pushed(BufPlace {
                parent_id: 1,
                child_id: 2,
                len_from_child: 3,
            });
        let v = p.to_vec();
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].child_id, 1);
        assert_eq!(v[1].child_id, 2);
        assert_eq!(p.last().unwrap().child_id, 2);
    }

    #[test]
    fn concat_preserves_left_then_right_order() {
        let a = Placements::new().pushed(BufPlace {
            parent_id: 0,
            child_id: 1,
            len_from_child: 0,
        });
        let b = Placements::new().pushed(BufPlace {
            parent_id: 0,
            child_id: 2,
            len_from_child: 0,
        });
        let merged = a.concat(&b);
        let v = merged.to_vec();
        assert_eq!(v[0].child_id, 1);
        assert_eq!(v[1].child_id, 2);
    }

    #[test]
    fn sharing_does_not_mutate_the_prefix() {
        let base = Placements::new().pushed(BufPlace {
            parent_id: 0,
            child_id: 1,
            len_from_child: 0,
        });
        let left = base.pushed(BufPlace {
            parent_id: 1,
            child_id: 2,
            len_from_child: 0,
        });
        let right = base.pushed(BufPlace {
            parent_id: 1,
            child_id: 3,
            len_from_child: 0,
        });
        assert_eq!(base.to_vec().len(), 1);
        assert_eq!(left.to_vec().len(), 2);
        assert_eq!(right.to_vec().len(), 2);
        assert_ne!(left.to_vec()[1].child_id, right.to_vec()[1].child_id);
    }
}
