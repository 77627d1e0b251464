use crate::cand::Frontier;
use crate::params::WireParams;

/// Extends every candidate of a frontier across one unit length of wire,
/// applying the Elmore RC delay update in place. Frontier cardinality and
/// placement lists are unchanged.
pub fn extend(frontier: &mut Frontier, wire: WireParams) {
    for cand in frontier.iter_mut() {
        cand.rat -= wire.r_per_unit * wire.c_per_unit / 2.0 + wire.r_per_unit * cand.c;
        cand.c += wire.c_per_unit;
    }
}
