//! Detection of a variable whose two literals share a strongly connected
//! component. Such a variable must be both true and false, so the formula is
//! unsatisfiable; without one a model always exists.

use crate::sat::literal::{Literal, Variable};
use crate::sat::scc::Components;
use log::trace;
use rustc_hash::FxHashSet;

/// A variable found together with its negation in one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contradiction {
    pub variable: Variable,
    /// Emission position of the offending component.
    pub component: usize,
}

/// Returns the first contradiction found, scanning components in emission
/// order. Each component is checked in linear time with a set of the literal
/// values already seen in it.
#[must_use]
pub fn find_contradiction(components: &Components) -> Option<Contradiction> {
    let mut seen: FxHashSet<Literal> = FxHashSet::default();

    for (id, component) in components.iter().enumerate() {
        seen.clear();
        for &lit in component {
            if seen.contains(&lit.negated()) {
                trace!("component {id} holds both {lit} and {}", lit.negated());
                return Some(Contradiction {
                    variable: lit.variable(),
                    component: id,
                });
            }
            seen.insert(lit);
        }
    }

    None
}

/// `true` iff some component holds a literal together with its negation.
#[must_use]
pub fn is_contradictory(components: &Components) -> bool {
    find_contradiction(components).is_some()
}
