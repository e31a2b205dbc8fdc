//! Truth assignments and their extraction from an SCC decomposition.

use crate::sat::literal::{Literal, Variable};
use crate::sat::scc::Components;
use core::fmt;
use core::ops::{Index, IndexMut};
use itertools::Itertools;
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    pub const fn is_assigned(&self) -> bool {
        matches!(self, VarState::Assigned(_))
    }

    pub const fn is_unassigned(&self) -> bool {
        !self.is_assigned()
    }

    pub const fn is_true(&self) -> bool {
        matches!(self, VarState::Assigned(true))
    }

    pub const fn is_false(&self) -> bool {
        matches!(self, VarState::Assigned(false))
    }

    pub const fn value(&self) -> Option<bool> {
        match self {
            VarState::Assigned(b) => Some(*b),
            VarState::Unassigned => None,
        }
    }
}

/// Model as a list of signed literals, one per assigned variable.
pub type Solutions = Vec<i32>;

/// A mapping from variables `1..=n` to truth values. Partial while it is being
/// built, total once the solver reports a model.
///
/// Slot `0` is unused so that a variable indexes the vector directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<VarState>);

impl Index<Variable> for Assignment {
    type Output = VarState;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index as usize]
    }
}

impl IndexMut<Variable> for Assignment {
    fn index_mut(&mut self, index: Variable) -> &mut Self::Output {
        &mut self.0[index as usize]
    }
}

impl Assignment {
    pub fn new(n: usize) -> Self {
        Assignment(vec![VarState::Unassigned; n + 1])
    }

    /// Number of variables this assignment ranges over.
    pub fn num_vars(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn set(&mut self, var: Variable, b: bool) {
        self[var] = VarState::Assigned(b);
    }

    /// Makes `lit` true, and therefore its negation false.
    pub fn set_literal(&mut self, lit: Literal) {
        self.set(lit.variable(), lit.polarity());
    }

    pub fn var_value(&self, var: Variable) -> Option<bool> {
        self.0.get(var as usize).and_then(VarState::value)
    }

    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.var_value(lit.variable()).map(|b| lit.eval(b))
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().skip(1).all(VarState::is_assigned)
    }

    /// `(variable, state)` pairs in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, VarState)> + '_ {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, s)| (i as Variable, *s))
    }

    /// The model as signed literals: `v` for true, `-v` for false.
    pub fn get_solutions(&self) -> Solutions {
        self.iter()
            .filter_map(|(v, s)| {
                let v = i32::try_from(v).ok()?;
                s.value().map(|b| if b { v } else { -v })
            })
            .collect()
    }

    /// Values in ascending variable order, `None` for unassigned variables.
    pub fn values(&self) -> Vec<Option<bool>> {
        self.iter().map(|(_, s)| s.value()).collect()
    }

    /// Reads a model off an SCC decomposition free of contradictions.
    ///
    /// Components are walked against their emission order, so every component
    /// is visited after all components it implies. The first literal seen for a
    /// variable is made true; later occurrences of the same variable are skipped.
    pub fn from_components(components: &Components, num_vars: usize) -> Self {
        let mut assignment = Assignment::new(num_vars);

        for (id, component) in components.iter().enumerate().rev() {
            for &lit in component {
                if (lit.variable() as usize) > num_vars {
                    continue;
                }
                if assignment[lit.variable()].is_unassigned() {
                    trace!("component {id}: {lit} := true");
                    assignment.set_literal(lit);
                }
            }
        }

        assignment
    }
}

impl fmt::Display for Assignment {
    /// `1`/`0` per variable in ascending order, space separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens = self.iter().map(|(_, s)| match s {
            VarState::Assigned(true) => "1",
            VarState::Assigned(false) => "0",
            VarState::Unassigned => "?",
        });
        write!(f, "{}", tokens.format(" "))
    }
}
