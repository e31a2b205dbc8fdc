#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A 2-CNF formula: a conjunction of two-literal clauses.
//!
//! The number of variables is inferred as the largest variable index used by
//! any clause, unless a larger count is declared (e.g. by a DIMACS header), in
//! which case the extra variables are free and still receive a value.
//!
//! Literals are addressed densely, so the arena grows with the largest
//! variable index rather than the number of distinct variables. Formulas are
//! capped at [`MAX_VARIABLES`].

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::error::{Result, SolverError};
use crate::sat::literal::{Literal, Variable};
use core::fmt;
use itertools::Itertools;

/// Largest variable index a formula may use.
pub const MAX_VARIABLES: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    /// Variables are numbered `1..=num_vars`.
    pub num_vars: usize,
}

impl Cnf {
    /// Builds a formula from signed integer pairs.
    ///
    /// # Errors
    ///
    /// - `SolverError::MalformedClause` for the first pair containing a zero.
    /// - `SolverError::TooManyVariables` if a variable exceeds [`MAX_VARIABLES`].
    pub fn new(pairs: impl IntoIterator<Item = (i32, i32)>) -> Result<Self> {
        let clauses: Vec<Clause> = pairs
            .into_iter()
            .map(Clause::try_from)
            .collect::<Result<_>>()?;
        Self::from_clauses(clauses).within_limit()
    }

    /// Rejects a formula whose variable count exceeds [`MAX_VARIABLES`].
    ///
    /// # Errors
    ///
    /// `SolverError::TooManyVariables` naming the variable count.
    pub fn within_limit(self) -> Result<Self> {
        if self.num_vars > MAX_VARIABLES {
            return Err(SolverError::TooManyVariables {
                variable: self.num_vars,
                limit: MAX_VARIABLES,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        let num_vars = clauses
            .iter()
            .map(|c| c.max_variable() as usize)
            .max()
            .unwrap_or(0);
        Self { clauses, num_vars }
    }

    /// Like [`Cnf::from_clauses`], with at least `declared` variables.
    #[must_use]
    pub fn with_num_vars(clauses: Vec<Clause>, declared: usize) -> Self {
        let mut cnf = Self::from_clauses(clauses);
        cnf.num_vars = cnf.num_vars.max(declared);
        cnf
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// All literal occurrences, in clause order.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.clauses.iter().flat_map(Clause::iter)
    }

    /// Number of distinct variables that occur in some clause.
    #[must_use]
    pub fn num_used_vars(&self) -> usize {
        self.literals().map(Literal::variable).unique().count()
    }

    /// Checks a model against every clause. Unassigned variables make their
    /// literals false.
    #[must_use]
    pub fn verify(&self, assignment: &Assignment) -> bool {
        self.clauses
            .iter()
            .all(|c| c.is_satisfied_by(|v: Variable| assignment.var_value(v)))
    }

    /// Clauses falsified by `assignment`.
    pub fn falsified_by<'a>(&'a self, assignment: &'a Assignment) -> impl Iterator<Item = &'a Clause> {
        self.clauses
            .iter()
            .filter(|c| !c.is_satisfied_by(|v: Variable| assignment.var_value(v)))
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::error::SolverError;

    #[test]
    fn test_new_infers_num_vars() {
        let cnf = Cnf::new([(1, -4), (2, 3)]).unwrap();
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.num_vars, 4);
        assert_eq!(cnf.num_used_vars(), 4);
    }

    #[test]
    fn test_empty_formula() {
        let cnf = Cnf::new(Vec::new()).unwrap();
        assert!(cnf.is_empty());
        assert_eq!(cnf.num_vars, 0);
        assert!(cnf.verify(&Assignment::new(0)));
    }

    #[test]
    fn test_new_rejects_zero() {
        let err = Cnf::new([(1, 2), (3, 0)]).unwrap_err();
        assert!(matches!(err, SolverError::MalformedClause { .. }));
    }

    #[test]
    fn test_new_rejects_sparse_huge_variable() {
        let err = Cnf::new([(2_000_000_000, 1)]).unwrap_err();
        assert!(matches!(
            err,
            SolverError::TooManyVariables { variable: 2_000_000_000, limit: MAX_VARIABLES }
        ));

        let at_limit = i32::try_from(MAX_VARIABLES).unwrap();
        assert_eq!(Cnf::new([(at_limit, 1)]).unwrap().num_vars, MAX_VARIABLES);
    }

    #[test]
    fn test_declared_vars_extend_inferred() {
        let clauses = vec![Clause::try_from((1, 2)).unwrap()];
        assert_eq!(Cnf::with_num_vars(clauses.clone(), 5).num_vars, 5);
        assert_eq!(Cnf::with_num_vars(clauses, 1).num_vars, 2);
    }

    #[test]
    fn test_verify() {
        let cnf = Cnf::new([(1, 2), (-1, -2)]).unwrap();

        let mut assignment = Assignment::new(2);
        assignment.set(1, true);
        assignment.set(2, false);
        assert!(cnf.verify(&assignment));

        assignment.set(2, true);
        assert!(!cnf.verify(&assignment));
        assert_eq!(cnf.falsified_by(&assignment).count(), 1);
    }

    #[test]
    fn test_display_dimacs() {
        let cnf = Cnf::new([(1, -2), (2, 2)]).unwrap();
        assert_eq!(cnf.to_string(), "p cnf 2 2\n1 -2 0\n2 2 0\n");
    }
}
