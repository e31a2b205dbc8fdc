//! Two-literal clauses.

use crate::sat::error::{Result, SolverError};
use crate::sat::literal::{Literal, Variable};
use core::fmt;
use core::ops::Index;

/// The disjunction `a ∨ b` of two literals.
///
/// `a == b` (a unit clause written as a duplicate) and `a == -b` (a tautology)
/// are both accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clause {
    pub a: Literal,
    pub b: Literal,
}

impl Clause {
    #[must_use]
    pub const fn new(a: Literal, b: Literal) -> Self {
        Self { a, b }
    }

    /// Builds a clause from two signed integers.
    ///
    /// # Errors
    ///
    /// `SolverError::MalformedClause` if either value is zero.
    pub fn from_i32s(a: i32, b: i32) -> Result<Self> {
        match (Literal::from_i32(a), Literal::from_i32(b)) {
            (Some(a), Some(b)) => Ok(Self::new(a, b)),
            _ => Err(SolverError::malformed(&[a, b])),
        }
    }

    #[must_use]
    pub fn literals(&self) -> [Literal; 2] {
        [self.a, self.b]
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> {
        self.literals().into_iter()
    }

    /// `a == b`: the clause forces a single literal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.a == self.b
    }

    /// `a == -b`: the clause is always satisfied.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.a == self.b.negated()
    }

    #[must_use]
    pub fn max_variable(&self) -> Variable {
        self.a.variable().max(self.b.variable())
    }

    /// Evaluates the clause given a lookup from variable to value.
    pub fn is_satisfied_by(&self, value: impl Fn(Variable) -> Option<bool>) -> bool {
        self.iter()
            .any(|lit| value(lit.variable()).is_some_and(|v| lit.eval(v)))
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.a,
            1 => &self.b,
            _ => panic!("clause index {index} out of range"),
        }
    }
}

impl TryFrom<&[i32]> for Clause {
    type Error = SolverError;

    fn try_from(literals: &[i32]) -> Result<Self> {
        match *literals {
            [a, b] => Self::from_i32s(a, b).map_err(|_| SolverError::malformed(literals)),
            _ => Err(SolverError::malformed(literals)),
        }
    }
}

impl TryFrom<(i32, i32)> for Clause {
    type Error = SolverError;

    fn try_from((a, b): (i32, i32)) -> Result<Self> {
        Self::from_i32s(a, b)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} 0", self.a, self.b)
    }
}
