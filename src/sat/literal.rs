#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variables and literals of a 2-CNF formula.
//!
//! A literal is stored as its signed DIMACS value: `v` means "variable `v` is
//! true", `-v` means "variable `v` is false". Two literals are equal iff their
//! signed values are equal.
//!
//! The implication graph addresses literals through a dense index instead of
//! hashing them: `v > 0` maps to `2(v - 1)` and `v < 0` maps to `2(|v| - 1) + 1`,
//! so a literal and its negation are always neighbouring slots.

use core::fmt;
use core::num::NonZeroI32;
use core::ops::{Neg, Not};

/// A variable identifier in `[1, N]`.
pub type Variable = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(NonZeroI32);

impl Literal {
    /// Builds a literal from a signed DIMACS value. Returns `None` for `0` and
    /// for `i32::MIN`, which has no negation.
    #[must_use]
    pub fn from_i32(value: i32) -> Option<Self> {
        if value == i32::MIN {
            return None;
        }
        NonZeroI32::new(value).map(Self)
    }

    /// Builds the literal of `var` with the given polarity.
    ///
    /// # Panics
    ///
    /// If `var` is `0` or does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        let value = i32::try_from(var).expect("literal variable overflowed");
        let value = if polarity { value } else { -value };
        Self::from_i32(value).expect("variable 0 is not a literal")
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0.get()
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.get().unsigned_abs()
    }

    /// `true` for a positive occurrence of the variable.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.get() > 0
    }

    #[must_use]
    pub const fn is_negated(self) -> bool {
        !self.polarity()
    }

    #[must_use]
    pub fn negated(self) -> Self {
        Self(-self.0)
    }

    /// Dense arena slot of this literal.
    #[must_use]
    pub const fn index(self) -> usize {
        let base = 2 * (self.variable() as usize - 1);
        if self.polarity() { base } else { base + 1 }
    }

    /// Inverse of [`Literal::index`].
    ///
    /// # Panics
    ///
    /// If the index maps to a variable beyond `i32::MAX`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let var = Variable::try_from(index / 2 + 1).expect("literal index overflowed");
        Self::new(var, index % 2 == 0)
    }

    /// Truth value of this literal when its variable has value `var_value`.
    #[must_use]
    pub const fn eval(self, var_value: bool) -> bool {
        var_value == self.polarity()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl TryFrom<i32> for Literal {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_i32(value).ok_or(value)
    }
}

impl From<Literal> for i32 {
    fn from(lit: Literal) -> Self {
        lit.to_i32()
    }
}
