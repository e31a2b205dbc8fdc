//! Error types for building and solving 2-CNF formulas.

use thiserror::Error;

/// Errors surfaced to callers of the solver and the clause reader.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A clause does not consist of exactly two nonzero literals.
    #[error("malformed clause{}: expected two nonzero literals, got {literals:?}", fmt_line(*.line))]
    MalformedClause {
        line: Option<usize>,
        literals: Vec<i32>,
    },

    /// A token in a clause line is not an integer.
    #[error("invalid token '{token}' on line {line}")]
    InvalidToken { line: usize, token: String },

    /// A `p` line that is not `p cnf <variables> <clauses>`.
    #[error("invalid problem line on line {line}: '{header}'")]
    InvalidHeader { line: usize, header: String },

    /// A variable index beyond what the dense graph arena will address.
    #[error("variable {variable} exceeds the limit of {limit} variables")]
    TooManyVariables { variable: usize, limit: usize },

    /// I/O error while reading a clause source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SolverError {
    pub(crate) fn malformed(literals: &[i32]) -> Self {
        Self::MalformedClause {
            line: None,
            literals: literals.to_vec(),
        }
    }

    /// Attaches a source line number to a clause error.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::MalformedClause { literals, .. } => Self::MalformedClause {
                line: Some(line),
                literals,
            },
            other => other,
        }
    }
}

fn fmt_line(line: Option<usize>) -> String {
    line.map(|l| format!(" on line {l}")).unwrap_or_default()
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, SolverError>;
