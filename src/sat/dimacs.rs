#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A reader for 2-CNF formulas in the DIMACS CNF text format.
//!
//! - Lines starting with `c` are comments.
//! - A line starting with `p` is the problem line `p cnf <variables> <clauses>`.
//!   Its counts are informational: a larger variable count extends the formula
//!   with free variables, and any disagreement with the body is logged. A
//!   variable count above [`MAX_VARIABLES`] is ignored with a warning.
//! - A line starting with `%` ends the data (as in the SATLIB benchmarks).
//! - Every other non-blank line holds clauses: whitespace-separated nonzero
//!   integers, each clause terminated by `0`. A final clause missing its `0` is
//!   accepted. Every clause must have exactly two literals.

use crate::sat::clause::Clause;
use crate::sat::cnf::{Cnf, MAX_VARIABLES};
use crate::sat::error::{Result, SolverError};
use log::{debug, warn};
use std::io::{self, BufRead};
use std::path::Path;

/// Counts declared by the `p cnf` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub num_vars: usize,
    pub num_clauses: usize,
}

fn parse_header(line: &str, line_no: usize) -> Result<Header> {
    let invalid = || SolverError::InvalidHeader {
        line: line_no,
        header: line.to_string(),
    };

    let mut parts = line.split_whitespace();
    if parts.next() != Some("p") || parts.next() != Some("cnf") {
        return Err(invalid());
    }
    let mut count = || parts.next().and_then(|s| s.parse::<usize>().ok()).ok_or_else(invalid);
    let num_vars = count()?;
    let num_clauses = count()?;
    Ok(Header {
        num_vars,
        num_clauses,
    })
}

fn parse_clause_line(line: &str, line_no: usize, clauses: &mut Vec<Clause>) -> Result<()> {
    let mut pending: Vec<i32> = Vec::with_capacity(2);

    for token in line.split_whitespace() {
        let value = token
            .parse::<i32>()
            .map_err(|_| SolverError::InvalidToken {
                line: line_no,
                token: token.to_string(),
            })?;

        if value == 0 {
            clauses.push(Clause::try_from(pending.as_slice()).map_err(|e| e.at_line(line_no))?);
            pending.clear();
        } else {
            pending.push(value);
        }
    }

    if !pending.is_empty() {
        clauses.push(Clause::try_from(pending.as_slice()).map_err(|e| e.at_line(line_no))?);
    }
    Ok(())
}

/// Parses DIMACS text from a `BufRead` source.
///
/// # Errors
///
/// - `SolverError::Io` if reading fails.
/// - `SolverError::InvalidToken` for a non-integer token in a clause line.
/// - `SolverError::InvalidHeader` for a malformed `p` line.
/// - `SolverError::MalformedClause` for a clause without exactly two literals.
/// - `SolverError::TooManyVariables` if a clause uses a variable above [`MAX_VARIABLES`].
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf> {
    let mut header: Option<Header> = None;
    let mut clauses = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();

        match trimmed.chars().next() {
            None | Some('c') => {}
            Some('%') => break,
            Some('p') => header = Some(parse_header(trimmed, line_no)?),
            Some(_) => parse_clause_line(trimmed, line_no, &mut clauses)?,
        }
    }

    let cnf = match header {
        Some(h) => {
            let declared = if h.num_vars > MAX_VARIABLES {
                warn!(
                    "header declares {} variables, above the limit of {MAX_VARIABLES}; sizing from the clauses",
                    h.num_vars
                );
                0
            } else {
                h.num_vars
            };
            let cnf = Cnf::with_num_vars(clauses, declared).within_limit()?;
            if h.num_clauses != cnf.len() {
                warn!(
                    "header declares {} clauses, found {}",
                    h.num_clauses,
                    cnf.len()
                );
            }
            if h.num_vars != cnf.num_vars {
                warn!(
                    "header declares {} variables, clauses use up to {}",
                    h.num_vars, cnf.num_vars
                );
            }
            cnf
        }
        None => Cnf::from_clauses(clauses).within_limit()?,
    };

    debug!("parsed {} clauses over {} variables", cnf.len(), cnf.num_vars);
    Ok(cnf)
}

/// Parses DIMACS text held in memory.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_str(input: &str) -> Result<Cnf> {
    parse_dimacs(io::Cursor::new(input))
}

/// Parses a DIMACS file.
///
/// # Errors
///
/// `SolverError::Io` if the file cannot be opened, otherwise see [`parse_dimacs`].
pub fn parse_file(file_path: impl AsRef<Path>) -> Result<Cnf> {
    let file = std::fs::File::open(file_path)?;
    parse_dimacs(io::BufReader::new(file))
}
