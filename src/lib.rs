//! This crate decides satisfiability of 2-CNF formulas in linear time.
//!
//! A formula is turned into its implication graph, the graph is split into
//! strongly connected components with Kosaraju's algorithm, and the formula is
//! unsatisfiable exactly when some variable shares a component with its own
//! negation. Otherwise a model is read off the components.
//!
//! ```
//! use two_sat_solver::sat::solver::{SatResult, solve};
//!
//! let result = solve(&[(1, 2), (-1, -2)]).unwrap();
//! assert!(result.is_sat());
//! assert_eq!(solve(&[(1, 1), (-1, -1)]).unwrap(), SatResult::Unsatisfiable);
//! ```

/// The `sat` module implements the 2-SAT solver: literals, clauses, the
/// implication graph, SCC decomposition and model extraction.
pub mod sat;
