//! The 2-SAT decision procedure.
//!
//! `TwoSatSolver` composes the pipeline
//! clauses → implication graph → SCCs → contradiction check → assignment.
//! Each call to [`Solver::solve`] builds its own graph and traversal state;
//! nothing is shared between solves.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::contradiction::{Contradiction, find_contradiction};
use crate::sat::error::Result;
use crate::sat::implication_graph::ImplicationGraph;
use crate::sat::literal::Variable;
use crate::sat::scc::SccDecomposer;
use core::fmt;
use log::debug;

/// Verdict of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    Unsatisfiable,
    /// A total model over variables `1..=num_vars`.
    Satisfiable(Assignment),
}

impl SatResult {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    #[must_use]
    pub const fn model(&self) -> Option<&Assignment> {
        match self {
            Self::Satisfiable(a) => Some(a),
            Self::Unsatisfiable => None,
        }
    }

    #[must_use]
    pub fn into_model(self) -> Option<Assignment> {
        match self {
            Self::Satisfiable(a) => Some(a),
            Self::Unsatisfiable => None,
        }
    }
}

impl fmt::Display for SatResult {
    /// The model as `1`/`0` tokens by ascending variable, or `UNSATISFIABLE`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satisfiable(a) => write!(f, "{a}"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
        }
    }
}

/// Figures collected during one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    pub vertices: usize,
    pub edges: usize,
    pub components: usize,
    pub largest_component: usize,
    /// The variable forced both ways, when the formula is unsatisfiable.
    pub contradiction: Option<Variable>,
}

pub trait Solver {
    fn new(cnf: Cnf) -> Self;
    fn solve(&mut self) -> SatResult;
    fn stats(&self) -> SolutionStats;
}

#[derive(Debug, Clone)]
pub struct TwoSatSolver {
    cnf: Cnf,
    stats: SolutionStats,
}

impl TwoSatSolver {
    #[must_use]
    pub const fn cnf(&self) -> &Cnf {
        &self.cnf
    }
}

impl Solver for TwoSatSolver {
    fn new(cnf: Cnf) -> Self {
        Self {
            cnf,
            stats: SolutionStats::default(),
        }
    }

    fn solve(&mut self) -> SatResult {
        let graph = ImplicationGraph::from_cnf(&self.cnf);
        debug!(
            "implication graph: {} vertices, {} edges from {} clauses",
            graph.num_vertices(),
            graph.num_edges(),
            self.cnf.len()
        );

        let components = SccDecomposer::new(&graph).decompose();

        self.stats = SolutionStats {
            vertices: graph.num_vertices(),
            edges: graph.num_edges(),
            components: components.len(),
            largest_component: components.largest(),
            contradiction: None,
        };

        if let Some(Contradiction { variable, component }) = find_contradiction(&components) {
            debug!("variable {variable} and its negation share component {component}");
            self.stats.contradiction = Some(variable);
            return SatResult::Unsatisfiable;
        }

        let assignment = Assignment::from_components(&components, self.cnf.num_vars);
        assert!(assignment.is_complete(), "extracted model must be total");
        debug_assert!(self.cnf.verify(&assignment));

        SatResult::Satisfiable(assignment)
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

/// Decides a formula given as signed integer pairs.
///
/// # Errors
///
/// `SolverError::MalformedClause` if a pair contains a zero, or
/// `SolverError::TooManyVariables` if a variable exceeds
/// [`MAX_VARIABLES`](crate::sat::cnf::MAX_VARIABLES). Nothing is solved in
/// either case.
pub fn solve(clauses: &[(i32, i32)]) -> Result<SatResult> {
    let cnf = Cnf::new(clauses.iter().copied())?;
    Ok(TwoSatSolver::new(cnf).solve())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::error::SolverError;

    fn random_pairs(rng: &mut fastrand::Rng, num_vars: i32, num_clauses: usize) -> Vec<(i32, i32)> {
        let mut literal = || {
            let v = rng.i32(1..=num_vars);
            if rng.bool() { v } else { -v }
        };
        (0..num_clauses).map(|_| (literal(), literal())).collect()
    }

    /// Truth-table search over all `2^num_vars` assignments.
    fn brute_force(pairs: &[(i32, i32)], num_vars: u32) -> bool {
        let holds = |bits: u32, lit: i32| {
            let value = bits >> (lit.unsigned_abs() - 1) & 1 == 1;
            value == (lit > 0)
        };
        (0..1u32 << num_vars).any(|bits| pairs.iter().all(|&(a, b)| holds(bits, a) || holds(bits, b)))
    }

    #[test]
    fn test_exactly_one_of_two() {
        let result = solve(&[(1, 2), (-1, -2)]).unwrap();
        let model = result.model().unwrap();
        let values = (model.var_value(1), model.var_value(2));
        assert!(
            values == (Some(true), Some(false)) || values == (Some(false), Some(true)),
            "unexpected model {values:?}"
        );
    }

    #[test]
    fn test_contradictory_units() {
        assert_eq!(solve(&[(1, 1), (-1, -1)]).unwrap(), SatResult::Unsatisfiable);
    }

    #[test]
    fn test_empty_formula() {
        let result = solve(&[]).unwrap();
        let model = result.into_model().unwrap();
        assert_eq!(model.num_vars(), 0);
        assert_eq!(model.to_string(), "");
    }

    #[test]
    fn test_unit_clause_forces_value() {
        let result = solve(&[(3, 3)]).unwrap();
        let model = result.model().unwrap();
        assert_eq!(model.var_value(3), Some(true));
        assert!(model.is_complete());
    }

    #[test]
    fn test_tautology_alone() {
        let result = solve(&[(2, -2)]).unwrap();
        assert!(result.is_sat());
        assert_eq!(result.model().unwrap().num_vars(), 2);
    }

    #[test]
    fn test_malformed_clause_aborts() {
        let err = solve(&[(1, 2), (0, 1)]).unwrap_err();
        assert!(matches!(err, SolverError::MalformedClause { .. }));
    }

    #[test]
    fn test_sparse_huge_variable_is_an_error() {
        let err = solve(&[(2_000_000_000, 1)]).unwrap_err();
        assert!(matches!(err, SolverError::TooManyVariables { .. }));
    }

    #[test]
    fn test_stats_report_contradiction() {
        let mut solver = TwoSatSolver::new(Cnf::new([(1, 1), (-1, -1), (2, 3)]).unwrap());
        assert_eq!(solver.solve(), SatResult::Unsatisfiable);
        let stats = solver.stats();
        assert_eq!(stats.contradiction, Some(1));
        assert_eq!(stats.vertices, 6);
        assert_eq!(stats.edges, 6);
    }

    #[test]
    fn test_display() {
        assert_eq!(SatResult::Unsatisfiable.to_string(), "UNSATISFIABLE");
        let result = solve(&[(1, 1), (-2, -2), (3, 3)]).unwrap();
        assert_eq!(result.to_string(), "1 0 1");
    }

    #[test]
    fn test_implication_chain_forced() {
        // x1 forced true, x1 → x2 → x3 → ¬x4.
        let result = solve(&[(1, 1), (-1, 2), (-2, 3), (-3, -4)]).unwrap();
        assert_eq!(result.to_string(), "1 1 1 0");
    }

    #[test]
    fn test_solver_can_be_reused() {
        let mut solver = TwoSatSolver::new(Cnf::new([(1, 2), (-1, 2)]).unwrap());
        let first = solver.solve();
        let second = solver.solve();
        assert_eq!(first, second);
        assert_eq!(first.model().unwrap().var_value(2), Some(true));
    }

    #[test]
    fn test_agrees_with_brute_force() {
        let mut rng = fastrand::Rng::with_seed(0x2_5a7);
        let mut sat = 0;
        let mut unsat = 0;

        for _ in 0..600 {
            let num_vars = rng.i32(1..=12);
            let num_clauses = rng.usize(0..=3 * num_vars as usize);
            let pairs = random_pairs(&mut rng, num_vars, num_clauses);
            let cnf = Cnf::new(pairs.iter().copied()).unwrap();
            let expected = brute_force(&pairs, cnf.num_vars as u32);

            match solve(&pairs).unwrap() {
                SatResult::Satisfiable(model) => {
                    assert!(expected, "solver found a model for an UNSAT formula {pairs:?}");
                    assert!(model.is_complete());
                    assert!(cnf.verify(&model), "model {model} falsifies {pairs:?}");
                    sat += 1;
                }
                SatResult::Unsatisfiable => {
                    assert!(!expected, "solver missed a model for {pairs:?}");
                    unsat += 1;
                }
            }
        }

        assert!(sat > 0 && unsat > 0, "generator produced a one-sided sample");
    }

    #[test]
    fn test_large_satisfiable_chain() {
        let n = 100_000;
        let mut pairs: Vec<(i32, i32)> = (1..n).map(|v| (-v, v + 1)).collect();
        pairs.push((1, 1));
        let result = solve(&pairs).unwrap();
        let model = result.model().unwrap();
        assert!((1..=n as u32).all(|v| model.var_value(v) == Some(true)));
    }
}
