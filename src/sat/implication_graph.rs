#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The implication graph of a 2-CNF formula.
//!
//! Each clause `(a ∨ b)` contributes two edges: `¬a → b` ("if `a` is false, `b`
//! must be true") and `¬b → a`. Vertices are literals, addressed by
//! [`Literal::index`], so the graph is a flat arena of adjacency lists over
//! `2 * num_vars` slots. Every literal of every variable is a vertex, including
//! those with no outgoing edge.
//!
//! Parallel edges and self-loops are kept as they are; neither changes the
//! strongly connected components.

use crate::sat::clause::Clause;
use crate::sat::cnf::{Cnf, MAX_VARIABLES};
use crate::sat::literal::Literal;
use smallvec::SmallVec;

/// Out-neighbours of one vertex. Most literals in a 2-CNF have few successors.
pub type Successors = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImplicationGraph {
    adjacency: Vec<Successors>,
    num_edges: usize,
}

impl ImplicationGraph {
    /// A graph with both literals of variables `1..=num_vars` and no edges.
    ///
    /// # Panics
    ///
    /// If `num_vars` exceeds [`MAX_VARIABLES`].
    #[must_use]
    pub fn with_num_vars(num_vars: usize) -> Self {
        Self {
            adjacency: vec![Successors::new(); vertex_count(num_vars)],
            num_edges: 0,
        }
    }

    #[must_use]
    pub fn from_cnf(cnf: &Cnf) -> Self {
        let mut graph = Self::with_num_vars(cnf.num_vars);
        for clause in cnf.iter() {
            graph.add_clause(*clause);
        }
        graph
    }

    /// Adds the two implications of `clause`, growing the arena if the clause
    /// mentions a variable beyond the current range.
    pub fn add_clause(&mut self, clause: Clause) {
        self.ensure_variable(clause.max_variable() as usize);
        self.add_edge(clause.a.negated(), clause.b);
        self.add_edge(clause.b.negated(), clause.a);
    }

    fn ensure_variable(&mut self, var: usize) {
        let vertices = vertex_count(var);
        if vertices > self.adjacency.len() {
            self.adjacency.resize(vertices, Successors::new());
        }
    }

    fn add_edge(&mut self, from: Literal, to: Literal) {
        self.adjacency[from.index()].push(to.index());
        self.num_edges += 1;
    }

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.adjacency.len() / 2
    }

    /// Successor indices of the vertex at `index`.
    #[must_use]
    pub fn successors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Successor literals of `lit`.
    pub fn implied_by(&self, lit: Literal) -> impl Iterator<Item = Literal> + '_ {
        self.successors(lit.index())
            .iter()
            .map(|&i| Literal::from_index(i))
    }

    /// Every edge as `(from, to)` vertex indices, in insertion order per vertex.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, succ)| succ.iter().map(move |&to| (from, to)))
    }

    /// The graph with every edge reversed, materialised as its own arena.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut adjacency = vec![Successors::new(); self.adjacency.len()];
        for (from, to) in self.edges() {
            adjacency[to].push(from);
        }
        Self {
            adjacency,
            num_edges: self.num_edges,
        }
    }
}

fn vertex_count(num_vars: usize) -> usize {
    assert!(
        num_vars <= MAX_VARIABLES,
        "{num_vars} variables exceed the limit of {MAX_VARIABLES}"
    );
    num_vars
        .checked_mul(2)
        .unwrap_or_else(|| unreachable!("vertex count of {num_vars} variables overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(v: i32) -> Literal {
        Literal::from_i32(v).unwrap()
    }

    #[test]
    fn test_clause_edges() {
        let cnf = Cnf::new([(1, 2)]).unwrap();
        let graph = ImplicationGraph::from_cnf(&cnf);

        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.implied_by(lit(-1)).collect::<Vec<_>>(), vec![lit(2)]);
        assert_eq!(graph.implied_by(lit(-2)).collect::<Vec<_>>(), vec![lit(1)]);
        assert_eq!(graph.implied_by(lit(1)).count(), 0);
        assert_eq!(graph.implied_by(lit(2)).count(), 0);
    }

    #[test]
    fn test_unit_clause_duplicates_edge() {
        let cnf = Cnf::new([(3, 3)]).unwrap();
        let graph = ImplicationGraph::from_cnf(&cnf);

        assert_eq!(graph.num_vertices(), 6);
        assert_eq!(
            graph.implied_by(lit(-3)).collect::<Vec<_>>(),
            vec![lit(3), lit(3)]
        );
    }

    #[test]
    fn test_tautology_self_loops() {
        let cnf = Cnf::new([(1, -1)]).unwrap();
        let graph = ImplicationGraph::from_cnf(&cnf);

        assert_eq!(graph.implied_by(lit(-1)).collect::<Vec<_>>(), vec![lit(-1)]);
        assert_eq!(graph.implied_by(lit(1)).collect::<Vec<_>>(), vec![lit(1)]);
    }

    #[test]
    fn test_isolated_vertices_present() {
        let graph = ImplicationGraph::with_num_vars(5);
        assert_eq!(graph.num_vertices(), 10);
        assert_eq!(graph.num_edges(), 0);
        assert!((0..10).all(|i| graph.successors(i).is_empty()));
    }

    #[test]
    fn test_add_clause_grows_arena() {
        let mut graph = ImplicationGraph::with_num_vars(1);
        graph.add_clause(Clause::try_from((1, -4)).unwrap());
        assert_eq!(graph.num_vars(), 4);
        assert_eq!(graph.implied_by(lit(4)).collect::<Vec<_>>(), vec![lit(1)]);
    }

    #[test]
    #[should_panic(expected = "exceed the limit")]
    fn test_arena_refuses_oversized_variable_count() {
        let _ = ImplicationGraph::with_num_vars(MAX_VARIABLES + 1);
    }

    #[test]
    fn test_transpose() {
        let cnf = Cnf::new([(1, 2), (-2, 3)]).unwrap();
        let graph = ImplicationGraph::from_cnf(&cnf);
        let transposed = graph.transpose();

        assert_eq!(transposed.num_edges(), graph.num_edges());
        let mut forward: Vec<_> = graph.edges().map(|(a, b)| (b, a)).collect();
        let mut backward: Vec<_> = transposed.edges().collect();
        forward.sort_unstable();
        backward.sort_unstable();
        assert_eq!(forward, backward);
    }
}
