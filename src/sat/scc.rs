#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strongly connected components of an implication graph (Kosaraju).
//!
//! The decomposition runs in two strictly sequential passes:
//!
//! 1. A depth-first search over the implication graph, started from every
//!    unvisited vertex in index order, records vertices in post-order
//!    (ascending finishing time).
//! 2. The graph is transposed into a separate arena. Vertices are taken in
//!    decreasing finishing time; each one not yet placed starts a depth-first
//!    search over the transpose, and every vertex reached forms one component.
//!
//! Components come out so that every edge of the implication graph between two
//! different components points from an earlier component to a later one. The
//! last component is therefore a sink of the condensation.
//!
//! Both searches use an explicit stack of `(vertex, next successor)` frames, so
//! auxiliary memory is `O(V)` and deep implication chains cannot exhaust the
//! call stack.

use crate::sat::implication_graph::ImplicationGraph;
use crate::sat::literal::Literal;
use bit_vec::BitVec;
use log::debug;

const UNPLACED: usize = usize::MAX;

/// Ordered list of strongly connected components.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Components {
    components: Vec<Vec<Literal>>,
    /// Component id of each vertex, by literal index.
    component_of: Vec<usize>,
}

impl Components {
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components in emission order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &[Literal]> + ExactSizeIterator {
        self.components.iter().map(Vec::as_slice)
    }

    /// Position of the component holding `lit` in the emission order.
    #[must_use]
    pub fn component_of(&self, lit: Literal) -> Option<usize> {
        self.component_of.get(lit.index()).copied()
    }

    /// Position of the component holding the vertex at `index`.
    #[must_use]
    pub fn component_of_index(&self, index: usize) -> usize {
        self.component_of[index]
    }

    /// Size of the largest component, `0` when there are none.
    #[must_use]
    pub fn largest(&self) -> usize {
        self.components.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// The components as sets of signed values, each sorted, in sorted order.
    /// Two decompositions describe the same partition iff these are equal.
    #[must_use]
    pub fn partition(&self) -> Vec<Vec<i32>> {
        let mut partition: Vec<Vec<i32>> = self
            .components
            .iter()
            .map(|c| {
                let mut values: Vec<i32> = c.iter().map(|l| l.to_i32()).collect();
                values.sort_unstable();
                values
            })
            .collect();
        partition.sort_unstable();
        partition
    }
}

/// One Kosaraju run over a borrowed graph. All traversal state lives here and
/// is dropped with the decomposer.
#[derive(Debug)]
pub struct SccDecomposer<'g> {
    graph: &'g ImplicationGraph,
    visited: BitVec,
}

impl<'g> SccDecomposer<'g> {
    #[must_use]
    pub fn new(graph: &'g ImplicationGraph) -> Self {
        Self {
            graph,
            visited: BitVec::from_elem(graph.num_vertices(), false),
        }
    }

    /// Runs both passes and returns the components.
    ///
    /// # Panics
    ///
    /// If a vertex ends up in no component or in more than one. This indicates
    /// a bug in the traversal, never a property of the input.
    #[must_use]
    pub fn decompose(mut self) -> Components {
        let order = self.finishing_order();
        let transposed = self.graph.transpose();
        let components = self.extract_components(&transposed, &order);

        let placed: usize = components.components.iter().map(Vec::len).sum();
        assert_eq!(
            placed,
            self.graph.num_vertices(),
            "SCCs must partition the vertex set"
        );
        debug!(
            "scc: {} vertices, {} edges, {} components (largest {})",
            self.graph.num_vertices(),
            self.graph.num_edges(),
            components.len(),
            components.largest()
        );

        components
    }

    /// Pass 1: vertices in ascending finishing time.
    fn finishing_order(&mut self) -> Vec<usize> {
        let n = self.graph.num_vertices();
        let mut order = Vec::with_capacity(n);
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for start in 0..n {
            if self.visited[start] {
                continue;
            }
            self.visited.set(start, true);
            stack.push((start, 0));

            while let Some((vertex, next)) = stack.pop() {
                let successors = self.graph.successors(vertex);
                if let Some(&to) = successors.get(next) {
                    stack.push((vertex, next + 1));
                    if !self.visited[to] {
                        self.visited.set(to, true);
                        stack.push((to, 0));
                    }
                } else {
                    order.push(vertex);
                }
            }
        }

        debug_assert_eq!(order.len(), n);
        order
    }

    /// Pass 2: depth-first searches over the transpose, highest finishing time
    /// first. The visited set is reset once and then shared by every search of
    /// this pass, so no vertex can join a second component.
    fn extract_components(&mut self, transposed: &ImplicationGraph, order: &[usize]) -> Components {
        let n = transposed.num_vertices();
        self.visited = BitVec::from_elem(n, false);

        let mut components = Vec::new();
        let mut component_of = vec![UNPLACED; n];
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for &start in order.iter().rev() {
            if self.visited[start] {
                continue;
            }

            let id = components.len();
            let mut component = Vec::new();
            self.visited.set(start, true);
            stack.push((start, 0));

            while let Some((vertex, next)) = stack.pop() {
                if next == 0 {
                    assert_eq!(
                        component_of[vertex], UNPLACED,
                        "vertex placed in two components"
                    );
                    component_of[vertex] = id;
                    component.push(Literal::from_index(vertex));
                }
                if let Some(&to) = transposed.successors(vertex).get(next) {
                    stack.push((vertex, next + 1));
                    if !self.visited[to] {
                        self.visited.set(to, true);
                        stack.push((to, 0));
                    }
                }
            }

            components.push(component);
        }

        Components {
            components,
            component_of,
        }
    }
}

/// Decomposes `graph` into its strongly connected components.
#[must_use]
pub fn decompose(graph: &ImplicationGraph) -> Components {
    SccDecomposer::new(graph).decompose()
}
