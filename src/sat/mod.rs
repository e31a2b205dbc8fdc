#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod clause;
pub mod cnf;
pub mod contradiction;
pub mod dimacs;
pub mod error;
pub mod implication_graph;
pub mod literal;
pub mod scc;
pub mod solver;
