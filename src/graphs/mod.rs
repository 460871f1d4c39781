#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clause-generating front ends for graph decision problems.
//!
//! Each reduction is a pure, offline translation: it takes a [`graph::Graph`],
//! emits a [`crate::sat::cnf::Cnf`] whose models are exactly the certificates
//! of the graph property, and interprets a model back into graph terms. The
//! solver core knows nothing about graphs.

/// Reduction from 3-colorability.
pub mod coloring;
/// The graph type and its edge-list parser.
pub mod graph;
/// Reduction from Hamiltonian path.
pub mod hamiltonian;
/// Reduction from k-independent-set.
pub mod independent_set;
