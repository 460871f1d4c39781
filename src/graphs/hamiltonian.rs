#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reduction from Hamiltonian path to CNF.
//!
//! Variable `p{i}_v{v}` states that position `i` of the path is vertex `v`.
//! The clauses make the positions a permutation of the vertices and require
//! consecutive positions to be adjacent in the graph.

use crate::graphs::graph::Graph;
use crate::sat::cnf::Cnf;
use crate::sat::model::Model;
use itertools::Itertools;

/// The question "does `graph` have a Hamiltonian path?".
#[derive(Debug, Clone)]
pub struct HamiltonianPath {
    graph: Graph,
}

impl HamiltonianPath {
    /// A Hamiltonian-path instance over `graph`.
    #[must_use]
    pub const fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Emits the CNF encoding.
    #[must_use]
    pub fn to_cnf(&self) -> Cnf {
        let mut clauses: Vec<Vec<(String, bool)>> = Vec::new();
        let positions = || 1..=self.graph.vertices();

        // Every position is some vertex, and no two.
        for i in positions() {
            clauses.push(
                self.graph
                    .vertex_ids()
                    .map(|v| (position_var(i, v), true))
                    .collect(),
            );
            for (u, v) in self.graph.vertex_ids().tuple_combinations() {
                clauses.push(vec![(position_var(i, u), false), (position_var(i, v), false)]);
            }
        }

        // Every vertex takes some position, and no two.
        for v in self.graph.vertex_ids() {
            clauses.push(positions().map(|i| (position_var(i, v), true)).collect());
            for (i, j) in positions().tuple_combinations() {
                clauses.push(vec![(position_var(i, v), false), (position_var(j, v), false)]);
            }
        }

        // Consecutive positions hold adjacent vertices.
        for i in 1..self.graph.vertices() {
            for u in self.graph.vertex_ids() {
                for v in self.graph.vertex_ids() {
                    if u != v && !self.graph.adjacent(u, v) {
                        clauses.push(vec![
                            (position_var(i, u), false),
                            (position_var(i + 1, v), false),
                        ]);
                    }
                }
            }
        }

        Cnf::from_named(clauses)
    }

    /// Reads the vertex sequence out of a model.
    #[must_use]
    pub fn decode(&self, model: &Model) -> Vec<u32> {
        (1..=self.graph.vertices())
            .filter_map(|i| {
                self.graph
                    .vertex_ids()
                    .find(|&v| model.value(&position_var(i, v)) == Some(true))
            })
            .collect()
    }
}

fn position_var(position: u32, vertex: u32) -> String {
    format!("p{position}_v{vertex}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::solve_sequential;

    #[test]
    fn test_path_graph_has_hamiltonian_path() {
        let graph = Graph::new(3, [(1, 2), (2, 3)]).expect("valid graph");
        let instance = HamiltonianPath::new(graph);
        let cnf = instance.to_cnf();
        let model = solve_sequential(cnf.clone()).expect("satisfiable");
        assert!(cnf.verify(&model));

        let path = instance.decode(&model);
        assert!(path == vec![1, 2, 3] || path == vec![3, 2, 1]);
    }

    #[test]
    fn test_cycle_has_hamiltonian_path() {
        let cycle = Graph::new(4, [(1, 2), (2, 3), (3, 4), (4, 1)]).expect("valid graph");
        let instance = HamiltonianPath::new(cycle);
        let model = solve_sequential(instance.to_cnf()).expect("satisfiable");

        let path = instance.decode(&model);
        assert_eq!(path.len(), 4);
        for pair in path.windows(2) {
            assert!(instance.graph.adjacent(pair[0], pair[1]));
        }
    }

    #[test]
    fn test_star_has_no_hamiltonian_path() {
        // The center would have to be visited three times.
        let star = Graph::new(4, [(1, 2), (1, 3), (1, 4)]).expect("valid graph");
        assert_eq!(solve_sequential(HamiltonianPath::new(star).to_cnf()), None);
    }

    #[test]
    fn test_single_vertex_path() {
        let trivial = Graph::new(1, []).expect("valid graph");
        let instance = HamiltonianPath::new(trivial);
        let model = solve_sequential(instance.to_cnf()).expect("satisfiable");
        assert_eq!(instance.decode(&model), vec![1]);
    }
}
