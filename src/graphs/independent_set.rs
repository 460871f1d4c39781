#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reduction from k-independent-set to CNF.
//!
//! Variable `s{i}_v{v}` states that slot `i` of the candidate set holds
//! vertex `v`. The clauses require every slot to hold exactly one vertex,
//! every vertex to fill at most one slot, and the chosen vertices to be
//! pairwise non-adjacent, so any model picks out `k` distinct independent
//! vertices.

use crate::graphs::graph::Graph;
use crate::sat::cnf::Cnf;
use crate::sat::model::Model;
use itertools::Itertools;

/// The question "does `graph` contain an independent set of size `k`?".
#[derive(Debug, Clone)]
pub struct IndependentSet {
    graph: Graph,
    k: u32,
}

impl IndependentSet {
    /// A k-independent-set instance over `graph`.
    #[must_use]
    pub const fn new(graph: Graph, k: u32) -> Self {
        Self { graph, k }
    }

    /// The size asked for.
    #[must_use]
    pub const fn k(&self) -> u32 {
        self.k
    }

    /// Emits the CNF encoding.
    #[must_use]
    pub fn to_cnf(&self) -> Cnf {
        let mut clauses: Vec<Vec<(String, bool)>> = Vec::new();
        let slots = 1..=self.k;

        // Every slot holds a vertex.
        for slot in slots.clone() {
            clauses.push(
                self.graph
                    .vertex_ids()
                    .map(|v| (slot_var(slot, v), true))
                    .collect(),
            );
        }

        // No slot holds two vertices.
        for slot in slots.clone() {
            for (u, v) in self.graph.vertex_ids().tuple_combinations() {
                clauses.push(vec![(slot_var(slot, u), false), (slot_var(slot, v), false)]);
            }
        }

        // No vertex fills two slots.
        for v in self.graph.vertex_ids() {
            for (i, j) in slots.clone().tuple_combinations() {
                clauses.push(vec![(slot_var(i, v), false), (slot_var(j, v), false)]);
            }
        }

        // Chosen vertices are pairwise non-adjacent.
        for &(u, v) in self.graph.edges() {
            if u == v {
                // A self-looped vertex can never be part of the set.
                for slot in slots.clone() {
                    clauses.push(vec![(slot_var(slot, u), false)]);
                }
                continue;
            }
            for i in slots.clone() {
                for j in slots.clone().filter(|&j| j != i) {
                    clauses.push(vec![(slot_var(i, u), false), (slot_var(j, v), false)]);
                }
            }
        }

        Cnf::from_named(clauses)
    }

    /// Reads the chosen vertex set out of a model.
    #[must_use]
    pub fn decode(&self, model: &Model) -> Vec<u32> {
        let mut chosen: Vec<u32> = (1..=self.k)
            .filter_map(|slot| {
                self.graph
                    .vertex_ids()
                    .find(|&v| model.value(&slot_var(slot, v)) == Some(true))
            })
            .collect();
        chosen.sort_unstable();
        chosen.dedup();
        chosen
    }
}

fn slot_var(slot: u32, vertex: u32) -> String {
    format!("s{slot}_v{vertex}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::solve_sequential;

    fn path_graph() -> Graph {
        // 1 - 2 - 3 - 4
        Graph::new(4, [(1, 2), (2, 3), (3, 4)]).expect("valid graph")
    }

    #[test]
    fn test_path_has_independent_pair() {
        let instance = IndependentSet::new(path_graph(), 2);
        let cnf = instance.to_cnf();
        let model = solve_sequential(cnf.clone()).expect("satisfiable");
        assert!(cnf.verify(&model));

        let chosen = instance.decode(&model);
        assert_eq!(chosen.len(), 2);
        assert!(!instance.graph.adjacent(chosen[0], chosen[1]));
    }

    #[test]
    fn test_triangle_has_no_independent_pair() {
        let triangle = Graph::new(3, [(1, 2), (2, 3), (1, 3)]).expect("valid graph");
        let cnf = IndependentSet::new(triangle, 2).to_cnf();
        assert_eq!(solve_sequential(cnf), None);
    }

    #[test]
    fn test_self_loop_excludes_the_vertex() {
        let looped = Graph::new(1, [(1, 1)]).expect("valid graph");
        let cnf = IndependentSet::new(looped, 1).to_cnf();
        assert_eq!(solve_sequential(cnf), None);
    }

    #[test]
    fn test_zero_k_is_trivially_satisfiable() {
        let instance = IndependentSet::new(path_graph(), 0);
        let model = solve_sequential(instance.to_cnf()).expect("satisfiable");
        assert!(instance.decode(&model).is_empty());
    }
}
