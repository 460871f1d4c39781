#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reduction from 3-colorability to CNF.
//!
//! Variable `c{v}_{color}` states that vertex `v` wears `color`. The
//! clauses give every vertex exactly one of the three colors and forbid
//! the endpoints of an edge from sharing one.

use crate::graphs::graph::Graph;
use crate::sat::cnf::Cnf;
use crate::sat::model::Model;
use itertools::Itertools;

/// The three available colors.
pub const COLORS: [&str; 3] = ["red", "green", "blue"];

/// The question "is `graph` 3-colorable?".
#[derive(Debug, Clone)]
pub struct ThreeColoring {
    graph: Graph,
}

impl ThreeColoring {
    /// A 3-coloring instance over `graph`.
    #[must_use]
    pub const fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Emits the CNF encoding.
    #[must_use]
    pub fn to_cnf(&self) -> Cnf {
        let mut clauses: Vec<Vec<(String, bool)>> = Vec::new();

        for v in self.graph.vertex_ids() {
            // Every vertex wears a color, and no more than one.
            clauses.push(
                COLORS
                    .into_iter()
                    .map(|color| (color_var(v, color), true))
                    .collect(),
            );
            for (first, second) in COLORS.into_iter().tuple_combinations() {
                clauses.push(vec![
                    (color_var(v, first), false),
                    (color_var(v, second), false),
                ]);
            }
        }

        // Edge endpoints disagree. A self-loop degenerates into forbidding
        // every color on its vertex, which is unsatisfiable as it should be.
        for &(u, v) in self.graph.edges() {
            for color in COLORS {
                clauses.push(vec![
                    (color_var(u, color), false),
                    (color_var(v, color), false),
                ]);
            }
        }

        Cnf::from_named(clauses)
    }

    /// Reads the coloring out of a model as `(vertex, color)` pairs.
    #[must_use]
    pub fn decode(&self, model: &Model) -> Vec<(u32, &'static str)> {
        self.graph
            .vertex_ids()
            .filter_map(|v| {
                COLORS
                    .into_iter()
                    .find(|&color| model.value(&color_var(v, color)) == Some(true))
                    .map(|color| (v, color))
            })
            .collect()
    }
}

fn color_var(vertex: u32, color: &str) -> String {
    format!("c{vertex}_{color}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::solve_sequential;

    #[test]
    fn test_triangle_is_3_colorable() {
        let triangle = Graph::new(3, [(1, 2), (2, 3), (1, 3)]).expect("valid graph");
        let instance = ThreeColoring::new(triangle);
        let cnf = instance.to_cnf();
        let model = solve_sequential(cnf.clone()).expect("satisfiable");
        assert!(cnf.verify(&model));

        let coloring = instance.decode(&model);
        assert_eq!(coloring.len(), 3);
        for (&(u, cu), &(v, cv)) in coloring.iter().tuple_combinations() {
            if instance.graph.adjacent(u, v) {
                assert_ne!(cu, cv);
            }
        }
    }

    #[test]
    fn test_k4_is_not_3_colorable() {
        let k4 = Graph::new(4, [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)])
            .expect("valid graph");
        assert_eq!(solve_sequential(ThreeColoring::new(k4).to_cnf()), None);
    }

    #[test]
    fn test_self_loop_is_not_colorable() {
        let looped = Graph::new(1, [(1, 1)]).expect("valid graph");
        assert_eq!(solve_sequential(ThreeColoring::new(looped).to_cnf()), None);
    }

    #[test]
    fn test_edgeless_graph_is_colorable() {
        let graph = Graph::new(3, []).expect("valid graph");
        let instance = ThreeColoring::new(graph);
        let model = solve_sequential(instance.to_cnf()).expect("satisfiable");
        assert_eq!(instance.decode(&model).len(), 3);
    }
}
