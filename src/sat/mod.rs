#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The SAT core: the CNF data model, the reduction rules, the sequential
//! DPLL engine, and the parallel search coordinator.
//!
//! The usual entry points are [`solve_sequential`] and [`solve_parallel`],
//! which both take an owned [`cnf::Cnf`] (built by [`dimacs`] or one of the
//! `graphs` reductions) and return the satisfying [`model::Model`] when one
//! exists.

/// Central per-variable assignment state.
pub mod assignment;
/// Clause storage and the clause evaluator.
pub mod clause;
/// The CNF instance and its occurrence index.
pub mod cnf;
/// The DIMACS input parser.
pub mod dimacs;
/// The iterative DPLL engine and its branching strategies.
pub mod dpll;
/// Packed literals and variable identifiers.
pub mod literal;
/// The satisfying model result type.
pub mod model;
/// The parallel search coordinator.
pub mod parallel;
/// The DPLL reduction rules.
pub mod rules;

use crate::sat::cnf::Cnf;
use crate::sat::dpll::Dpll;
use crate::sat::model::Model;

/// Decides `cnf` on the calling thread.
#[must_use]
pub fn solve_sequential(cnf: Cnf) -> Option<Model> {
    Dpll::new(cnf).solve()
}

/// Decides `cnf` with one worker per logical processor.
#[must_use]
pub fn solve_parallel(cnf: Cnf) -> Option<Model> {
    parallel::solve(cnf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_dimacs_scenarios_end_to_end() {
        let satisfiable = [
            ("p cnf 1 1\n1 0\n", vec![("1", true)]),
            (
                "p cnf 3 2\n-1 2 3 0\n2 -3 0\n",
                vec![("1", false), ("2", true), ("3", true)],
            ),
        ];
        for (input, expected) in satisfiable {
            let cnf = dimacs::parse_text(input).expect("parses");
            let model = solve_sequential(cnf.clone()).expect("satisfiable");
            assert!(cnf.verify(&model));
            for (name, value) in expected {
                assert_eq!(model.value(name), Some(value), "{input}");
            }
            assert!(solve_parallel(cnf).is_some());
        }

        let unsatisfiable = [
            "p cnf 1 2\n1 0\n-1 0\n",
            "p cnf 4 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n",
        ];
        for input in unsatisfiable {
            let cnf = dimacs::parse_text(input).expect("parses");
            assert_eq!(solve_sequential(cnf.clone()), None, "{input}");
            assert_eq!(solve_parallel(cnf), None, "{input}");
        }
    }

    /// A random 3-SAT instance with a planted satisfying assignment.
    fn planted_3sat(vars: i32, clauses: usize, seed: u64) -> Cnf {
        let mut rng = StdRng::seed_from_u64(seed);
        let planted: Vec<bool> = (0..vars).map(|_| rng.gen_bool(0.5)).collect();

        let instance: Vec<Vec<i32>> = (0..clauses)
            .map(|_| {
                let mut picked = Vec::with_capacity(3);
                while picked.len() < 3 {
                    let var = rng.gen_range(1..=vars);
                    if !picked.contains(&var) {
                        picked.push(var);
                    }
                }
                let mut clause: Vec<i32> = picked
                    .iter()
                    .map(|&var| if rng.gen_bool(0.5) { var } else { -var })
                    .collect();

                // Keep the planted assignment satisfying: flip one literal
                // in any clause it would falsify.
                let satisfied = clause
                    .iter()
                    .any(|&lit| planted[(lit.abs() - 1) as usize] == (lit > 0));
                if !satisfied {
                    clause[0] = -clause[0];
                }
                clause
            })
            .collect();

        Cnf::new(instance)
    }

    #[test]
    fn test_both_engines_solve_planted_random_3sat() {
        let cnf = planted_3sat(20, 80, 0xFEED);

        let sequential = solve_sequential(cnf.clone()).expect("satisfiable");
        assert!(cnf.verify(&sequential));

        let parallel = solve_parallel(cnf.clone()).expect("satisfiable");
        assert!(cnf.verify(&parallel));
    }

    #[test]
    fn test_engines_agree_on_random_instances() {
        for seed in 0..8 {
            let cnf = planted_3sat(12, 50, seed);
            let sequential = solve_sequential(cnf.clone());
            let parallel = solve_parallel(cnf.clone());
            assert_eq!(sequential.is_some(), parallel.is_some());
        }
    }

    #[test]
    fn test_sequential_model_is_total() {
        let cnf = planted_3sat(20, 80, 7);
        let num_vars = cnf.num_vars();
        let model = solve_sequential(cnf).expect("satisfiable");
        assert_eq!(model.len(), num_vars);
    }
}
