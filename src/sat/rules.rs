#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]
//! The DPLL reduction rules: unit-clause, pure-literal, and
//! first-unassigned selection.
//!
//! All three are pure queries over a formula with deterministic tie-breaks:
//! unit selection scans clauses in input order (and literals in clause
//! order), pure-literal and first-unassigned selection scan variables in
//! index order. Rerunning a query on an unchanged formula returns the same
//! answer, which the engine's reproducibility guarantees build on.

use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};

/// The forced literal of the first unit clause, if any.
#[must_use]
pub fn unit_literal(cnf: &Cnf) -> Option<Literal> {
    cnf.clauses()
        .iter()
        .find_map(|clause| clause.unit_literal(cnf.assignment()))
}

/// A variable occurring with a single declared polarity across the
/// currently-unsatisfied clauses, returned as the literal of that polarity.
///
/// Only unassigned variables are candidates, but the polarity scan reads
/// the declared sign of every occurrence, whether or not neighbouring
/// literals are assigned. A candidate with no occurrence in any
/// unsatisfied clause is not pure.
#[must_use]
pub fn pure_literal(cnf: &Cnf) -> Option<Literal> {
    let assignment = cnf.assignment();
    let unsatisfied: Vec<bool> = cnf
        .clauses()
        .iter()
        .map(|clause| !clause.is_satisfied(assignment))
        .collect();

    (0..cnf.num_vars() as Variable).find_map(|var| {
        if assignment.is_assigned(var) {
            return None;
        }

        let mut positive = false;
        let mut negative = false;
        for &occ in cnf.occurrences(var) {
            if !unsatisfied[occ.clause] {
                continue;
            }
            if cnf.literal_at(occ).polarity() {
                positive = true;
            } else {
                negative = true;
            }
        }

        match (positive, negative) {
            (true, false) => Some(Literal::new(var, true)),
            (false, true) => Some(Literal::new(var, false)),
            _ => None,
        }
    })
}

/// The first unassigned variable in index order.
#[must_use]
pub fn first_unassigned(cnf: &Cnf) -> Option<Variable> {
    (0..cnf.num_vars() as Variable).find(|&var| !cnf.assignment().is_assigned(var))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_selection_prefers_clause_order() {
        // Both clauses are unit; the first one wins.
        let cnf = Cnf::new(vec![vec![2], vec![1]]);
        assert_eq!(unit_literal(&cnf), Some(Literal::new(0, true)));
        assert_eq!(cnf.name(0), "2");
    }

    #[test]
    fn test_unit_selection_skips_satisfied_clauses() {
        let mut cnf = Cnf::new(vec![vec![1, 2], vec![3]]);
        cnf.assign_named("1", true);
        assert_eq!(unit_literal(&cnf), Some(Literal::new(2, true)));
    }

    #[test]
    fn test_pure_literal_reads_declared_signs_before_any_assignment() {
        // Variable 1 occurs only negatively; it is pure from the start.
        let cnf = Cnf::new(vec![vec![-1, 2, 3], vec![2, -3]]);
        assert_eq!(pure_literal(&cnf), Some(Literal::new(0, false)));
    }

    #[test]
    fn test_pure_literal_ignores_satisfied_clauses() {
        // Once clause one is satisfied, variable 1 only occurs negatively.
        let mut cnf = Cnf::new(vec![vec![1, 2], vec![-1, 3]]);
        assert_eq!(pure_literal(&cnf), Some(Literal::new(1, true)));
        cnf.assign_named("2", true);
        assert_eq!(pure_literal(&cnf), Some(Literal::new(0, false)));
    }

    #[test]
    fn test_pure_literal_skips_assigned_variables() {
        let mut cnf = Cnf::new(vec![vec![1, 2], vec![1, 3]]);
        cnf.assign_named("1", false);
        // Variable 1 is still declared purely positive but already has a
        // value, so the scan moves on to variable 2.
        assert_eq!(pure_literal(&cnf), Some(Literal::new(1, true)));
    }

    #[test]
    fn test_pure_tie_break_follows_index_order() {
        // Variables 1 and 2 are both pure; index order picks 1.
        let cnf = Cnf::new(vec![vec![1, 2], vec![2, 1]]);
        assert_eq!(pure_literal(&cnf), Some(Literal::new(0, true)));
    }

    #[test]
    fn test_no_pure_literal_in_balanced_formula() {
        let cnf = Cnf::new(vec![vec![1, -2], vec![-1, 2]]);
        assert_eq!(pure_literal(&cnf), None);
    }

    #[test]
    fn test_first_unassigned_follows_index_order() {
        let mut cnf = Cnf::new(vec![vec![2, 1], vec![3]]);
        assert_eq!(first_unassigned(&cnf), Some(0));
        cnf.assign_named("2", true);
        assert_eq!(first_unassigned(&cnf), Some(1));
        cnf.assign_named("1", false);
        cnf.assign_named("3", true);
        assert_eq!(first_unassigned(&cnf), None);
    }
}
