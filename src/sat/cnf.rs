#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]
//! The CNF instance: clauses, variable name table, occurrence index, and
//! assignment state.
//!
//! Variable names are opaque strings interned to dense [`Variable`] ids in
//! first-occurrence order; that order is the index order the reduction-rule
//! tie-breaks refer to. The occurrence index maps every variable to the
//! positions of all its literal occurrences, and its key set always equals
//! the set of names appearing in the clauses.
//!
//! An instance is exclusively owned by whoever holds it (a search frame or
//! a queue slot); branching duplicates the instance with [`Clone`], which
//! copies the clauses, the index, the name table, and the assignment in
//! O(total literals).

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::literal::{Literal, Variable};
use crate::sat::model::Model;
use rustc_hash::FxHashMap;
use std::fmt::{self, Display};

/// One literal occurrence inside a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// Index of the containing clause.
    pub clause: usize,
    /// Slot of the literal within that clause.
    pub slot: usize,
}

/// A formula in conjunctive normal form together with its partial
/// assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// The clauses, in input order.
    clauses: Vec<Clause>,
    /// Variable names, indexed by id.
    names: Vec<String>,
    /// Name-to-id side of the interner.
    ids: FxHashMap<String, Variable>,
    /// Occurrence lists, indexed by variable id.
    occurrences: Vec<Vec<Occurrence>>,
    /// Current assignment state, shared by all occurrences of a variable.
    assignment: Assignment,
}

impl Cnf {
    /// Builds a formula from clauses of `(name, polarity)` pairs.
    ///
    /// Names are interned in first-occurrence order. Duplicate literals and
    /// tautological clauses are kept as given; the empty clause is legal and
    /// makes the formula unsatisfiable.
    pub fn from_named<I, J, S>(clauses: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let mut cnf = Self::default();
        for clause in clauses {
            let literals: Vec<Literal> = clause
                .into_iter()
                .map(|(name, polarity)| Literal::new(cnf.intern(name.into()), polarity))
                .collect();
            cnf.push_clause(Clause::new(&literals));
        }
        cnf.assignment = Assignment::new(cnf.names.len());
        cnf
    }

    /// Builds a formula from DIMACS-style integer clauses.
    ///
    /// `-n` is the negation of variable `n`, the integer's decimal form is
    /// the variable's name, and zeros are skipped so clause terminators may
    /// be left in.
    ///
    /// Example: `Cnf::new(vec![vec![1, -2], vec![2, 3]])` builds
    /// `(x1 OR !x2) AND (x2 OR x3)`.
    pub fn new<I, J>(clauses: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = i32>,
    {
        Self::from_named(clauses.into_iter().map(|clause| {
            clause
                .into_iter()
                .filter(|&n| n != 0)
                .map(|n| (n.unsigned_abs().to_string(), n > 0))
                .collect::<Vec<_>>()
        }))
    }

    /// Interns `name`, returning its id.
    fn intern(&mut self, name: String) -> Variable {
        if let Some(&id) = self.ids.get(&name) {
            return id;
        }
        let id = self.names.len() as Variable;
        self.ids.insert(name.clone(), id);
        self.names.push(name);
        self.occurrences.push(Vec::new());
        id
    }

    /// Appends `clause` and records its occurrences in the index.
    fn push_clause(&mut self, clause: Clause) {
        let index = self.clauses.len();
        for (slot, lit) in clause.iter().enumerate() {
            self.occurrences[lit.variable() as usize].push(Occurrence {
                clause: index,
                slot,
            });
        }
        self.clauses.push(clause);
    }

    /// The clauses, in input order.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The current assignment.
    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Number of distinct variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.names.len()
    }

    /// The name interned for `var`.
    ///
    /// # Panics
    ///
    /// Panics if `var` was not handed out by this formula.
    #[must_use]
    pub fn name(&self, var: Variable) -> &str {
        &self.names[var as usize]
    }

    /// The id interned for `name`, if the name appears in the formula.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<Variable> {
        self.ids.get(name).copied()
    }

    /// All occurrences of `var`, in clause order.
    #[must_use]
    pub fn occurrences(&self, var: Variable) -> &[Occurrence] {
        self.occurrences
            .get(var as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// The literal at a recorded occurrence.
    #[must_use]
    pub fn literal_at(&self, occurrence: Occurrence) -> Literal {
        self.clauses[occurrence.clause].as_ref()[occurrence.slot]
    }

    /// Assigns `var` directly.
    pub fn assign(&mut self, var: Variable, value: bool) {
        self.assignment.set(var, value);
    }

    /// Makes `lit` true by assigning its variable the literal's polarity.
    pub fn satisfy(&mut self, lit: Literal) {
        self.assignment.make_true(lit);
    }

    /// Assigns the variable called `name`; unknown names are a no-op.
    pub fn assign_named(&mut self, name: &str, value: bool) {
        if let Some(var) = self.variable(name) {
            self.assignment.set(var, value);
        }
    }

    /// Clears the assignment of `name`; a no-op when unassigned or unknown.
    pub fn unassign_named(&mut self, name: &str) {
        if let Some(var) = self.variable(name) {
            self.assignment.unset(var);
        }
    }

    /// True iff every clause is satisfied.
    #[must_use]
    pub fn all_satisfied(&self) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.is_satisfied(&self.assignment))
    }

    /// True iff some clause is falsified.
    #[must_use]
    pub fn any_falsified(&self) -> bool {
        self.clauses
            .iter()
            .any(|clause| clause.is_falsified(&self.assignment))
    }

    /// Extracts the model of a satisfied instance.
    ///
    /// Variables the search never had to touch are completed with `true`,
    /// so the model is total over every name in the formula.
    #[must_use]
    pub fn extract_model(&self) -> Model {
        Model::new(
            self.names
                .iter()
                .zip(self.assignment.states())
                .map(|(name, state)| (name.clone(), Option::<bool>::from(state).unwrap_or(true))),
        )
    }

    /// Checks that `model` makes at least one literal true in every clause.
    #[must_use]
    pub fn verify(&self, model: &Model) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|lit| model.value(self.name(lit.variable())) == Some(lit.polarity()))
        })
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars(), self.clauses.len())?;
        for clause in &self.clauses {
            for &lit in clause.iter() {
                let sign = if lit.polarity() { "" } else { "-" };
                write!(f, "{sign}{} ", self.name(lit.variable()))?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}
