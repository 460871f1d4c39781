#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The iterative DPLL (Davis-Putnam-Logemann-Loveland) engine.
//!
//! The engine keeps an explicit stack of formula instances, each one branch
//! of the search, so recursion depth never tracks variable count. No
//! assignment is ever undone in place: the sibling created at every branch
//! still holds the pre-branch state, and popping a failed branch is the
//! whole backtrack.
//!
//! The rule priority on the top instance is fixed:
//! 1. every clause satisfied: the branch is a model,
//! 2. some clause falsified: the branch is dead,
//! 3. unit propagation,
//! 4. pure-literal elimination,
//! 5. branching on the first unassigned variable.
//!
//! Unit before pure changes the intermediate states the search moves
//! through (not the answer), and the reproducibility tests pin that order.
//!
//! Where the unexplored sibling of a branch goes is the only difference
//! between sequential and parallel search, so it hides behind the
//! [`Branching`] strategy chosen per engine instead of any process-wide
//! flag.

use crate::sat::cnf::Cnf;
use crate::sat::model::Model;
use crate::sat::rules;

/// Destination for the unexplored sibling produced by a branch.
pub trait Branching {
    /// Stores `sibling` for later exploration.
    fn offer(&mut self, stack: &mut Vec<Cnf>, sibling: Cnf);

    /// Whether the engine should stop before its next iteration.
    fn interrupted(&self) -> bool {
        false
    }
}

/// Keeps both branches on the engine's own stack (plain sequential DPLL).
///
/// The sibling lands on top of the stack and is explored first, so the
/// `true` branch of every decision is tried before the `false` branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBranching;

impl Branching for LocalBranching {
    fn offer(&mut self, stack: &mut Vec<Cnf>, sibling: Cnf) {
        stack.push(sibling);
    }
}

/// How a single engine run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    /// A satisfying total assignment was found.
    Satisfiable(Model),
    /// Every branch on the stack was exhausted.
    Exhausted,
    /// The branching strategy asked the engine to stop early.
    Interrupted,
}

/// Counters describing one engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Branch decisions taken.
    pub decisions: usize,
    /// Unit-clause assignments applied.
    pub propagations: usize,
    /// Pure-literal assignments applied.
    pub eliminations: usize,
}

impl SearchStats {
    /// Folds another run's counters into this one.
    pub fn merge(&mut self, other: Self) {
        self.decisions += other.decisions;
        self.propagations += other.propagations;
        self.eliminations += other.eliminations;
    }
}

/// An iterative DPLL engine over a stack of formula instances.
#[derive(Debug)]
pub struct Dpll<B: Branching = LocalBranching> {
    /// Unexplored branches; the top is the branch under exploration.
    stack: Vec<Cnf>,
    /// Where branch siblings go.
    branching: B,
    /// Counters for this run.
    stats: SearchStats,
}

impl Dpll<LocalBranching> {
    /// An engine seeded with `cnf`, keeping every branch local.
    #[must_use]
    pub fn new(cnf: Cnf) -> Self {
        Self::with_branching(cnf, LocalBranching)
    }
}

impl<B: Branching> Dpll<B> {
    /// An engine seeded with `cnf` using the given branching strategy.
    #[must_use]
    pub fn with_branching(cnf: Cnf, branching: B) -> Self {
        Self {
            stack: vec![cnf],
            branching,
            stats: SearchStats::default(),
        }
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Decides the instance, returning the model when satisfiable.
    pub fn solve(&mut self) -> Option<Model> {
        match self.run() {
            Search::Satisfiable(model) => Some(model),
            Search::Exhausted | Search::Interrupted => None,
        }
    }

    /// Runs the search until a model is found, the stack empties, or the
    /// branching strategy interrupts it.
    ///
    /// Every rule application either finishes the top branch or assigns one
    /// more variable in it, so the loop terminates on finite input.
    pub fn run(&mut self) -> Search {
        loop {
            if self.branching.interrupted() {
                return Search::Interrupted;
            }
            let Some(top) = self.stack.last_mut() else {
                return Search::Exhausted;
            };

            if top.all_satisfied() {
                return Search::Satisfiable(top.extract_model());
            }
            if top.any_falsified() {
                self.stack.pop();
                continue;
            }

            if let Some(lit) = rules::unit_literal(top) {
                top.satisfy(lit);
                self.stats.propagations += 1;
                continue;
            }
            if let Some(lit) = rules::pure_literal(top) {
                top.satisfy(lit);
                self.stats.eliminations += 1;
                continue;
            }
            if let Some(var) = rules::first_unassigned(top) {
                self.stats.decisions += 1;
                let mut sibling = top.clone();
                top.assign(var, false);
                sibling.assign(var, true);
                self.branching.offer(&mut self.stack, sibling);
                continue;
            }

            // Fully assigned yet neither satisfied nor falsified cannot
            // happen; treat it as a dead branch if it ever does.
            self.stack.pop();
        }
    }
}
