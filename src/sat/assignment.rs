#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Central assignment state for the variables of a formula.
//!
//! Assignment state is stored once per variable, so every occurrence of a
//! variable across the clauses observes the same entry and the occurrences
//! can never disagree about whether the variable is assigned or which value
//! it carries.

use crate::sat::literal::{Literal, Variable};

/// Represents the assignment state of a propositional variable.
///
/// A variable can be unassigned, or assigned to true or false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum VarState {
    /// The variable has not been assigned a truth value.
    #[default]
    Unassigned,
    /// The variable has been assigned a specific truth value.
    Assigned(bool),
}

impl VarState {
    /// Whether the variable carries a truth value.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    /// Whether the variable is still open.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }
}

impl From<VarState> for Option<bool> {
    fn from(state: VarState) -> Self {
        match state {
            VarState::Assigned(value) => Some(value),
            VarState::Unassigned => None,
        }
    }
}

/// Dense per-variable assignment states, indexed by [`Variable`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    states: Vec<VarState>,
}

impl Assignment {
    /// An all-unassigned state over `num_vars` variables.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            states: vec![VarState::Unassigned; num_vars],
        }
    }

    /// Number of variables tracked.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.states.len()
    }

    /// Sets `var` to `value`.
    ///
    /// Assigning the same value twice leaves the state untouched; variables
    /// outside the tracked range are ignored.
    pub fn set(&mut self, var: Variable, value: bool) {
        if let Some(state) = self.states.get_mut(var as usize) {
            *state = VarState::Assigned(value);
        }
    }

    /// Clears any value held by `var`; a no-op when already unassigned.
    pub fn unset(&mut self, var: Variable) {
        if let Some(state) = self.states.get_mut(var as usize) {
            *state = VarState::Unassigned;
        }
    }

    /// The value of `var`, if assigned.
    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        self.states.get(var as usize).and_then(|state| (*state).into())
    }

    /// Whether `var` currently carries a value.
    #[must_use]
    pub fn is_assigned(&self, var: Variable) -> bool {
        self.value(var).is_some()
    }

    /// The final value of `lit`: the variable's value for a positive
    /// literal, its negation otherwise. `None` while the variable is
    /// unassigned.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.value(lit.variable()).map(|value| value == lit.polarity())
    }

    /// Makes `lit` true by assigning its variable the literal's polarity.
    pub fn make_true(&mut self, lit: Literal) {
        self.set(lit.variable(), lit.polarity());
    }

    /// The tracked states in variable order.
    pub fn states(&self) -> impl Iterator<Item = VarState> + '_ {
        self.states.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_is_idempotent() {
        let mut a = Assignment::new(3);
        a.set(1, true);
        let snapshot = a.clone();
        a.set(1, true);
        assert_eq!(a, snapshot);
    }

    #[test]
    fn test_literal_value_respects_polarity() {
        let mut a = Assignment::new(2);
        a.set(0, false);
        assert_eq!(a.literal_value(Literal::new(0, true)), Some(false));
        assert_eq!(a.literal_value(Literal::new(0, false)), Some(true));
        assert_eq!(a.literal_value(Literal::new(1, true)), None);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut a = Assignment::new(1);
        a.set(5, true);
        a.unset(5);
        assert_eq!(a.value(5), None);
        assert_eq!(a.num_vars(), 1);
    }

    #[test]
    fn test_unset_restores_unassigned() {
        let mut a = Assignment::new(1);
        a.set(0, true);
        a.unset(0);
        assert!(!a.is_assigned(0));
        a.unset(0);
        assert!(!a.is_assigned(0));
    }
}
