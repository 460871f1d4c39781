#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The satisfying model returned for a satisfiable formula.
//!
//! A model is a total truth assignment over every variable name of the
//! input, held in a stable report order: names that are entirely digits
//! come first and compare numerically, all other names follow and compare
//! lexicographically. Rendering a model yields one `name: value` line per
//! variable.

use std::cmp::Ordering;
use std::fmt::{self, Display};

/// A total assignment of truth values to variable names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// `(name, value)` pairs, sorted by [`name_order`].
    entries: Vec<(String, bool)>,
}

impl Model {
    /// Builds a model from `(name, value)` pairs.
    pub fn new<I: IntoIterator<Item = (String, bool)>>(entries: I) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| name_order(&a.0, &b.0));
        Self { entries }
    }

    /// The value assigned to `name`, if present.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<bool> {
        self.entries
            .binary_search_by(|(entry, _)| name_order(entry, name))
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// `(name, value)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of assigned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the model assigns no names at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

/// Report order for variable names.
///
/// All-digit names compare by numeric value (leading zeros break the tie
/// lexicographically, keeping the order total) and sort before everything
/// else; the remaining names compare lexicographically.
fn name_order(a: &str, b: &str) -> Ordering {
    match (digits(a), digits(b)) {
        (Some(x), Some(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| x.cmp(y))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// The numerically significant digits of an all-digit name.
fn digits(name: &str) -> Option<&str> {
    (!name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
        .then(|| name.trim_start_matches('0'))
}
