use std::{borrow::Borrow, fmt};

use itertools::Itertools;

use crate::math::OrderedSet;

/// An opaque state identifier. States are compared by name, so two states with the same
/// name are the same state.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(String);

impl State {
    /// Creates a state with the given name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// The name of the state.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for State {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for State {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&State> for State {
    fn from(value: &State) -> Self {
        value.clone()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A canonical set of [`State`]s. Since the states are kept sorted, two sets that contain the
/// same states are equal and hash identically, no matter in which order the states were
/// inserted. This makes a `StateSet` usable as the identity of a state produced by the
/// subset construction.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet(OrderedSet<State>);

impl StateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set containing only `state`.
    pub fn singleton(state: State) -> Self {
        Self(OrderedSet::from([state]))
    }

    /// Adds `state` to the set, returns `false` if it was already present.
    pub fn insert(&mut self, state: State) -> bool {
        self.0.insert(state)
    }

    /// Adds all states of `other` to `self`.
    pub fn union_with(&mut self, other: &StateSet) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Checks whether the state named `state` is in the set.
    pub fn contains<Q>(&self, state: &Q) -> bool
    where
        State: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.contains(state)
    }

    /// Returns true if `self` and `other` share at least one state.
    pub fn intersects(&self, other: &StateSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|q| large.contains(q))
    }

    /// Returns true if every state of `self` is also in `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// The number of states in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set contains no state.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the states in ascending order.
    pub fn iter(&self) -> std::collections::btree_set::Iter<'_, State> {
        self.0.iter()
    }

    /// Joins the names of the states with `sep`, in ascending order.
    pub fn join(&self, sep: &str) -> String {
        self.0.iter().join(sep)
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<T: IntoIterator<Item = State>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<State> for StateSet {
    fn extend<T: IntoIterator<Item = State>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a State;
    type IntoIter = std::collections::btree_set::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.join(", "))
    }
}
