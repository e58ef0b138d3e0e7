//! Minimization of deterministic automata through partition refinement.
pub(crate) mod partition_refinement;

use crate::prelude::*;

/// Computes the minimal automaton that is equivalent to `dfa`, using Moore's partition
/// refinement. All states of `dfa` are taken into account, whether reachable or not.
///
/// Each refinement round takes time in O(n² · k) for n states and k symbols, and there are at
/// most n rounds.
pub fn minimize<D: Deterministic>(dfa: &D) -> MinimalDfa {
    partition_refinement::moore_partition_refinement(dfa)
}

impl Dfa {
    /// Minimizes `self`, see [`minimize`].
    pub fn minimize(&self) -> MinimalDfa {
        minimize(self)
    }
}

impl MinimalDfa {
    /// Minimizes `self` again. As `self` is already minimal, every class of the resulting
    /// partition is a singleton.
    pub fn minimize(&self) -> MinimalDfa {
        minimize(self)
    }
}
