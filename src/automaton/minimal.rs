use std::collections::BTreeSet;

use bit_set::BitSet;

use crate::{
    math::Partition,
    show::{decorate, transition_table, UNDEFINED},
};

use crate::prelude::*;

/// The result of minimizing a deterministic automaton. Every state is a block of the coarsest
/// partition of the original states into indistinguishable classes.
///
/// States are identified by the position of their block. The labels are derived from the
/// labels of the original states and only serve display purposes, as two different blocks may
/// well end up with the same label.
#[derive(Debug, Clone)]
pub struct MinimalDfa {
    alphabet: Alphabet,
    partition: Partition<usize>,
    block_of: Vec<usize>,
    labels: Vec<String>,
    transitions: Vec<Vec<Option<usize>>>,
    initial: usize,
    accepting: BitSet,
}

impl MinimalDfa {
    pub(crate) fn from_parts(
        alphabet: Alphabet,
        partition: Partition<usize>,
        block_of: Vec<usize>,
        labels: Vec<String>,
        transitions: Vec<Vec<Option<usize>>>,
        initial: usize,
        accepting: BitSet,
    ) -> Self {
        Self {
            alphabet,
            partition,
            block_of,
            labels,
            transitions,
            initial,
            accepting,
        }
    }

    /// The partition of the original states, the class at position `i` is state `i`.
    pub fn partition(&self) -> &Partition<usize> {
        &self.partition
    }

    /// The original states that were merged into state `id`.
    pub fn block(&self, id: usize) -> Option<&BTreeSet<usize>> {
        self.partition.get(id)
    }

    /// The state that the original state `original` was merged into.
    pub fn block_of(&self, original: usize) -> Option<usize> {
        self.block_of.get(original).copied()
    }

    /// The display label of state `id`.
    pub fn label(&self, id: usize) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Iterates over the indices of the accepting states.
    pub fn accepting_states(&self) -> impl Iterator<Item = usize> + '_ {
        self.accepting.iter()
    }

    /// The destination of the transition from `id` on the symbol named `symbol`.
    pub fn transition(&self, id: usize, symbol: &str) -> Option<usize> {
        let pos = self.alphabet.position(symbol)?;
        self.successor(id, pos)
    }

    /// Iterates over all defined transitions as triples of origin, symbol and destination.
    pub fn transitions(&self) -> impl Iterator<Item = (usize, &Symbol, usize)> + '_ {
        self.transitions.iter().enumerate().flat_map(move |(id, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(pos, target)| target.map(|t| (id, &self.alphabet[pos], t)))
        })
    }
}

impl Deterministic for MinimalDfa {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn size(&self) -> usize {
        self.transitions.len()
    }

    fn initial(&self) -> usize {
        self.initial
    }

    fn is_accepting(&self, state: usize) -> bool {
        self.accepting.contains(state)
    }

    fn successor(&self, state: usize, symbol: usize) -> Option<usize> {
        self.transitions.get(state)?.get(symbol).copied().flatten()
    }

    fn state_label(&self, state: usize) -> String {
        self.label(state).unwrap_or_default().to_string()
    }
}

impl Show for MinimalDfa {
    fn show(&self) -> String {
        let rows = self.transitions.iter().enumerate().map(|(id, row)| {
            std::iter::once(decorate(
                self.state_label(id),
                id == self.initial,
                self.is_accepting(id),
            ))
            .chain(row.iter().map(|target| match target {
                Some(t) => self.state_label(*t),
                None => UNDEFINED.to_string(),
            }))
            .collect()
        });
        transition_table(self.alphabet.iter().map(Show::show), rows)
    }
}
