use bit_set::BitSet;

use crate::{
    math::Bijection,
    show::{decorate, transition_table},
};

use crate::prelude::*;

/// How the dead state is displayed.
pub const DEAD_LABEL: &str = "∅";

/// A state of a [`Dfa`] produced by the subset construction. It is either a non-empty set of
/// states of the underlying NFA, or the dead state that stands for "no valid continuation".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DfaState {
    /// The set of NFA states the automaton may simultaneously be in.
    Subset(StateSet),
    /// The rejecting sink, it corresponds to no NFA state.
    Dead,
}

impl DfaState {
    /// The underlying set of NFA states, `None` for the dead state.
    pub fn subset(&self) -> Option<&StateSet> {
        match self {
            DfaState::Subset(subset) => Some(subset),
            DfaState::Dead => None,
        }
    }

    /// Returns true if `self` is the dead state.
    pub fn is_dead(&self) -> bool {
        matches!(self, DfaState::Dead)
    }
}

impl Show for DfaState {
    fn show(&self) -> String {
        match self {
            DfaState::Subset(subset) => subset.show(),
            DfaState::Dead => DEAD_LABEL.to_string(),
        }
    }
}

/// A total deterministic finite automaton obtained through the subset construction.
///
/// States are numbered in the order in which they were discovered, the initial state has
/// index `0` and the dead state, if present, comes last. The bijection between indices and
/// [`DfaState`]s allows looking up states in both directions.
#[derive(Debug, Clone)]
pub struct Dfa {
    alphabet: Alphabet,
    states: Bijection<usize, DfaState>,
    transitions: Vec<Vec<usize>>,
    accepting: BitSet,
    dead: Option<usize>,
}

impl Dfa {
    pub(crate) fn from_parts(
        alphabet: Alphabet,
        states: Bijection<usize, DfaState>,
        transitions: Vec<Vec<usize>>,
        accepting: BitSet,
        dead: Option<usize>,
    ) -> Self {
        debug_assert_eq!(states.len(), transitions.len());
        Self {
            alphabet,
            states,
            transitions,
            accepting,
            dead,
        }
    }

    /// The state with index `id`.
    pub fn state(&self, id: usize) -> Option<&DfaState> {
        self.states.get_by_left(&id)
    }

    /// The index of `state`, if it was discovered.
    pub fn id_of(&self, state: &DfaState) -> Option<usize> {
        self.states.get_by_right(state).copied()
    }

    /// The index of the state that corresponds to the given set of NFA states.
    pub fn id_of_subset(&self, subset: &StateSet) -> Option<usize> {
        self.id_of(&DfaState::Subset(subset.clone()))
    }

    /// Iterates over all states with their indices, in ascending order of the index.
    pub fn states(&self) -> impl Iterator<Item = (usize, &DfaState)> + '_ {
        self.states.iter().map(|(id, state)| (*id, state))
    }

    /// The index of the dead state, `None` if every probed transition had a destination.
    pub fn dead_state(&self) -> Option<usize> {
        self.dead
    }

    /// Iterates over the indices of the accepting states.
    pub fn accepting_states(&self) -> impl Iterator<Item = usize> + '_ {
        self.accepting.iter()
    }

    /// The destination of the transition from `id` on the symbol named `symbol`.
    pub fn transition(&self, id: usize, symbol: &str) -> Option<usize> {
        let pos = self.alphabet.position(symbol)?;
        self.transitions.get(id)?.get(pos).copied()
    }

    /// Iterates over all transitions as triples of origin, symbol and destination index.
    pub fn transitions(&self) -> impl Iterator<Item = (usize, &Symbol, usize)> + '_ {
        self.transitions.iter().enumerate().flat_map(move |(id, row)| {
            row.iter()
                .enumerate()
                .map(move |(pos, &target)| (id, &self.alphabet[pos], target))
        })
    }
}

impl Deterministic for Dfa {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn size(&self) -> usize {
        self.transitions.len()
    }

    fn initial(&self) -> usize {
        0
    }

    fn is_accepting(&self, state: usize) -> bool {
        self.accepting.contains(state)
    }

    fn successor(&self, state: usize, symbol: usize) -> Option<usize> {
        self.transitions.get(state)?.get(symbol).copied()
    }

    fn state_label(&self, state: usize) -> String {
        self.state(state).map(Show::show).unwrap_or_default()
    }
}

impl Show for Dfa {
    fn show(&self) -> String {
        let rows = self.transitions.iter().enumerate().map(|(id, row)| {
            std::iter::once(decorate(
                self.state_label(id),
                id == self.initial(),
                self.is_accepting(id),
            ))
            .chain(row.iter().map(|&target| self.state_label(target)))
            .collect()
        });
        transition_table(self.alphabet.iter().map(Show::show), rows)
    }
}
