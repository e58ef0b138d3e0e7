use crate::show::{decorate, targets_cell, transition_table};

use crate::prelude::*;

/// An epsilon-free nondeterministic finite automaton, as produced by
/// [`crate::epsilon::remove_epsilon`].
///
/// It has the same states, alphabet and initial state as the epsilon NFA it was created from.
/// Its transition function is partial, a missing entry means that no state can be reached.
/// Besides the automaton itself, the epsilon closure of every state is kept, as these are
/// usually shown alongside the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    states: Vec<State>,
    alphabet: Alphabet,
    transitions: Map<State, Map<Symbol, StateSet>>,
    initial: State,
    finals: StateSet,
    closures: Map<State, StateSet>,
}

impl Nfa {
    pub(crate) fn from_parts(
        states: Vec<State>,
        alphabet: Alphabet,
        transitions: Map<State, Map<Symbol, StateSet>>,
        initial: State,
        finals: StateSet,
        closures: Map<State, StateSet>,
    ) -> Self {
        Self {
            states,
            alphabet,
            transitions,
            initial,
            finals,
            closures,
        }
    }

    /// The states, in the order in which they were declared.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The input alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The initial state.
    pub fn initial(&self) -> &State {
        &self.initial
    }

    /// The NFA-final states, these are the states whose epsilon closure contains an accepting
    /// state of the original automaton.
    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    /// Returns true if `state` is NFA-final.
    pub fn is_final(&self, state: &State) -> bool {
        self.finals.contains(state)
    }

    /// The epsilon closure of `state` in the original automaton.
    pub fn closure(&self, state: &State) -> Option<&StateSet> {
        self.closures.get(state)
    }

    /// Iterates over all states together with their epsilon closure, in declaration order.
    pub fn closures(&self) -> impl Iterator<Item = (&State, &StateSet)> + '_ {
        self.states
            .iter()
            .filter_map(|state| self.closures.get_key_value(state))
    }

    /// The states reached from `state` on `symbol`, or `None` if the transition is undefined.
    pub fn successors(&self, state: &State, symbol: &Symbol) -> Option<&StateSet> {
        self.transitions.get(state)?.get(symbol)
    }

    /// Iterates over the defined transitions, ordered by state and then by symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (&State, &Symbol, &StateSet)> + '_ {
        self.states.iter().flat_map(move |state| {
            self.alphabet
                .iter()
                .filter_map(move |sym| self.successors(state, sym).map(|t| (state, sym, t)))
        })
    }

    /// Decides whether `word` is accepted.
    pub fn accepts<'a, W>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = &'a Symbol>,
    {
        let mut current = StateSet::singleton(self.initial.clone());
        for symbol in word {
            current = current
                .iter()
                .filter_map(|state| self.successors(state, symbol))
                .flat_map(|targets| targets.iter().cloned())
                .collect();
            if current.is_empty() {
                return false;
            }
        }
        current.intersects(&self.finals)
    }

    /// Renders the epsilon closure of each state as a two column table.
    pub fn closure_table(&self) -> String {
        transition_table(
            [format!("{EPSILON}-closure")],
            self.closures()
                .map(|(state, closure)| vec![state.show(), closure.show()]),
        )
    }
}

impl Show for Nfa {
    fn show(&self) -> String {
        let rows = self.states.iter().map(|state| {
            std::iter::once(decorate(
                state.show(),
                state == &self.initial,
                self.is_final(state),
            ))
            .chain(
                self.alphabet
                    .iter()
                    .map(|sym| targets_cell(self.successors(state, sym))),
            )
            .collect()
        });
        transition_table(self.alphabet.iter().map(Show::show), rows)
    }
}
