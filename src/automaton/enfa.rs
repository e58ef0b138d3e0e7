use tracing::debug;

use crate::{
    epsilon,
    show::{decorate, targets_cell, transition_table},
};

use super::AutomatonError;
use crate::prelude::*;

/// A nondeterministic finite automaton with epsilon transitions.
///
/// Values of this type are always well-formed: the state set is non-empty and free of
/// duplicates, and the initial state, all final states and every endpoint of a transition are
/// declared states. The only way to obtain one is through [`EpsilonNfaBuilder::build`] or by
/// parsing a transition table (see [`crate::table`]), both of which validate their input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpsilonNfa {
    states: Vec<State>,
    alphabet: Alphabet,
    transitions: Map<State, Map<Symbol, StateSet>>,
    initial: State,
    finals: StateSet,
}

impl EpsilonNfa {
    /// Returns a builder for an epsilon NFA.
    ///
    /// ```
    /// use enfa2dfa::prelude::*;
    ///
    /// let enfa = EpsilonNfa::builder()
    ///     .with_states(["q0", "q1", "q2"])
    ///     .with_transitions([("q1", "a", "q2")])
    ///     .with_epsilon_transitions([("q0", "q1")])
    ///     .with_initial("q0")
    ///     .with_finals(["q2"])
    ///     .build()
    ///     .unwrap();
    /// assert!(enfa.accepts(&[Symbol::from("a")]));
    /// ```
    pub fn builder() -> EpsilonNfaBuilder {
        EpsilonNfaBuilder::default()
    }

    /// The declared states, in declaration order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The input alphabet, epsilon excluded.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The initial state.
    pub fn initial(&self) -> &State {
        &self.initial
    }

    /// The final (accepting) states.
    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    /// Returns true if `state` is a final state.
    pub fn is_final(&self, state: &State) -> bool {
        self.finals.contains(state)
    }

    /// Returns the states that `state` can move to on `symbol`. The symbol may be epsilon.
    /// Gives `None` if there is no such transition.
    pub fn successors(&self, state: &State, symbol: &Symbol) -> Option<&StateSet> {
        self.transitions.get(state)?.get(symbol)
    }

    /// The states reachable from `state` with a single epsilon transition.
    pub fn epsilon_successors(&self, state: &State) -> Option<&StateSet> {
        self.transitions.get(state)?.get(EPSILON)
    }

    /// Returns true if at least one epsilon transition exists.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions
            .values()
            .any(|row| row.get(EPSILON).is_some_and(|targets| !targets.is_empty()))
    }

    /// Iterates over all transitions as triples of origin, symbol and destination set. The
    /// transitions are ordered by the declaration order of the states, then by the alphabet,
    /// epsilon transitions come last.
    pub fn transitions(&self) -> impl Iterator<Item = (&State, &Symbol, &StateSet)> + '_ {
        self.states.iter().flat_map(move |state| {
            self.transitions
                .get(state)
                .into_iter()
                .flat_map(move |row| {
                    self.alphabet
                        .iter()
                        .filter_map(move |sym| row.get_key_value(sym))
                        .chain(row.get_key_value(EPSILON))
                })
                .map(move |(sym, targets)| (state, sym, targets))
        })
    }

    /// Decides whether `word` is accepted by simulating all runs at once. Epsilon closures are
    /// taken before the first and after every symbol.
    pub fn accepts<'a, W>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = &'a Symbol>,
    {
        let mut current = epsilon::closure_of(self, std::iter::once(&self.initial));
        for symbol in word {
            let mut reached = StateSet::new();
            for state in &current {
                if let Some(targets) = self.successors(state, symbol) {
                    reached.union_with(targets);
                }
            }
            current = epsilon::closure_of(self, &reached);
            if current.is_empty() {
                return false;
            }
        }
        current.intersects(&self.finals)
    }
}

impl Show for EpsilonNfa {
    fn show(&self) -> String {
        let with_epsilon = self.has_epsilon_transitions();
        let columns = self
            .alphabet
            .iter()
            .map(Show::show)
            .chain(with_epsilon.then(|| EPSILON.to_string()));

        let rows = self.states.iter().map(|state| {
            let mut row = vec![decorate(
                state.show(),
                state == &self.initial,
                self.is_final(state),
            )];
            row.extend(
                self.alphabet
                    .iter()
                    .map(|sym| targets_cell(self.successors(state, sym))),
            );
            if with_epsilon {
                row.push(targets_cell(self.epsilon_successors(state)));
            }
            row
        });

        transition_table(columns, rows)
    }
}

/// Helper struct for the construction of an [`EpsilonNfa`]. It collects states, symbols,
/// transitions, the initial state and the final states, and checks all of them for consistency
/// once [`EpsilonNfaBuilder::build`] is called.
///
/// By default, the alphabet consists of the symbols that appear on at least one transition.
/// [`EpsilonNfaBuilder::with_alphabet_symbols`] can be used to add symbols that are not used
/// by any transition.
#[derive(Debug, Clone, Default)]
pub struct EpsilonNfaBuilder {
    states: Vec<State>,
    symbols: Vec<Symbol>,
    edges: Vec<(State, Symbol, State)>,
    initial: Option<State>,
    finals: Vec<State>,
}

impl EpsilonNfaBuilder {
    /// Declares the given states. The order of declaration is kept.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Forces the given symbols into the alphabet, in the given order. Epsilon is ignored.
    pub fn with_alphabet_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Adds transitions, each given as a triple of origin, symbol and destination. A
    /// transition on [`EPSILON`] is an epsilon transition.
    pub fn with_transitions<I, P, A, Q>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (P, A, Q)>,
        P: Into<State>,
        A: Into<Symbol>,
        Q: Into<State>,
    {
        self.edges.extend(
            transitions
                .into_iter()
                .map(|(p, a, q)| (p.into(), a.into(), q.into())),
        );
        self
    }

    /// Adds epsilon transitions given as pairs of origin and destination.
    pub fn with_epsilon_transitions<I, P, Q>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (P, Q)>,
        P: Into<State>,
        Q: Into<State>,
    {
        self.edges.extend(
            transitions
                .into_iter()
                .map(|(p, q)| (p.into(), Symbol::epsilon(), q.into())),
        );
        self
    }

    /// Sets the initial state, replacing a previously set one.
    pub fn with_initial<S: Into<State>>(mut self, initial: S) -> Self {
        self.initial = Some(initial.into());
        self
    }

    /// Marks the given states as final.
    pub fn with_finals<I, S>(mut self, finals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.finals.extend(finals.into_iter().map(Into::into));
        self
    }

    /// Validates the collected description and builds the automaton. Fails with the first
    /// violation that is found: a missing or duplicate state, an initial or final state that was
    /// not declared, or a transition whose origin or destination was not declared.
    pub fn build(self) -> Result<EpsilonNfa, AutomatonError> {
        if self.states.is_empty() {
            return Err(AutomatonError::NoStates);
        }

        let mut declared = Set::default();
        for state in &self.states {
            if !declared.insert(state) {
                return Err(AutomatonError::DuplicateState(state.clone()));
            }
        }

        let initial = self.initial.ok_or(AutomatonError::MissingInitialState)?;
        if !declared.contains(&initial) {
            return Err(AutomatonError::UnknownInitialState(initial));
        }

        let mut finals = StateSet::new();
        for state in self.finals {
            if !declared.contains(&state) {
                return Err(AutomatonError::UnknownFinalState(state));
            }
            finals.insert(state);
        }

        if self
            .symbols
            .iter()
            .chain(self.edges.iter().map(|(_, symbol, _)| symbol))
            .any(|symbol| symbol.as_str().is_empty())
        {
            return Err(AutomatonError::EmptySymbol);
        }

        let mut alphabet: Alphabet = self.symbols.into_iter().collect();
        let mut transitions: Map<State, Map<Symbol, StateSet>> = Map::default();
        for (origin, symbol, target) in self.edges {
            if !declared.contains(&origin) {
                return Err(AutomatonError::UnknownOrigin { origin, symbol });
            }
            if !declared.contains(&target) {
                return Err(AutomatonError::UnknownTarget {
                    origin,
                    symbol,
                    target,
                });
            }
            alphabet.push(symbol.clone());
            transitions
                .entry(origin)
                .or_default()
                .entry(symbol)
                .or_default()
                .insert(target);
        }

        debug!(
            "built epsilon NFA with {} states over {} symbols",
            self.states.len(),
            alphabet.len()
        );

        Ok(EpsilonNfa {
            states: self.states,
            alphabet,
            transitions,
            initial,
            finals,
        })
    }
}
