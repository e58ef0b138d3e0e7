//! Epsilon closures and the elimination of epsilon transitions.
use tracing::{debug, trace};

use crate::prelude::*;

/// Computes the epsilon closure of `state`: every state that is reachable from it by taking
/// zero or more epsilon transitions, `state` itself included.
pub fn epsilon_closure(enfa: &EpsilonNfa, state: &State) -> StateSet {
    closure_of(enfa, std::iter::once(state))
}

/// Computes the union of the epsilon closures of all `seeds` with a depth-first search. Every
/// state is pushed at most once, so cycles of epsilon transitions are harmless.
pub(crate) fn closure_of<'a, I>(enfa: &'a EpsilonNfa, seeds: I) -> StateSet
where
    I: IntoIterator<Item = &'a State>,
{
    let mut closure = StateSet::new();
    let mut stack: Vec<&State> = seeds.into_iter().collect();

    while let Some(state) = stack.pop() {
        if !closure.insert(state.clone()) {
            continue;
        }
        if let Some(targets) = enfa.epsilon_successors(state) {
            stack.extend(targets.iter().filter(|t| !closure.contains(*t)));
        }
    }

    closure
}

/// Produces an epsilon-free [`Nfa`] that accepts the same language as `enfa`.
///
/// For a state `s` and a symbol `a`, the new destinations are the closures of all states that
/// some state in the closure of `s` reaches on `a`. When that set is empty, the transition is
/// left undefined. A state becomes final if its closure contains a final state of `enfa`. The
/// states, alphabet and initial state are kept as they are.
pub fn remove_epsilon(enfa: &EpsilonNfa) -> Nfa {
    let closures: Map<State, StateSet> = enfa
        .states()
        .iter()
        .map(|state| (state.clone(), epsilon_closure(enfa, state)))
        .collect();

    let finals: StateSet = enfa
        .states()
        .iter()
        .filter(|state| closures[*state].intersects(enfa.finals()))
        .cloned()
        .collect();

    let mut transitions: Map<State, Map<Symbol, StateSet>> = Map::default();
    for state in enfa.states() {
        trace!("closure of {} is {}", state.show(), closures[state].show());
        for symbol in enfa.alphabet() {
            let mut targets = StateSet::new();
            for source in &closures[state] {
                for reached in enfa.successors(source, symbol).into_iter().flatten() {
                    targets.union_with(&closures[reached]);
                }
            }
            if targets.is_empty() {
                continue;
            }
            transitions
                .entry(state.clone())
                .or_default()
                .insert(symbol.clone(), targets);
        }
    }

    debug!(
        "eliminated epsilon transitions, {} of {} states are final",
        finals.len(),
        enfa.states().len()
    );

    Nfa::from_parts(
        enfa.states().to_vec(),
        enfa.alphabet().clone(),
        transitions,
        enfa.initial().clone(),
        finals,
        closures,
    )
}
