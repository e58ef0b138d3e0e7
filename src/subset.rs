//! The subset (powerset) construction.
use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::{debug, trace};

use crate::{math::Bijection, prelude::*};

/// Converts the epsilon-free `nfa` into an equivalent total [`Dfa`].
///
/// Starting from the singleton set containing the initial state, sets of NFA states are
/// explored in breadth-first order. Each newly discovered set receives the next free index and
/// is queued. The successor of a set on a symbol is the union of the successors of its
/// members. If that union is empty, the transition is routed to the dead state, which is only
/// added (as the last state, looping on every symbol) if some transition actually needs it. A
/// set is accepting if it contains an NFA-final state.
///
/// Only reachable sets are created, yet in the worst case there are exponentially many of
/// them in the number of NFA states, this blow-up is inherent to the construction.
pub fn subset_construction(nfa: &Nfa) -> Dfa {
    let alphabet = nfa.alphabet().clone();
    let mut discovered: Bijection<usize, DfaState> = Bijection::new();
    let mut rows: Vec<Vec<Option<usize>>> = Vec::new();
    let mut queue = VecDeque::new();

    discovered.insert(
        0,
        DfaState::Subset(StateSet::singleton(nfa.initial().clone())),
    );
    queue.push_back(0);

    while let Some(id) = queue.pop_front() {
        let Some(DfaState::Subset(subset)) = discovered.get_by_left(&id).cloned() else {
            continue;
        };

        let mut row = Vec::with_capacity(alphabet.len());
        for symbol in &alphabet {
            let target: StateSet = subset
                .iter()
                .filter_map(|state| nfa.successors(state, symbol))
                .flat_map(|targets| targets.iter().cloned())
                .collect();
            if target.is_empty() {
                trace!("{} has no successor on {symbol}", subset.show());
                row.push(None);
                continue;
            }

            let target = DfaState::Subset(target);
            let target_id = match discovered.get_by_right(&target) {
                Some(&known) => known,
                None => {
                    let fresh = discovered.len();
                    trace!("discovered {} with index {fresh}", target.show());
                    discovered.insert(fresh, target);
                    queue.push_back(fresh);
                    fresh
                }
            };
            row.push(Some(target_id));
        }

        if rows.len() <= id {
            rows.resize(id + 1, Vec::new());
        }
        rows[id] = row;
    }

    let dead_id = discovered.len();
    let needs_dead = rows.iter().flatten().any(Option::is_none);
    let mut transitions: Vec<Vec<usize>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(|t| t.unwrap_or(dead_id)).collect())
        .collect();
    let dead = needs_dead.then(|| {
        discovered.insert(dead_id, DfaState::Dead);
        transitions.push(vec![dead_id; alphabet.len()]);
        dead_id
    });

    let mut accepting = BitSet::with_capacity(discovered.len());
    for (&id, state) in discovered.iter() {
        if state.subset().is_some_and(|s| s.intersects(nfa.finals())) {
            accepting.insert(id);
        }
    }

    debug!(
        "subset construction produced {} states ({} accepting), dead state {}",
        discovered.len(),
        accepting.len(),
        if dead.is_some() { "added" } else { "not needed" }
    );

    Dfa::from_parts(alphabet, discovered, transitions, accepting, dead)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epsilon::remove_epsilon;

    fn subset(states: &[&str]) -> DfaState {
        DfaState::Subset(states.iter().map(|&q| State::from(q)).collect())
    }

    #[test_log::test]
    fn dead_state_for_missing_moves() {
        let dfa = subset_construction(&remove_epsilon(&crate::tests::scenario_one()));

        assert_eq!(dfa.size(), 3);
        let q0 = dfa.id_of(&subset(&["q0"])).unwrap();
        let q1 = dfa.id_of(&subset(&["q1"])).unwrap();
        let dead = dfa.dead_state().unwrap();
        assert_eq!(q0, 0);
        assert_eq!(dead, 2);
        assert!(dfa.state(dead).unwrap().is_dead());

        assert_eq!(dfa.transition(q0, "a"), Some(q1));
        assert_eq!(dfa.transition(q0, "b"), Some(dead));
        assert_eq!(dfa.transition(q1, "a"), Some(dead));
        assert_eq!(dfa.transition(q1, "b"), Some(q1));
        assert_eq!(dfa.transition(dead, "a"), Some(dead));
        assert_eq!(dfa.transition(dead, "b"), Some(dead));

        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), vec![q1]);
        assert!(dfa.is_total());
    }

    #[test]
    fn no_dead_state_when_every_move_exists() {
        let dfa = subset_construction(&remove_epsilon(&crate::tests::textbook_enfa()));
        assert_eq!(dfa.dead_state(), None);
        assert_eq!(dfa.size(), 5);
        assert!(dfa.is_total());
        assert_eq!(dfa.accepting_states().count(), 1);
    }

    #[test]
    fn subsets_merge_nondeterministic_choices() {
        let enfa = EpsilonNfa::builder()
            .with_states(["q0", "q1", "q2"])
            .with_transitions([("q0", "a", "q1"), ("q0", "a", "q2"), ("q2", "b", "q2")])
            .with_initial("q0")
            .with_finals(["q2"])
            .build()
            .unwrap();
        let dfa = subset_construction(&remove_epsilon(&enfa));

        let both = dfa.id_of(&subset(&["q1", "q2"])).unwrap();
        let only_q2 = dfa.id_of(&subset(&["q2"])).unwrap();
        assert_eq!(dfa.transition(0, "a"), Some(both));
        assert_eq!(dfa.transition(both, "b"), Some(only_q2));
        assert!(dfa.is_accepting(both));
        assert_eq!(dfa.id_of_subset(&StateSet::singleton("q1".into())), None);
    }

    #[test]
    fn empty_alphabet_gives_single_state() {
        let enfa = EpsilonNfa::builder()
            .with_states(["q0", "q1"])
            .with_epsilon_transitions([("q0", "q1")])
            .with_initial("q0")
            .with_finals(["q1"])
            .build()
            .unwrap();
        let dfa = subset_construction(&remove_epsilon(&enfa));

        assert_eq!(dfa.size(), 1);
        assert_eq!(dfa.transitions().count(), 0);
        assert_eq!(dfa.dead_state(), None);
        // q0 reaches the final q1 by an epsilon move, so the empty word is accepted
        assert!(dfa.is_accepting(0));
        assert!(dfa.accepts(&Vec::<Symbol>::new()));
    }

    #[test]
    fn dfa_agrees_with_enfa() {
        let enfa = crate::tests::textbook_enfa();
        let dfa = subset_construction(&remove_epsilon(&enfa));
        for word in crate::tests::all_words(enfa.alphabet(), 7) {
            assert_eq!(enfa.accepts(&word), dfa.accepts(&word), "{word:?}");
        }
    }

    #[test]
    fn show_marks_dead_state() {
        let dfa = subset_construction(&remove_epsilon(&crate::tests::scenario_one()));
        let table = dfa.show();
        assert!(table.contains("→{q0}"));
        assert!(table.contains("{q1}*"));
        assert!(table.contains(crate::automaton::DEAD_LABEL));
    }
}
