use tracing::debug;

use crate::prelude::*;

/// Generates a random [`EpsilonNfa`] with `states` states named `q0`, `q1`, ... over an alphabet
/// of `symbols` symbols (see [`Alphabet::of_size`]). The initial state is `q0`.
///
/// For every state and every symbol, each state is added as a destination with probability
/// `density`. Likewise each state becomes an epsilon successor with probability
/// `epsilon_density`. Every state is final with probability one half. If `states` is zero, a
/// single state is generated nonetheless.
pub fn generate_random_enfa(
    states: usize,
    symbols: usize,
    density: f64,
    epsilon_density: f64,
) -> EpsilonNfa {
    let names: Vec<State> = (0..states.max(1))
        .map(|i| State::new(format!("q{i}")))
        .collect();
    let alphabet = Alphabet::of_size(symbols);

    let mut transitions = vec![];
    let mut epsilon_transitions = vec![];
    for origin in &names {
        for symbol in &alphabet {
            for target in &names {
                if fastrand::f64() < density {
                    transitions.push((origin, symbol, target));
                }
            }
        }
        for target in &names {
            if fastrand::f64() < epsilon_density {
                epsilon_transitions.push((origin, target));
            }
        }
    }
    let finals = names.iter().filter(|_| fastrand::bool());

    debug!(
        "drew {} transitions and {} epsilon transitions",
        transitions.len(),
        epsilon_transitions.len()
    );

    EpsilonNfa::builder()
        .with_states(&names)
        .with_alphabet_symbols(&alphabet)
        .with_transitions(transitions)
        .with_epsilon_transitions(epsilon_transitions)
        .with_initial(&names[0])
        .with_finals(finals)
        .build()
        .expect("generated automata only refer to declared states")
}

/// Generates a random word over `alphabet` whose length is drawn uniformly from
/// `min_len..=max_len`. Over an empty alphabet, only the empty word exists.
pub fn generate_random_word(alphabet: &Alphabet, min_len: usize, max_len: usize) -> Vec<Symbol> {
    if alphabet.is_empty() {
        return vec![];
    }
    let length = fastrand::usize(min_len..=max_len);
    (0..length)
        .map(|_| alphabet[fastrand::usize(..alphabet.len())].clone())
        .collect()
}

/// Generates `number` random words over `alphabet`, see [`generate_random_word`].
pub fn generate_random_words(
    alphabet: &Alphabet,
    min_len: usize,
    max_len: usize,
    number: usize,
) -> Vec<Vec<Symbol>> {
    (0..number)
        .map(|_| generate_random_word(alphabet, min_len, max_len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_instances() -> impl Iterator<Item = EpsilonNfa> {
        fastrand::seed(0x5eed);
        (0..40).map(|i| generate_random_enfa(2 + i % 6, 1 + i % 3, 0.2, 0.15))
    }

    #[test_log::test]
    fn every_stage_agrees_on_random_words() {
        for enfa in random_instances() {
            let (nfa, dfa, minimal) = enfa.convert().into_parts();
            for word in generate_random_words(enfa.alphabet(), 0, 8, 60) {
                let expected = enfa.accepts(&word);
                assert_eq!(nfa.accepts(&word), expected, "{word:?}\n{}", enfa.show());
                assert_eq!(dfa.accepts(&word), expected, "{word:?}\n{}", enfa.show());
                assert_eq!(minimal.accepts(&word), expected, "{word:?}\n{}", enfa.show());
            }
        }
    }

    #[test]
    fn closures_are_reflexive_and_idempotent() {
        for enfa in random_instances() {
            for state in enfa.states() {
                let closure = epsilon_closure(&enfa, state);
                assert!(closure.contains(state));
                for member in &closure {
                    assert!(epsilon_closure(&enfa, member).is_subset(&closure));
                }
            }
        }
    }

    #[test]
    fn subset_construction_is_total_and_minimization_idempotent() {
        for enfa in random_instances() {
            let conversion = enfa.convert();
            let dfa = conversion.dfa();
            assert!(dfa.is_total());
            assert_eq!(dfa.transitions().count(), dfa.size() * dfa.alphabet().len());
            // the dead state only exists if something leads into it
            if let Some(dead) = dfa.dead_state() {
                assert_eq!(dead, dfa.size() - 1);
                assert!(!dfa.is_accepting(dead));
            }

            let minimal = conversion.minimal();
            assert!(minimal.size() <= dfa.size());
            assert!(minimal.is_total());
            assert!(minimal.minimize().partition().is_discrete());
        }
    }

    #[test]
    fn words_respect_bounds() {
        let alphabet = Alphabet::of_size(3);
        for word in generate_random_words(&alphabet, 2, 5, 50) {
            assert!((2..=5).contains(&word.len()));
            assert!(word.iter().all(|sym| alphabet.contains(sym)));
        }
        assert!(generate_random_word(&Alphabet::new(), 1, 4).is_empty());
    }
}
