use tracing::debug;

use crate::prelude::*;

/// The results of all stages of converting an [`EpsilonNfa`]: the epsilon-free [`Nfa`] (which
/// also carries the epsilon closures), the [`Dfa`] obtained through the subset construction and
/// its minimization.
#[derive(Debug, Clone)]
pub struct Conversion {
    nfa: Nfa,
    dfa: Dfa,
    minimal: MinimalDfa,
}

impl Conversion {
    /// Runs epsilon elimination, the subset construction and minimization on `enfa`.
    pub fn run(enfa: &EpsilonNfa) -> Self {
        let nfa = remove_epsilon(enfa);
        let dfa = subset_construction(&nfa);
        let minimal = dfa.minimize();
        debug!(
            "converted {} states into {} deterministic and {} minimal states",
            enfa.states().len(),
            dfa.size(),
            minimal.size()
        );
        Self { nfa, dfa, minimal }
    }

    /// The epsilon-free automaton.
    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    /// The automaton produced by the subset construction.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// The minimized automaton.
    pub fn minimal(&self) -> &MinimalDfa {
        &self.minimal
    }

    /// Splits `self` into its stages.
    pub fn into_parts(self) -> (Nfa, Dfa, MinimalDfa) {
        (self.nfa, self.dfa, self.minimal)
    }
}

impl EpsilonNfa {
    /// Runs the whole conversion on `self`, see [`Conversion::run`].
    pub fn convert(&self) -> Conversion {
        Conversion::run(self)
    }
}

/// Reads an automaton from its textual transition table (see [`crate::table`]) and converts it.
pub fn convert_table(input: &str) -> Result<Conversion, TableParseError> {
    let enfa = parse_table(input)?;
    Ok(enfa.convert())
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn converts_scenario_one() {
        let conversion = crate::tests::scenario_one().convert();
        assert_eq!(conversion.nfa().transitions().count(), 2);
        assert_eq!(conversion.dfa().size(), 3);
        // {q0}, {q1} and the dead state are pairwise distinguishable
        assert_eq!(conversion.minimal().size(), 3);
        assert!(conversion.minimal().partition().is_discrete());
    }

    #[test]
    fn converts_epsilon_chain() {
        let conversion = crate::tests::epsilon_chain().convert();
        let q0 = State::from("q0");
        let expected: StateSet = ["q0", "q1"].into_iter().map(State::from).collect();
        assert_eq!(conversion.nfa().closure(&q0), Some(&expected));

        let a = Symbol::from("a");
        let accepted = [a.clone()];
        let rejected = [a.clone(), a];
        assert!(conversion.dfa().accepts(&accepted));
        assert!(!conversion.dfa().accepts(&rejected));
        assert!(conversion.minimal().accepts(&accepted));
        assert!(!conversion.minimal().accepts(&rejected));
    }

    #[test]
    fn every_stage_accepts_the_same_words() {
        let enfa = crate::tests::textbook_enfa();
        let (nfa, dfa, minimal) = enfa.convert().into_parts();
        for word in crate::tests::all_words(enfa.alphabet(), 6) {
            let expected = enfa.accepts(&word);
            assert_eq!(nfa.accepts(&word), expected, "{word:?}");
            assert_eq!(dfa.accepts(&word), expected, "{word:?}");
            assert_eq!(minimal.accepts(&word), expected, "{word:?}");
        }
    }

    #[test]
    fn converts_table_input() {
        let conversion = super::convert_table(
            "State | a | b | ε
             →q0   | q1 | φ | q2
             *q1   | q1 | q0,q2 |
             q2    |    |       |",
        )
        .unwrap();
        assert!(conversion.dfa().is_total());
        assert!(conversion.minimal().accepts(&[Symbol::from("a")]));
        assert!(!conversion.minimal().accepts(&[Symbol::from("b")]));
    }

    #[test]
    fn reports_table_errors() {
        assert!(matches!(
            super::convert_table("State | a\n→q0 | q9"),
            Err(TableParseError::Invalid(AutomatonError::UnknownTarget { .. }))
        ));
    }
}
