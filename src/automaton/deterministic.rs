use crate::prelude::*;

/// Abstracts over deterministic automata whose states are numbered `0..size()`. Symbols are
/// addressed by their position in [`Deterministic::alphabet`].
///
/// The successor function may be partial. This is never the case for a [`Dfa`] built by the
/// subset construction, but the minimization accepts any implementor and treats an undefined
/// successor as a distinguishing property of a state.
pub trait Deterministic {
    /// The alphabet, its order determines the symbol positions.
    fn alphabet(&self) -> &Alphabet;

    /// The number of states.
    fn size(&self) -> usize;

    /// The index of the initial state.
    fn initial(&self) -> usize;

    /// Returns true if the state with index `state` is accepting.
    fn is_accepting(&self, state: usize) -> bool;

    /// The successor of `state` on the symbol at position `symbol`, if it exists.
    fn successor(&self, state: usize, symbol: usize) -> Option<usize>;

    /// A human readable label for `state`, used when states are merged.
    fn state_label(&self, state: usize) -> String;

    /// Runs `word` from the initial state and returns the index of the reached state. If the
    /// run is unsuccessful, `None` is returned. Symbols outside the alphabet end the run.
    fn reached_state<'a, W>(&self, word: W) -> Option<usize>
    where
        W: IntoIterator<Item = &'a Symbol>,
        Self: Sized,
    {
        word.into_iter().try_fold(self.initial(), |state, symbol| {
            let pos = self.alphabet().position(symbol.as_str())?;
            self.successor(state, pos)
        })
    }

    /// Returns true if the run on `word` is successful and reaches an accepting state.
    fn accepts<'a, W>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = &'a Symbol>,
        Self: Sized,
    {
        self.reached_state(word)
            .is_some_and(|state| self.is_accepting(state))
    }

    /// Returns true if every state has a successor on every symbol.
    fn is_total(&self) -> bool
    where
        Self: Sized,
    {
        (0..self.size()).all(|state| {
            (0..self.alphabet().len()).all(|sym| self.successor(state, sym).is_some())
        })
    }
}
