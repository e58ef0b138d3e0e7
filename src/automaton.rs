//! The automata that flow through the conversion pipeline.
//!
//! An [`EpsilonNfa`] is the validated input. Eliminating its epsilon transitions gives an
//! [`Nfa`], the subset construction turns that into a total [`Dfa`] and minimization finally
//! produces a [`MinimalDfa`]. Each stage creates a fresh value, none of them is modified after
//! construction.
use thiserror::Error;

use crate::prelude::*;

mod enfa;
pub use enfa::{EpsilonNfa, EpsilonNfaBuilder};

mod nfa;
pub use nfa::Nfa;

mod deterministic;
pub use deterministic::Deterministic;

mod dfa;
pub use dfa::{Dfa, DfaState, DEAD_LABEL};

mod minimal;
pub use minimal::MinimalDfa;

/// Violations of the well-formedness conditions of an automaton description. An automaton
/// that violates any of them is rejected before any conversion takes place.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum AutomatonError {
    /// The description declares no states at all.
    #[error("the automaton has no states")]
    NoStates,
    /// A state was declared more than once.
    #[error("state `{0}` is declared more than once")]
    DuplicateState(State),
    /// No initial state was given.
    #[error("no initial state was given")]
    MissingInitialState,
    /// The initial state is not among the declared states.
    #[error("initial state `{0}` is not a declared state")]
    UnknownInitialState(State),
    /// A final state is not among the declared states.
    #[error("final state `{0}` is not a declared state")]
    UnknownFinalState(State),
    /// A symbol with an empty name was used.
    #[error("symbols must have a non-empty name")]
    EmptySymbol,
    /// A transition leaves a state that was not declared.
    #[error("transition on `{symbol}` leaves undeclared state `{origin}`")]
    UnknownOrigin {
        /// The undeclared state the transition starts in.
        origin: State,
        /// The symbol of the transition.
        symbol: Symbol,
    },
    /// A transition leads to a state that was not declared.
    #[error("transition ({origin}, {symbol}) leads to undeclared state `{target}`")]
    UnknownTarget {
        /// The state the transition starts in.
        origin: State,
        /// The symbol of the transition.
        symbol: Symbol,
        /// The undeclared destination.
        target: State,
    },
}
