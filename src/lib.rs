//! Library for converting nondeterministic finite automata with epsilon transitions into
//! minimal deterministic finite automata.
//!
//! The conversion is a pipeline of three stages, each of which consumes the result of the
//! previous one and produces a fresh value:
//! - [`epsilon::remove_epsilon`] computes the epsilon closure of every state and turns an
//!   [`EpsilonNfa`](automaton::EpsilonNfa) into an epsilon-free [`Nfa`](automaton::Nfa) that
//!   accepts the same language. The transition function of the result is partial.
//! - [`subset::subset_construction`] explores the reachable sets of NFA states and produces a
//!   total [`Dfa`](automaton::Dfa). Missing moves are routed to a dead state, which is only
//!   added if it is needed.
//! - [`minimization::minimize`] merges indistinguishable states through Moore-style partition
//!   refinement and yields a [`MinimalDfa`](automaton::MinimalDfa).
//!
//! Automata are either assembled with [`EpsilonNfaBuilder`](automaton::EpsilonNfaBuilder) or
//! read from a textual transition table (see [`table`]). Both validate the description, so
//! every automaton that enters the pipeline is well formed. [`Conversion`](pipeline::Conversion)
//! runs all stages at once and keeps the intermediate results around.
//!
//! Every automaton implements [`Show`], which renders it as a transition table.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use enfa2dfa::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, Symbol, EPSILON},
        automaton::{
            AutomatonError, Deterministic, Dfa, DfaState, EpsilonNfa, EpsilonNfaBuilder,
            MinimalDfa, Nfa,
        },
        epsilon::{epsilon_closure, remove_epsilon},
        math,
        math::{Map, Set},
        minimization::minimize,
        pipeline::Conversion,
        state::{State, StateSet},
        subset::subset_construction,
        table::{parse_list, parse_table, TableParseError},
        Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the
/// crate and do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with symbols and alphabets.
pub mod alphabet;

/// States of nondeterministic automata and sets thereof.
pub mod state;

mod show;
pub use show::Show;

pub mod automaton;

pub mod epsilon;

pub mod subset;

pub mod minimization;

/// Runs the whole conversion and keeps every intermediate stage.
pub mod pipeline;

pub mod table;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;
