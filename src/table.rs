//! Reading automata from textual transition tables.
//!
//! A table consists of a header row and one row per state, the cells are separated by `|`:
//! ```text
//! State | a  | b     | ε
//! →q0   | q1 | φ     | q2
//! *q1   | q1 | q0,q2 |
//! q2    |    |       |
//! ```
//! The first header cell must read `State`, every further cell names a symbol. A column named
//! `ε` (or `eps`) holds the epsilon transitions. A state name may be prefixed by `→` or `->` to
//! mark it as initial and prefixed or suffixed by `*` to mark it as final. If no state is marked
//! as initial, the state of the first row is. If the header starts with `|`, the table is framed
//! and the outermost `|` of every row is dropped. Destinations are comma separated lists, an empty
//! cell as well as `φ`, `∅` or `-` stand for no destination. Blank lines and lines starting
//! with `#` are ignored.
use std::str::FromStr;

use thiserror::Error;
use tracing::trace;

use crate::prelude::*;

/// Reasons for which a transition table cannot be read. Line numbers start at 1.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TableParseError {
    /// The input contains no rows at all.
    #[error("the table has no header row")]
    MissingHeader,
    /// The first cell of the header does not read `State`.
    #[error("line {line}: expected the header to start with `State`, found `{found}`")]
    MalformedHeader {
        /// The line of the header.
        line: usize,
        /// The first cell of the header.
        found: String,
    },
    /// A header cell after the first one does not name a symbol.
    #[error("line {line}: column {column} of the header does not name a symbol")]
    EmptySymbol {
        /// The line of the header.
        line: usize,
        /// The 1-based position of the empty cell.
        column: usize,
    },
    /// A row has a different number of cells than the header.
    #[error("line {line}: expected {expected} cells, found {found}")]
    CellCount {
        /// The offending line.
        line: usize,
        /// The number of cells in the header.
        expected: usize,
        /// The number of cells in the row.
        found: usize,
    },
    /// A row does not name its state.
    #[error("line {line}: the row does not name a state")]
    MissingStateName {
        /// The offending line.
        line: usize,
    },
    /// More than one row is marked as initial.
    #[error("line {line}: `{state}` is marked as initial, but `{previous}` already is")]
    MultipleInitialStates {
        /// The offending line.
        line: usize,
        /// The state marked in that line.
        state: State,
        /// The state that was marked before.
        previous: State,
    },
    /// The table was read, but does not describe a well formed automaton.
    #[error(transparent)]
    Invalid(#[from] AutomatonError),
}

const INITIAL_PREFIXES: [&str; 2] = ["→", "->"];
const FINAL_MARKER: char = '*';
const NO_DESTINATION: [&str; 3] = ["φ", "∅", "-"];
const EPSILON_HEADERS: [&str; 2] = [EPSILON, "eps"];

/// Splits a comma separated list, trimming the entries and dropping empty ones.
///
/// ```
/// use enfa2dfa::prelude::*;
/// assert_eq!(parse_list(" q0, q1 ,,q2 "), vec!["q0", "q1", "q2"]);
/// assert!(parse_list("  ").is_empty());
/// ```
pub fn parse_list(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Splits a row into its cells. In a framed table every row starts and ends with `|`, otherwise
/// a trailing `|` is followed by an empty last cell.
fn split_cells(line: &str, framed: bool) -> Vec<&str> {
    let mut line = line.trim();
    if framed {
        line = line.strip_prefix('|').unwrap_or(line);
        line = line.strip_suffix('|').unwrap_or(line);
    }
    line.split('|').map(str::trim).collect()
}

/// The state named in the first cell of a row, whether it is marked initial and whether it is
/// marked final.
fn parse_state_cell(cell: &str) -> (&str, bool, bool) {
    let mut name = cell.trim();
    let mut initial = false;
    let mut accepting = false;
    loop {
        if let Some(rest) = INITIAL_PREFIXES.iter().find_map(|p| name.strip_prefix(p)) {
            initial = true;
            name = rest.trim_start();
        } else if let Some(rest) = name.strip_prefix(FINAL_MARKER) {
            accepting = true;
            name = rest.trim_start();
        } else {
            break;
        }
    }
    if let Some(rest) = name.strip_suffix(FINAL_MARKER) {
        accepting = true;
        name = rest.trim_end();
    }
    (name, initial, accepting)
}

fn destinations(cell: &str) -> Vec<&str> {
    if NO_DESTINATION.contains(&cell) {
        return vec![];
    }
    parse_list(cell)
        .into_iter()
        .filter(|target| !NO_DESTINATION.contains(target))
        .collect()
}

/// Reads an [`EpsilonNfa`] from a transition table in the format described in the
/// [module documentation](crate::table). All symbols named in the header belong to the alphabet, even
/// if no transition uses them.
pub fn parse_table(input: &str) -> Result<EpsilonNfa, TableParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (header_line, header) = lines.next().ok_or(TableParseError::MissingHeader)?;
    let framed = header.starts_with('|');
    let header = split_cells(header, framed);
    if !header[0].eq_ignore_ascii_case("state") {
        return Err(TableParseError::MalformedHeader {
            line: header_line,
            found: header[0].to_string(),
        });
    }
    if let Some(pos) = header.iter().skip(1).position(|cell| cell.is_empty()) {
        return Err(TableParseError::EmptySymbol {
            line: header_line,
            column: pos + 2,
        });
    }
    let columns: Vec<Symbol> = header[1..]
        .iter()
        .map(|&cell| {
            if EPSILON_HEADERS.contains(&cell) {
                Symbol::epsilon()
            } else {
                Symbol::from(cell)
            }
        })
        .collect();

    let mut builder = EpsilonNfa::builder().with_alphabet_symbols(columns.iter().cloned());
    let mut initial: Option<State> = None;
    let mut first: Option<State> = None;

    for (line, row) in lines {
        let cells = split_cells(row, framed);
        if cells.len() != header.len() {
            return Err(TableParseError::CellCount {
                line,
                expected: header.len(),
                found: cells.len(),
            });
        }

        let (name, is_initial, is_final) = parse_state_cell(cells[0]);
        if name.is_empty() {
            return Err(TableParseError::MissingStateName { line });
        }
        let state = State::from(name);
        trace!("line {line} describes state {state}");

        if is_initial {
            if let Some(previous) = initial.replace(state.clone()) {
                return Err(TableParseError::MultipleInitialStates {
                    line,
                    state,
                    previous,
                });
            }
        }
        first.get_or_insert_with(|| state.clone());
        if is_final {
            builder = builder.with_finals([state.clone()]);
        }

        let origin = &state;
        let transitions: Vec<(State, Symbol, State)> = columns
            .iter()
            .zip(&cells[1..])
            .flat_map(|(symbol, cell)| {
                destinations(cell)
                    .into_iter()
                    .map(move |target| (origin.clone(), symbol.clone(), State::from(target)))
            })
            .collect();
        builder = builder.with_states([state]).with_transitions(transitions);
    }

    if let Some(initial) = initial.or(first) {
        builder = builder.with_initial(initial);
    }
    Ok(builder.build()?)
}

impl FromStr for EpsilonNfa {
    type Err = TableParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_table(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "
        # the example from the module documentation
        State | a  | b     | ε
        →q0   | q1 | φ     | q2
        *q1   | q1 | q0,q2 |

        q2    |    |       |
    ";

    fn set(states: &[&str]) -> StateSet {
        states.iter().map(|&q| State::from(q)).collect()
    }

    #[test_log::test]
    fn reads_example_table() {
        let enfa: EpsilonNfa = EXAMPLE.parse().unwrap();
        let (a, b) = (Symbol::from("a"), Symbol::from("b"));

        assert_eq!(enfa.states().len(), 3);
        assert_eq!(enfa.alphabet().iter().collect::<Vec<_>>(), vec![&a, &b]);
        assert_eq!(enfa.initial().as_str(), "q0");
        assert_eq!(enfa.finals(), &set(&["q1"]));
        assert_eq!(enfa.successors(&"q0".into(), &a), Some(&set(&["q1"])));
        assert_eq!(enfa.successors(&"q0".into(), &b), None);
        assert_eq!(enfa.successors(&"q1".into(), &b), Some(&set(&["q0", "q2"])));
        assert_eq!(enfa.epsilon_successors(&"q0".into()), Some(&set(&["q2"])));
        assert_eq!(enfa.transitions().count(), 4);
    }

    #[test]
    fn shown_table_can_be_read_back() {
        let enfa: EpsilonNfa = EXAMPLE.parse().unwrap();
        let shown = enfa.show();
        // drop the frame of the rendered table and keep the rows
        let rows = shown
            .lines()
            .filter(|line| line.contains('│'))
            .map(|line| line.replace('│', "|"))
            .collect::<Vec<_>>()
            .join("\n");
        let reread: EpsilonNfa = rows.parse().unwrap();

        assert_eq!(reread.states(), enfa.states());
        assert_eq!(reread.initial(), enfa.initial());
        assert_eq!(reread.finals(), enfa.finals());
        assert_eq!(
            reread.transitions().collect::<Vec<_>>(),
            enfa.transitions().collect::<Vec<_>>()
        );
    }

    #[test]
    fn markers_and_defaults() {
        let enfa = parse_table(
            "| state | eps | x |
             | p     | q   | - |
             | q*    | ∅   | p |",
        )
        .unwrap();
        assert_eq!(enfa.initial().as_str(), "p");
        assert_eq!(enfa.finals(), &set(&["q"]));
        assert_eq!(enfa.epsilon_successors(&"p".into()), Some(&set(&["q"])));
        assert_eq!(enfa.alphabet().len(), 1);

        let enfa = parse_table("State | a\n-> *s | s").unwrap();
        assert_eq!(enfa.initial().as_str(), "s");
        assert!(enfa.is_final(&"s".into()));
    }

    #[test]
    fn header_symbols_belong_to_alphabet() {
        let enfa = parse_table("State | a | b | c\n→q | q | | ").unwrap();
        assert_eq!(enfa.alphabet().len(), 3);
        assert!(enfa.alphabet().contains("c"));
    }

    #[test]
    fn rejects_malformed_tables() {
        assert_eq!(parse_table(""), Err(TableParseError::MissingHeader));
        assert_eq!(
            parse_table("# only a comment\n\n"),
            Err(TableParseError::MissingHeader)
        );
        assert_eq!(
            parse_table("Node | a\nq | q"),
            Err(TableParseError::MalformedHeader {
                line: 1,
                found: "Node".into()
            })
        );
        assert_eq!(
            parse_table("State | a | b\n\nq | q"),
            Err(TableParseError::CellCount {
                line: 3,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            parse_table("State | a\n* | q"),
            Err(TableParseError::MissingStateName { line: 2 })
        );
        assert_eq!(
            parse_table("State | a\n→p | q\n→q | p"),
            Err(TableParseError::MultipleInitialStates {
                line: 3,
                state: "q".into(),
                previous: "p".into()
            })
        );
    }

    #[test]
    fn header_cells_must_name_symbols() {
        assert_eq!(
            parse_table("State | a |\n→q0* | q0 |"),
            Err(TableParseError::EmptySymbol { line: 1, column: 3 })
        );
        assert_eq!(
            parse_table("| State |  | a |\n| q | q | q |"),
            Err(TableParseError::EmptySymbol { line: 1, column: 2 })
        );

        // the same automaton without the stray pipe loops on `a` in a single state
        let conversion = parse_table("State | a\n→q0* | q0").unwrap().convert();
        assert_eq!(conversion.dfa().size(), 1);
        assert_eq!(conversion.dfa().dead_state(), None);
        assert_eq!(conversion.minimal().size(), 1);
    }

    #[test]
    fn validation_errors_are_passed_on() {
        assert_eq!(
            parse_table("State | a\n→p | q"),
            Err(TableParseError::Invalid(AutomatonError::UnknownTarget {
                origin: "p".into(),
                symbol: "a".into(),
                target: "q".into()
            }))
        );
        assert_eq!(
            parse_table("State | a\np | p\np | p"),
            Err(TableParseError::Invalid(AutomatonError::DuplicateState(
                "p".into()
            )))
        );
        assert_eq!(
            parse_table("State | a"),
            Err(TableParseError::Invalid(AutomatonError::NoStates))
        );
    }
}
