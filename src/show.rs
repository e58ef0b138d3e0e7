use crate::prelude::*;

/// Marks the initial state in the `State` column of a transition table.
pub(crate) const INITIAL_MARKER: &str = "→";
/// Marks accepting states in the `State` column of a transition table.
pub(crate) const FINAL_MARKER: &str = "*";
/// Written into a transition table cell for which no transition exists.
pub(crate) const UNDEFINED: &str = "φ";

/// Helper trait which can be used to display states, sets of states and whole automata.
pub trait Show {
    /// Returns a human readable representation of `self`. For a state that is simply its name,
    /// for a set of states something like `{q0,q1}` and for an automaton its transition table.
    fn show(&self) -> String;
}

impl Show for State {
    fn show(&self) -> String {
        self.as_str().to_string()
    }
}

impl Show for Symbol {
    fn show(&self) -> String {
        self.as_str().to_string()
    }
}

impl Show for StateSet {
    fn show(&self) -> String {
        format!("{{{}}}", self.join(","))
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

/// Decorates a state label with the markers for initial and accepting states.
pub(crate) fn decorate(label: String, initial: bool, accepting: bool) -> String {
    format!(
        "{}{}{}",
        if initial { INITIAL_MARKER } else { "" },
        label,
        if accepting { FINAL_MARKER } else { "" }
    )
}

/// Builds the string representation of a transition table. The first column is titled `State`,
/// followed by one column for each of the given `columns`. Each row should start with the
/// decorated state label.
pub(crate) fn transition_table<C, R>(columns: C, rows: R) -> String
where
    C: IntoIterator<Item = String>,
    R: IntoIterator<Item = Vec<String>>,
{
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(std::iter::once("State".to_string()).chain(columns));
    for row in rows {
        builder.push_record(row);
    }

    builder
        .build()
        .with(tabled::settings::Style::rounded())
        .to_string()
}

/// Renders the targets of a nondeterministic transition as a table cell.
pub(crate) fn targets_cell(targets: Option<&StateSet>) -> String {
    match targets {
        Some(set) if !set.is_empty() => set.join(","),
        _ => UNDEFINED.to_string(),
    }
}
