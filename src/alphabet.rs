use std::{borrow::Borrow, fmt};

/// The reserved name of the empty word. Transitions on this symbol are spontaneous, they
/// consume no input.
pub const EPSILON: &str = "ε";

/// A single input symbol of an automaton. The symbol named [`EPSILON`] is reserved and marks
/// epsilon transitions.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol with the given name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Returns the epsilon symbol.
    pub fn epsilon() -> Self {
        Self(EPSILON.to_string())
    }

    /// Returns true if `self` is the epsilon symbol.
    pub fn is_epsilon(&self) -> bool {
        self.0 == EPSILON
    }

    /// The name of the symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

impl From<&Symbol> for Symbol {
    fn from(value: &Symbol) -> Self {
        value.clone()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered collection of distinct, non-epsilon symbols.
///
/// The order in which symbols were added is kept, it determines the columns of rendered
/// transition tables and the order in which symbols are probed by the conversions. The
/// position of a symbol is used to index the transition rows of deterministic automata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// Creates an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an alphabet with `size` symbols `a`, `b`, `c`, ... . Beyond `z`, the
    /// symbols are named `s26`, `s27`, ... .
    pub fn of_size(size: usize) -> Self {
        (0..size)
            .map(|i| match u8::try_from(i) {
                Ok(offset) if offset < 26 => Symbol::from(char::from(b'a' + offset)),
                _ => Symbol::new(format!("s{i}")),
            })
            .collect()
    }

    /// Adds `symbol` and returns its position. Epsilon is never part of an alphabet, for
    /// it `None` is returned. Adding a symbol twice keeps its first position.
    pub fn push(&mut self, symbol: Symbol) -> Option<usize> {
        if symbol.is_epsilon() {
            return None;
        }
        if let Some(pos) = self.position(&symbol) {
            return Some(pos);
        }
        self.symbols.push(symbol);
        Some(self.symbols.len() - 1)
    }

    /// The position of the given symbol, if it belongs to the alphabet.
    pub fn position<Q>(&self, symbol: &Q) -> Option<usize>
    where
        Symbol: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.symbols
            .iter()
            .position(|s| <Symbol as Borrow<Q>>::borrow(s) == symbol)
    }

    /// Checks whether the given symbol belongs to the alphabet.
    pub fn contains<Q>(&self, symbol: &Q) -> bool
    where
        Symbol: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.position(symbol).is_some()
    }

    /// Returns the symbol at position `pos`.
    pub fn get(&self, pos: usize) -> Option<&Symbol> {
        self.symbols.get(pos)
    }

    /// The number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over the symbols in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }
}

impl std::ops::Index<usize> for Alphabet {
    type Output = Symbol;

    fn index(&self, index: usize) -> &Self::Output {
        &self.symbols[index]
    }
}

impl<S: Into<Symbol>> FromIterator<S> for Alphabet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut alphabet = Alphabet::new();
        for symbol in iter {
            alphabet.push(symbol.into());
        }
        alphabet
    }
}

impl<'a> IntoIterator for &'a Alphabet {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}
