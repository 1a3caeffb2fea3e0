use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Finite set of symbols a regex may mention and an input may contain.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Alphabet {
    symbols: BTreeSet<char>,
}

impl Alphabet {
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    /// First character of `s` that is not part of the alphabet.
    pub fn first_foreign(&self, s: &str) -> Option<char> {
        s.chars().find(|c| !self.contains(*c))
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Builds the alphabet from a declaration body, e.g. `"ab"` declares `{a, b}`.
impl From<&str> for Alphabet {
    fn from(declaration: &str) -> Self {
        Self::new(declaration.chars())
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.symbols.iter().collect::<String>())
    }
}
