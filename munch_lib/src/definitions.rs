use indexmap::IndexMap;
use munch_regex::RegexSyntax;

/// Ordered token kinds and their patterns. Declaration order is the lexer's
/// tie-break order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenDefinitions {
    patterns: IndexMap<String, String>,
    syntax: RegexSyntax,
}

impl TokenDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker characters used when the patterns are compiled.
    pub fn with_syntax(mut self, syntax: RegexSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Declares `name`. Redeclaring a name replaces its pattern but keeps its
    /// original place in the order.
    pub fn define(&mut self, name: impl Into<String>, pattern: impl Into<String>) -> &mut Self {
        let name = name.into();
        let pattern = pattern.into();
        if let Some(previous) = self.patterns.insert(name.clone(), pattern) {
            tracing::warn!(token = %name, %previous, "Token definition overridden");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.patterns.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.patterns.iter().map(|(n, p)| (n.as_str(), p.as_str()))
    }

    pub fn syntax(&self) -> &RegexSyntax {
        &self.syntax
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<N: Into<String>, P: Into<String>> FromIterator<(N, P)> for TokenDefinitions {
    fn from_iter<T: IntoIterator<Item = (N, P)>>(iter: T) -> Self {
        let mut definitions = Self::new();
        for (name, pattern) in iter {
            definitions.define(name, pattern);
        }
        definitions
    }
}
