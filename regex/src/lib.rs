pub use alphabet::Alphabet;
pub use ast::RegexAstNode;
pub use dfa::{Dfa, Recognizer};
pub use error::SyntaxError;
pub use nfa::{Embedding, Label, Nfa, StateId, Transition};
pub use token::RegexSyntax;

mod alphabet;
mod ast;
mod dfa;
mod error;
mod nfa;
mod token;

/// Parses `pattern` with the default markers (`e` for epsilon, `N` for the
/// empty language).
pub fn parse(alphabet: &Alphabet, pattern: &str) -> Result<RegexAstNode, SyntaxError> {
    RegexAstNode::new(pattern, alphabet, &RegexSyntax::default())
}

/// A pattern compiled all the way down to a deterministic recognizer.
#[derive(Debug, Clone)]
pub struct Regex {
    ast: RegexAstNode,
    nfa: Nfa,
    dfa: Dfa,
}

impl Regex {
    pub fn new(alphabet: &Alphabet, pattern: &str) -> Result<Self, SyntaxError> {
        Self::with_syntax(alphabet, pattern, &RegexSyntax::default())
    }

    pub fn with_syntax(
        alphabet: &Alphabet,
        pattern: &str,
        syntax: &RegexSyntax,
    ) -> Result<Self, SyntaxError> {
        let ast = RegexAstNode::new(pattern, alphabet, syntax)?;
        let nfa = ast.to_nfa();
        let dfa = Dfa::from_nfa(&nfa);

        tracing::debug!(
            pattern,
            nfa_states = nfa.num_states(),
            dfa_states = dfa.num_states(),
            "Compiled regex"
        );

        Ok(Self { ast, nfa, dfa })
    }

    pub fn ast(&self) -> &RegexAstNode {
        &self.ast
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    pub fn into_dfa(self) -> Dfa {
        self.dfa
    }

    pub fn is_exact_match(&self, s: &str) -> bool {
        self.dfa.accepts(s)
    }
}

impl Recognizer for Regex {
    fn accepts(&self, input: &str) -> bool {
        self.is_exact_match(input)
    }
}
