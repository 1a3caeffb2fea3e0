pub mod cursor;

use crate::definitions::TokenDefinitions;
use crate::error::{InvalidTokenReason, LexError, LexErrorKind};
use cursor::{Cursor, CursorPosition};
use indexmap::IndexMap;
use munch_regex::{Alphabet, Dfa, Recognizer, Regex};
#[cfg(test)]
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A whitespace-delimited piece of the source that still has to be consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub position: CursorPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(Serialize))]
pub struct Token {
    pub kind: String,
    pub lexeme: String,
    pub position: CursorPosition,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {:?})", self.kind, self.lexeme)
    }
}

/// Longest-match tokenizer.
///
/// Every candidate is matched against the token recognizers; the longest
/// accepted prefix wins and ties go to the kind declared first. Whatever is
/// left of the candidate goes back to the front of the queue.
pub struct Lexer<R> {
    alphabet: Alphabet,
    recognizers: IndexMap<String, R>,
    candidates: VecDeque<Candidate>,
}

impl Lexer<Arc<Dfa>> {
    /// Compiles every definition and splits `source` into candidates.
    ///
    /// Definitions sharing a pattern share one compiled recognizer.
    pub fn new(
        alphabet: Alphabet,
        definitions: &TokenDefinitions,
        source: &str,
    ) -> Result<Self, LexError> {
        let mut compiled: HashMap<&str, Arc<Dfa>> = HashMap::new();
        let mut recognizers = IndexMap::with_capacity(definitions.len());

        for (name, pattern) in definitions.iter() {
            let dfa = match compiled.get(pattern) {
                Some(dfa) => Arc::clone(dfa),
                None => {
                    let regex = Regex::with_syntax(&alphabet, pattern, definitions.syntax())
                        .map_err(|error| {
                            LexError::new_general(LexErrorKind::InvalidExpression {
                                token: name.to_string(),
                                error,
                            })
                        })?;
                    let dfa = Arc::new(regex.into_dfa());
                    compiled.insert(pattern, Arc::clone(&dfa));
                    dfa
                }
            };
            recognizers.insert(name.to_string(), dfa);
        }

        tracing::debug!(
            token_kinds = recognizers.len(),
            distinct_patterns = compiled.len(),
            "Compiled token definitions"
        );

        Ok(Self::with_recognizers(alphabet, recognizers, source))
    }
}

impl<R: Recognizer> Lexer<R> {
    /// Builds a lexer over already compiled recognizers, in declaration order.
    pub fn with_recognizers(
        alphabet: Alphabet,
        recognizers: impl IntoIterator<Item = (String, R)>,
        source: &str,
    ) -> Self {
        let mut cursor = Cursor::new(source);
        let candidates: VecDeque<Candidate> = std::iter::from_fn(|| cursor.next_word())
            .map(|(position, text)| Candidate { text, position })
            .collect();

        tracing::trace!(candidates = candidates.len(), "Split source");

        Self {
            alphabet,
            recognizers: recognizers.into_iter().collect(),
            candidates,
        }
    }

    /// Emits the token for the longest recognized prefix of the front
    /// candidate.
    ///
    /// On `InvalidToken` the queue is left as it was; call
    /// [`Lexer::skip_candidate`] to move past the offending candidate.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let Some(candidate) = self.candidates.pop_front() else {
            return Err(LexError::new_general(LexErrorKind::EndOfInput));
        };

        let (kind, end, width) = match self.longest_match(&candidate.text) {
            Ok(found) => found,
            Err(reason) => {
                tracing::debug!(candidate = %candidate.text, %reason, "Rejected candidate");
                let err = LexError::new(
                    LexErrorKind::InvalidToken {
                        candidate: candidate.text.clone(),
                        reason,
                    },
                    candidate.position,
                );
                self.candidates.push_front(candidate);
                return Err(err);
            }
        };

        let (lexeme, rest) = candidate.text.split_at(end);
        if !rest.is_empty() {
            self.candidates.push_front(Candidate {
                text: rest.to_string(),
                position: candidate.position.advanced(width),
            });
        }

        let token = Token {
            kind,
            lexeme: lexeme.to_string(),
            position: candidate.position,
        };
        tracing::debug!(%token, position = %token.position, "Emitting token");
        Ok(token)
    }

    /// Drops the front candidate, typically after it was rejected.
    pub fn skip_candidate(&mut self) -> Option<Candidate> {
        self.candidates.pop_front()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn is_exhausted(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn token_kinds(&self) -> impl Iterator<Item = &str> {
        self.recognizers.keys().map(String::as_str)
    }

    /// Runs the lexer until the input is exhausted or a candidate is rejected.
    ///
    /// Tokens emitted before a rejection are returned alongside the error;
    /// the rejected candidate stays queued.
    pub fn tokenize(&mut self) -> (Vec<Token>, Option<LexError>) {
        let mut tokens = Vec::new();
        loop {
            match self.next_token() {
                Ok(token) => tokens.push(token),
                Err(err) if err.is_end_of_input() => return (tokens, None),
                Err(err) => return (tokens, Some(err)),
            }
        }
    }

    /// Kind, byte length and character length of the longest recognized
    /// prefix of `text`.
    fn longest_match(&self, text: &str) -> Result<(String, usize, usize), InvalidTokenReason> {
        if let Some(c) = self.alphabet.first_foreign(text) {
            return Err(InvalidTokenReason::OutOfAlphabet(c));
        }

        text.char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .enumerate()
            .filter_map(|(n, end)| {
                let prefix = &text[..end];
                self.recognizers
                    .iter()
                    .find(|(_, recognizer)| recognizer.accepts(prefix))
                    .map(|(kind, _)| (kind.clone(), end, n + 1))
            })
            .last()
            .ok_or(InvalidTokenReason::NoMatch)
    }
}
