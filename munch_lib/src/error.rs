use crate::tokenizer::cursor::CursorPosition;
use munch_regex::SyntaxError;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidTokenReason {
    #[error("character {0:?} is not part of the alphabet")]
    OutOfAlphabet(char),
    #[error("no token definition matches any prefix")]
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("Token {token:?} has an invalid expression: {error}")]
    InvalidExpression { token: String, error: SyntaxError },
    #[error("Invalid token {candidate:?}: {reason}")]
    InvalidToken {
        candidate: String,
        reason: InvalidTokenReason,
    },
    #[error("End of input")]
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct LexError {
    kind: LexErrorKind,
    position: Option<CursorPosition>,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: CursorPosition) -> Self {
        LexError {
            kind,
            position: Some(position),
        }
    }

    pub fn new_general(kind: LexErrorKind) -> Self {
        LexError {
            kind,
            position: None,
        }
    }

    pub fn kind(&self) -> &LexErrorKind {
        &self.kind
    }

    pub fn position(&self) -> Option<&CursorPosition> {
        self.position.as_ref()
    }

    /// The queue ran dry; a normal termination signal rather than a defect.
    pub fn is_end_of_input(&self) -> bool {
        self.kind == LexErrorKind::EndOfInput
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(pos) = &self.position {
            write!(f, "{pos}: ")?;
        }
        write!(f, "{}", self.kind)
    }
}
