pub mod definitions;
pub mod error;
pub mod tokenizer;

pub use definitions::TokenDefinitions;
pub use error::{InvalidTokenReason, LexError, LexErrorKind};
pub use tokenizer::cursor::CursorPosition;
pub use tokenizer::{Candidate, Lexer, Token};
