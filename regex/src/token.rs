use crate::alphabet::Alphabet;
use crate::error::SyntaxError;
use std::fmt::{Display, Formatter};

/// Characters reserved for the two leaf markers of the regex language.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RegexSyntax {
    pub epsilon: char,
    pub empty: char,
}

impl Default for RegexSyntax {
    fn default() -> Self {
        Self {
            epsilon: 'e',
            empty: 'N',
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub(crate) enum Token {
    Symbol(char),
    Epsilon,
    Empty,
    Star,
    Concat,
    Union,
    LParen,
    RParen,
}

impl Token {
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Symbol(_) | Token::Epsilon | Token::Empty | Token::RParen | Token::Star
        )
    }

    pub fn starts_operand(&self) -> bool {
        matches!(
            self,
            Token::Symbol(_) | Token::Epsilon | Token::Empty | Token::LParen
        )
    }
}

#[derive(Clone, Debug)]
pub(crate) struct TokenSequence {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl TokenSequence {
    pub fn new(tokens: Vec<(usize, Token)>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Splits `pattern` into positioned tokens, resolving escapes and markers.
    pub fn tokenize(
        pattern: &str,
        alphabet: &Alphabet,
        syntax: &RegexSyntax,
    ) -> Result<Self, SyntaxError> {
        let mut tokens = Vec::with_capacity(pattern.len());
        let mut pattern_iter = pattern.chars().enumerate();

        while let Some((pos, cur)) = pattern_iter.next() {
            let token = match cur {
                '\\' => match pattern_iter.next() {
                    Some((_, escaped)) => Token::Symbol(escaped),
                    None => return Err(SyntaxError::EscapedNothing),
                },
                '*' => Token::Star,
                '&' => Token::Concat,
                '|' => Token::Union,
                '(' => Token::LParen,
                ')' => Token::RParen,
                c if c == syntax.epsilon => Token::Epsilon,
                c if c == syntax.empty => Token::Empty,
                c if alphabet.contains(c) => Token::Symbol(c),
                c => {
                    return Err(SyntaxError::UnknownSymbol {
                        symbol: c,
                        position: pos,
                    });
                }
            };
            tokens.push((pos, token));
        }
        Ok(TokenSequence::new(tokens))
    }

    /// Inserts a concatenation between every operand end immediately followed
    /// by an operand start, e.g. `ab`, `a(`, `)a`, `*a`, `)(`.
    pub fn with_implicit_concatenation(self) -> Self {
        let mut tokens = Vec::with_capacity(self.tokens.len() * 2);
        let mut prev: Option<Token> = None;

        for (pos, token) in self.tokens {
            if prev.is_some_and(|p| p.ends_operand()) && token.starts_operand() {
                tokens.push((pos, Token::Concat));
            }
            tokens.push((pos, token));
            prev = Some(token);
        }
        Self { tokens, pos: 0 }
    }

    pub fn next_enumerated(&mut self) -> Option<(usize, Token)> {
        let next = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(next)
    }

    #[cfg(test)]
    pub fn next(&mut self) -> Option<Token> {
        self.next_enumerated().map(|(_index, token)| token)
    }

    #[cfg(test)]
    pub fn collect(&mut self) -> Vec<Token> {
        let mut res = Vec::new();
        while let Some(tok) = self.next() {
            res.push(tok);
        }
        res
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Symbol(c @ ('*' | '&' | '|' | '(' | ')' | '\\')) => write!(f, "\\{c}"),
            _ => write!(f, "{}", char::from(self)),
        }
    }
}

impl From<&Token> for char {
    fn from(value: &Token) -> Self {
        match value {
            Token::Symbol(c) => *c,
            Token::Epsilon => 'ε',
            Token::Empty => '∅',
            Token::Star => '*',
            Token::Concat => '&',
            Token::Union => '|',
            Token::LParen => '(',
            Token::RParen => ')',
        }
    }
}
