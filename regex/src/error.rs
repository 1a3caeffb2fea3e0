#[cfg(test)]
use serde::Serialize;

/// Reasons a regex string is rejected. Positions are character offsets into
/// the pattern.
#[derive(Clone, PartialEq, Debug, thiserror::Error)]
#[cfg_attr(test, derive(Serialize))]
pub enum SyntaxError {
    #[error("Trailing backslash escapes nothing")]
    EscapedNothing,
    #[error("Symbol {symbol:?} at position {position} is not part of the alphabet")]
    UnknownSymbol { symbol: char, position: usize },
    #[error("Operator '{operator}' at position {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },
    #[error("Closing parenthesis at position {0} has no matching '('")]
    UnexpectedClosingParenthesis(usize),
    #[error("Parenthesis opened at position {0} is never closed")]
    UnclosedParenthesis(usize),
    #[error("Expression is empty")]
    EmptyExpression,
    #[error("Expression leaves {0} unconnected operands")]
    DanglingOperands(usize),
}
