#[cfg(test)]
use serde::Serialize;

use crate::alphabet::Alphabet;
use crate::error::SyntaxError;
use crate::nfa::Nfa;
use crate::token::{RegexSyntax, Token, TokenSequence};

/// Two-stack operator-precedence parser over an already tokenized pattern.
struct AstParser {
    seq: TokenSequence,
    operands: Vec<RegexAstNode>,
    operators: Vec<(usize, Token)>,
}

impl AstParser {
    pub fn parse(seq: TokenSequence) -> Result<RegexAstNode, SyntaxError> {
        let mut parser = Self {
            seq,
            operands: vec![],
            operators: vec![],
        };
        let mut prev: Option<Token> = None;

        while let Some((pos, token)) = parser.seq.next_enumerated() {
            match token {
                Token::Symbol(c) => parser.operands.push(RegexAstNode::Symbol(c)),
                Token::Epsilon => parser.operands.push(RegexAstNode::Epsilon),
                Token::Empty => parser.operands.push(RegexAstNode::Empty),
                Token::LParen => parser.operators.push((pos, token)),
                Token::RParen => parser.close_group(pos)?,
                Token::Star | Token::Concat | Token::Union => {
                    if !prev.is_some_and(|p| p.ends_operand()) {
                        return Err(SyntaxError::MissingOperand {
                            operator: char::from(&token),
                            position: pos,
                        });
                    }
                    parser.push_operator(pos, token)?;
                }
            }
            prev = Some(token);
        }

        parser.finish()
    }

    fn precedence(token: &Token) -> u8 {
        match token {
            Token::Union => 1,
            Token::Concat => 2,
            Token::Star => 3,
            _ => 0,
        }
    }

    fn push_operator(&mut self, pos: usize, op: Token) -> Result<(), SyntaxError> {
        while let Some(&(top_pos, top)) = self.operators.last() {
            if top == Token::LParen || Self::precedence(&top) < Self::precedence(&op) {
                break;
            }
            self.operators.pop();
            self.reduce(top_pos, top)?;
        }
        self.operators.push((pos, op));
        Ok(())
    }

    fn close_group(&mut self, pos: usize) -> Result<(), SyntaxError> {
        loop {
            match self.operators.pop() {
                Some((_, Token::LParen)) => return Ok(()),
                Some((op_pos, op)) => self.reduce(op_pos, op)?,
                None => return Err(SyntaxError::UnexpectedClosingParenthesis(pos)),
            }
        }
    }

    fn pop_operand(&mut self, pos: usize, op: &Token) -> Result<Box<RegexAstNode>, SyntaxError> {
        self.operands
            .pop()
            .map(Box::new)
            .ok_or(SyntaxError::MissingOperand {
                operator: char::from(op),
                position: pos,
            })
    }

    fn reduce(&mut self, pos: usize, op: Token) -> Result<(), SyntaxError> {
        tracing::trace!(operator = %op, position = pos, "Reducing operator");

        let node = match op {
            Token::Star => RegexAstNode::Star(self.pop_operand(pos, &op)?),
            Token::Concat | Token::Union => {
                let right = self.pop_operand(pos, &op)?;
                let left = self.pop_operand(pos, &op)?;
                if op == Token::Concat {
                    RegexAstNode::Concat(left, right)
                } else {
                    RegexAstNode::Union(left, right)
                }
            }
            // only reachable when a group is still open at the end
            _ => return Err(SyntaxError::UnclosedParenthesis(pos)),
        };
        self.operands.push(node);
        Ok(())
    }

    fn finish(mut self) -> Result<RegexAstNode, SyntaxError> {
        while let Some((pos, op)) = self.operators.pop() {
            self.reduce(pos, op)?;
        }

        match self.operands.len() {
            0 => Err(SyntaxError::EmptyExpression),
            1 => Ok(self.operands.remove(0)),
            n => Err(SyntaxError::DanglingOperands(n)),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(test, derive(Serialize))]
pub enum RegexAstNode {
    Symbol(char),
    Epsilon,
    Empty,
    Concat(Box<RegexAstNode>, Box<RegexAstNode>),
    Union(Box<RegexAstNode>, Box<RegexAstNode>),
    Star(Box<RegexAstNode>),
}

impl RegexAstNode {
    pub fn new(
        pattern: &str,
        alphabet: &Alphabet,
        syntax: &RegexSyntax,
    ) -> Result<Self, SyntaxError> {
        let sequence =
            TokenSequence::tokenize(pattern, alphabet, syntax)?.with_implicit_concatenation();
        AstParser::parse(sequence)
    }

    /// Builds the Thompson-style fragment recognizing exactly this node's language.
    pub fn to_nfa(&self) -> Nfa {
        match self {
            RegexAstNode::Symbol(c) => Nfa::from_symbol(*c),
            RegexAstNode::Epsilon => Nfa::from_epsilon(),
            RegexAstNode::Empty => Nfa::empty_language(),
            RegexAstNode::Concat(left, right) => {
                let mut left_nfa = left.to_nfa();
                let right_nfa = right.to_nfa();

                left_nfa.concatenate(&right_nfa);
                left_nfa
            }
            RegexAstNode::Union(left, right) => {
                let mut left_nfa = left.to_nfa();
                let right_nfa = right.to_nfa();

                left_nfa.alternate(&right_nfa);
                left_nfa
            }
            RegexAstNode::Star(operand) => {
                let mut nfa_child = operand.to_nfa();

                nfa_child.kleene_star();
                nfa_child
            }
        }
    }
}
