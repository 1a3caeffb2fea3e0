#[cfg(test)]
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::Chars;

/// Line and column of a character, both 1-based once a character is read.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Serialize))]
pub struct CursorPosition {
    pub cur_line: usize,
    pub cur_pos: usize,
}

pub(super) struct Cursor<'a> {
    data: Peekable<Chars<'a>>,
    cursor_pos: CursorPosition,
}

impl CursorPosition {
    pub fn new(cur_line: usize, cur_pos: usize) -> Self {
        CursorPosition { cur_line, cur_pos }
    }

    /// Same line, `columns` characters further right.
    pub fn advanced(&self, columns: usize) -> Self {
        CursorPosition {
            cur_line: self.cur_line,
            cur_pos: self.cur_pos + columns,
        }
    }
}

impl Default for CursorPosition {
    fn default() -> Self {
        Self {
            cur_line: 1,
            cur_pos: 0,
        }
    }
}

impl Display for CursorPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.cur_line, self.cur_pos)
    }
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data: data.chars().peekable(),
            cursor_pos: CursorPosition::default(),
        }
    }

    pub fn skip_white_spaces(&mut self) {
        while let Some(c) = self.data.peek() {
            if c.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    pub fn next(&mut self) -> Option<char> {
        if let Some(n) = self.data.next() {
            self.cursor_pos.cur_pos += 1;
            if n == '\n' {
                self.cursor_pos.cur_pos = 0;
                self.cursor_pos.cur_line += 1;
            }
            Some(n)
        } else {
            None
        }
    }

    pub fn peek(&mut self) -> Option<&char> {
        self.data.peek()
    }

    pub fn get_position(&self) -> CursorPosition {
        self.cursor_pos
    }

    pub fn is_eof(&mut self) -> bool {
        self.data.peek().is_none()
    }

    /// Next whitespace-delimited word and the position of its first character.
    pub fn next_word(&mut self) -> Option<(CursorPosition, String)> {
        self.skip_white_spaces();
        if self.is_eof() {
            return None;
        }

        let start = self.get_position().advanced(1);
        let mut word = String::with_capacity(16);
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                break;
            }
            word.push(c);
            self.next();
        }

        Some((start, word))
    }
}
