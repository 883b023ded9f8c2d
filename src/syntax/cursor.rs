//! Character cursor shared by the grammar rules.
//!
//! The cursor borrows the input and tracks a byte offset into it. Reading past
//! the end yields `None` forever, which plays the role of the terminator the
//! rules rely on to stop.

/// A read position within a borrowed input string.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    input: &'src str,
    offset: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(input: &'src str) -> Self {
        Self { input, offset: 0 }
    }

    /// Returns the current character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    /// Returns true if the current character equals `expected`.
    pub fn at(&self, expected: char) -> bool {
        self.peek() == Some(expected)
    }

    /// Moves past the current character. Does nothing at end of input.
    pub fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.offset += ch.len_utf8();
        }
    }

    /// Byte offset of the current character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'src str {
        &self.input[self.offset..]
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.input.len()
    }

    pub fn input(&self) -> &'src str {
        self.input
    }
}
