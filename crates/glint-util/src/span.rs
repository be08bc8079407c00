//! Source positions.

use std::fmt;

/// A 1-based line/column position in a template source string.
///
/// Every token and AST node carries one of these so that lex, parse and
/// evaluation errors can all point back at the exact source location that
/// produced them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position a cursor starts at: line 1, column 1.
    pub const START: Span = Span::new(1, 1);

    pub fn is_valid(self) -> bool {
        self.line >= 1 && self.column >= 1
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
