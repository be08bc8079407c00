//! Parser error type.

use glint_util::{Span, Spanned};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{reason} (line {}, column {})", span.line, span.column)]
pub struct ParseError {
    pub reason: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(reason: impl Into<String>, span: Span) -> Self {
        Self {
            reason: reason.into(),
            span,
        }
    }
}

impl Spanned for ParseError {
    fn span(&self) -> Span {
        self.span
    }
}

impl From<glint_lex::LexError> for ParseError {
    fn from(err: glint_lex::LexError) -> Self {
        ParseError::new(err.reason, err.span)
    }
}
