//! Lexer error type.

use glint_util::{Span, Spanned};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{reason} (line {}, column {})", span.line, span.column)]
pub struct LexError {
    pub reason: String,
    pub span: Span,
}

impl LexError {
    pub fn new(reason: impl Into<String>, span: Span) -> Self {
        Self {
            reason: reason.into(),
            span,
        }
    }
}

impl Spanned for LexError {
    fn span(&self) -> Span {
        self.span
    }
}
