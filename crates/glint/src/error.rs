//! Facade error type.
//!
//! Unifies the per-stage `thiserror` enums (`glint_lex::LexError`,
//! `glint_parse::ParseError`, `glint_eval::EvalError`) the way
//! `faxt::error::FaxtError` unifies its command-layer errors: one
//! user-facing enum with `#[from]` conversions, so a caller of `Compile` or
//! `Execute` never has to match on which pipeline stage failed to read
//! `(line, column, message)`.

use glint_util::{Span, Spanned};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] glint_lex::LexError),

    #[error(transparent)]
    Parse(#[from] glint_parse::ParseError),

    #[error(transparent)]
    Eval(#[from] glint_eval::EvalError),
}

impl Spanned for Error {
    fn span(&self) -> Span {
        match self {
            Error::Lex(e) => e.span(),
            Error::Parse(e) => e.span(),
            Error::Eval(e) => e.span(),
        }
    }
}

impl Error {
    /// True if this error is the one recoverable kind: an output
    /// expression whose root variable wasn't found in context. A caller
    /// that only cares about hard failures (lex/parse errors, and
    /// evaluation errors other than a missing variable) can use this to
    /// tell the two apart without matching on `glint_eval::EvalError`
    /// directly.
    pub fn is_missing_variable(&self) -> bool {
        matches!(self, Error::Eval(e) if e.is_missing_variable())
    }
}
