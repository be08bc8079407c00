//! glint-util — Shared Foundation Types
//!
//! This crate provides the small set of types used across every stage of
//! the glint pipeline (lexer, parser, evaluator): interned identifiers,
//! source positions, and a diagnostic collector. Nothing here has any
//! notion of template syntax or values — that lives in `glint-lex`,
//! `glint-parse` and `glint-eval` respectively.

mod diagnostic;
mod span;
mod symbol;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use span::Span;
pub use symbol::Symbol;

/// Anything that can point back at the source location that produced it.
///
/// Implemented by each crate's error type so that a `glint::Error` at the
/// facade boundary can report `(line, column, message)` uniformly
/// regardless of which stage raised it.
pub trait Spanned {
    fn span(&self) -> Span;
}
