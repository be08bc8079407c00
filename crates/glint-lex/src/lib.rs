//! Tokenizer for glint templates.
//!
//! Turns template source into a flat token stream, switching between text
//! and expression lexing modes at `{{`, `{%`, `}}` and `%}` boundaries, and
//! emitting a textless `Comment` token for each `{# ... #}` span so the
//! parser can build a no-op `Statement::Comment` placeholder.

mod cursor;
mod error;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
