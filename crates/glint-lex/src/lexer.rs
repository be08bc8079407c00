//! Main lexer: turns template source into a token stream.
//!
//! The lexer has two modes (spec §4.1). In *text* mode it hands back
//! whatever literal text precedes the next `{{`, `{%` or `{#`; in
//! *expression* mode — entered after `{{` or `{%` — it tokenizes the
//! Liquid-ish expression grammar and switches back to text mode on the
//! matching `}}`/`%}`.

use glint_util::Span;

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// What the lexer is currently doing.
enum Mode {
    /// Between tags, producing `Text` tokens.
    Text,
    /// Inside `{{ ... }}` or `{% ... %}`, tokenizing expression syntax.
    /// `closer` is the delimiter that will switch back to `Text` mode, and
    /// `opened_at` is its opening tag's position (for "unterminated"
    /// diagnostics).
    Expr { closer: &'static str, opened_at: Span },
}

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    mode: Mode,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            mode: Mode::Text,
        }
    }

    /// Tokenizes the entire source, returning a sequence of tokens
    /// terminated by a single `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.is_eof();
            tokens.push(tok);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    fn pos(&self) -> Span {
        Span::new(self.cursor.line(), self.cursor.column())
    }

    /// Produces the next token.
    fn next_token(&mut self) -> Result<Token, LexError> {
        if self.cursor.is_at_end() {
            if let Mode::Expr { opened_at, .. } = &self.mode {
                return Err(LexError::new("unterminated tag", *opened_at));
            }
            return Ok(Token::new(TokenKind::Eof, "", self.pos()));
        }

        match self.mode {
            Mode::Text => self.lex_text(),
            Mode::Expr { .. } => self.lex_expr(),
        }
    }

    /// Consumes one chunk of text mode: either a `Text` token, a mode
    /// switch into expression mode (returning `VarBegin`/`TagBegin`), or a
    /// `{# ... #}` comment (consumed in full, emitted as a `Comment` token
    /// so the parser can still build a `Statement::Comment` placeholder).
    fn lex_text(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.position();
        let start_span = self.pos();

        while !self.cursor.is_at_end() {
            if self.cursor.starts_with("{{") {
                return self.emit_text_or_open(start, start_span, "{{", "}}", TokenKind::VarBegin);
            }
            if self.cursor.starts_with("{%") {
                return self.emit_text_or_open(start, start_span, "{%", "%}", TokenKind::TagBegin);
            }
            if self.cursor.starts_with("{#") {
                if start != self.cursor.position() {
                    let text = self.cursor.slice_from(start).to_string();
                    return Ok(Token::new(TokenKind::Text, text, start_span));
                }
                let comment_span = self.pos();
                self.skip_comment()?;
                return Ok(Token::new(TokenKind::Comment, "", comment_span));
            }
            self.cursor.advance();
        }

        if start == self.cursor.position() {
            return Ok(Token::new(TokenKind::Eof, "", start_span));
        }
        let text = self.cursor.slice_from(start).to_string();
        Ok(Token::new(TokenKind::Text, text, start_span))
    }

    /// Helper for `lex_text`: if text has accumulated before the opening
    /// delimiter at the cursor, emit that text (leaving the delimiter for
    /// the next call); otherwise consume the delimiter and switch to
    /// expression mode.
    fn emit_text_or_open(
        &mut self,
        text_start: usize,
        text_start_span: Span,
        open: &'static str,
        closer: &'static str,
        kind: TokenKind,
    ) -> Result<Token, LexError> {
        if text_start != self.cursor.position() {
            let text = self.cursor.slice_from(text_start).to_string();
            return Ok(Token::new(TokenKind::Text, text, text_start_span));
        }
        let open_span = self.pos();
        self.cursor.advance_n(open.chars().count());
        self.mode = Mode::Expr {
            closer,
            opened_at: open_span,
        };
        Ok(Token::new(kind, open, open_span))
    }

    fn skip_comment(&mut self) -> Result<(), LexError> {
        let open_span = self.pos();
        self.cursor.advance_n(2); // "{#"
        match self.cursor.find("#}") {
            Some(end) => {
                while self.cursor.position() < end {
                    self.cursor.advance();
                }
                self.cursor.advance_n(2); // "#}"
                Ok(())
            }
            None => Err(LexError::new("unterminated comment", open_span)),
        }
    }

    fn lex_expr(&mut self) -> Result<Token, LexError> {
        self.skip_inline_whitespace();

        let (closer, opened_at) = match self.mode {
            Mode::Expr { closer, opened_at } => (closer, opened_at),
            Mode::Text => unreachable!("lex_expr called outside expression mode"),
        };

        if self.cursor.is_at_end() {
            return Err(LexError::new("unterminated tag", opened_at));
        }

        let start_span = self.pos();

        // Closing delimiter for the tag kind we're inside.
        if self.cursor.starts_with(closer) {
            self.cursor.advance_n(closer.chars().count());
            self.mode = Mode::Text;
            let kind = if closer == "}}" {
                TokenKind::VarEnd
            } else {
                TokenKind::TagEnd
            };
            return Ok(Token::new(kind, closer, start_span));
        }
        // The *other* tag's closer appearing here means the writer opened
        // one kind of tag and tried to close it with the other.
        let other_closer = if closer == "}}" { "%}" } else { "}}" };
        if self.cursor.starts_with(other_closer) {
            return Err(LexError::new(
                format!("stray '{other_closer}' outside a matching tag"),
                start_span,
            ));
        }

        let c = self.cursor.current();
        if c.is_ascii_digit() {
            return self.lex_number(start_span);
        }
        if c == '"' || c == '\'' {
            return self.lex_string(c, start_span);
        }
        if is_ident_start(c) {
            return self.lex_identifier(start_span);
        }

        self.lex_symbol(start_span)
    }

    fn skip_inline_whitespace(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current().is_whitespace() {
            self.cursor.advance();
        }
    }

    fn lex_number(&mut self, span: Span) -> Result<Token, LexError> {
        let start = self.cursor.position();
        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }
        if self.cursor.current() == '.' && self.cursor.peek(1).is_ascii_digit() {
            self.cursor.advance(); // '.'
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }
        }
        let text = self.cursor.slice_from(start).to_string();
        let value: f64 = text
            .parse()
            .map_err(|_| LexError::new(format!("invalid number literal '{text}'"), span))?;
        Ok(Token::new(TokenKind::Number(value), text, span))
    }

    fn lex_string(&mut self, quote: char, span: Span) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote
        let start = self.cursor.position();
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::new("unterminated string literal", span));
            }
            if self.cursor.current() == quote {
                let text = self.cursor.slice_from(start).to_string();
                self.cursor.advance(); // closing quote
                return Ok(Token::new(TokenKind::String, text, span));
            }
            self.cursor.advance();
        }
    }

    fn lex_identifier(&mut self, span: Span) -> Result<Token, LexError> {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start).to_string();
        Ok(Token::new(TokenKind::Identifier, text, span))
    }

    fn lex_symbol(&mut self, span: Span) -> Result<Token, LexError> {
        const TWO_CHAR: &[&str] = &["==", "!=", "<=", ">=", "&&", "||"];
        for op in TWO_CHAR {
            if self.cursor.starts_with(op) {
                self.cursor.advance_n(2);
                return Ok(Token::new(TokenKind::Symbol, *op, span));
            }
        }

        const ONE_CHAR: &str = "+-*/%<>=!()[],:|.";
        let c = self.cursor.current();
        if ONE_CHAR.contains(c) {
            self.cursor.advance();
            return Ok(Token::new(TokenKind::Symbol, c.to_string(), span));
        }

        Err(LexError::new(format!("unexpected character '{c}'"), span))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
