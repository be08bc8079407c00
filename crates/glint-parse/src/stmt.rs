//! Block-tag statement parsing: `if`/`elif`/`else`/`endif`,
//! `for`/`endfor`, `break`, `continue`, and plain text/output nodes.

use glint_lex::TokenKind;

use crate::ast::{Branch, ForVars, Statement};
use crate::error::ParseError;
use crate::Parser;

/// Tags that close or continue an enclosing block; `parse_statements_until`
/// stops when it sees one of these as the next tag keyword.
const STOP_IF: &[&str] = &["elif", "else", "endif"];
const STOP_FOR: &[&str] = &["endfor"];

impl Parser {
    /// Rebuilds the `{{ ... }}` source text for a missing-variable fallback,
    /// by joining the raw token text of every token consumed while parsing
    /// the expression with single spaces. `Span` only tracks line/column,
    /// not byte offsets, so this approximates the original spacing rather
    /// than reproducing it byte-for-byte.
    fn reconstruct_output_tag(&self, expr_start: usize, expr_end: usize) -> String {
        let inner: Vec<&str> = self.tokens[expr_start..expr_end]
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        format!("{{{{ {} }}}}", inner.join(" "))
    }

    /// Parses statements until EOF or until the next `{% ... %}` tag's
    /// keyword is one of `stop_words`. The stopping tag itself is left
    /// unconsumed so the caller can inspect and act on it.
    pub(crate) fn parse_statements_until(
        &mut self,
        stop_words: &[&str],
    ) -> Result<Vec<Statement>, ParseError> {
        let mut stmts = Vec::new();
        loop {
            if self.current().is_eof() {
                return Ok(stmts);
            }
            if self.current().kind == TokenKind::TagBegin && self.next_tag_is_one_of(stop_words) {
                return Ok(stmts);
            }
            stmts.push(self.parse_statement()?);
        }
    }

    /// True if the tag keyword immediately after the upcoming `TagBegin`
    /// matches one of `words`. Does not consume anything.
    fn next_tag_is_one_of(&self, words: &[&str]) -> bool {
        if words.is_empty() {
            return false;
        }
        let keyword = self.peek_at(1);
        matches!(keyword.kind, TokenKind::Identifier) && words.contains(&keyword.text.as_str())
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Text => {
                self.advance();
                Ok(Statement::Text(tok.text, tok.span))
            }
            TokenKind::Comment => {
                self.advance();
                Ok(Statement::Comment(tok.span))
            }
            TokenKind::VarBegin => {
                self.advance();
                let expr_start = self.pos;
                let expr = self.parse_expression()?;
                let expr_end = self.pos;
                self.expect_kind(TokenKind::VarEnd, "'}}'")?;
                let placeholder = self.reconstruct_output_tag(expr_start, expr_end);
                Ok(Statement::Output {
                    expr,
                    placeholder,
                    span: tok.span,
                })
            }
            TokenKind::TagBegin => self.parse_tag(),
            _ => Err(self.error_here(format!("unexpected token '{}'", tok.text))),
        }
    }

    fn parse_tag(&mut self) -> Result<Statement, ParseError> {
        let open_span = self.current().span;
        self.advance(); // TagBegin
        let (keyword, _) = self.expect_identifier("a tag name")?;

        match keyword.as_str() {
            "if" => self.parse_if(open_span),
            "for" => self.parse_for(open_span),
            "break" => {
                self.expect_kind(TokenKind::TagEnd, "'%}'")?;
                Ok(Statement::Break(open_span))
            }
            "continue" => {
                self.expect_kind(TokenKind::TagEnd, "'%}'")?;
                Ok(Statement::Continue(open_span))
            }
            "elif" | "else" => Err(ParseError::new(
                format!("'{}' must match a corresponding 'if' tag", keyword.as_str()),
                open_span,
            )),
            "endif" => Err(ParseError::new(
                "'endif' must match a corresponding 'if' tag",
                open_span,
            )),
            "endfor" => Err(ParseError::new(
                "'endfor' must match a corresponding 'for' tag",
                open_span,
            )),
            other => Err(ParseError::new(format!("unknown tag '{other}'"), open_span)),
        }
    }

    fn parse_if(&mut self, span: glint_util::Span) -> Result<Statement, ParseError> {
        let mut branches = Vec::new();
        let mut else_body = None;

        let condition = self.parse_expression()?;
        self.expect_kind(TokenKind::TagEnd, "'%}'")?;
        let body = self.parse_statements_until(STOP_IF)?;
        branches.push(Branch { condition, body });

        loop {
            self.expect_kind(TokenKind::TagBegin, "a tag")?;
            let (keyword, kw_span) = self.expect_identifier("'elif', 'else', or 'endif'")?;
            match keyword.as_str() {
                "elif" => {
                    let condition = self.parse_expression()?;
                    self.expect_kind(TokenKind::TagEnd, "'%}'")?;
                    let body = self.parse_statements_until(STOP_IF)?;
                    branches.push(Branch { condition, body });
                }
                "else" => {
                    self.expect_kind(TokenKind::TagEnd, "'%}'")?;
                    let body = self.parse_statements_until(&["endif"])?;
                    else_body = Some(body);
                    self.expect_kind(TokenKind::TagBegin, "'endif'")?;
                    let (end_kw, end_span) = self.expect_identifier("'endif'")?;
                    if end_kw.as_str() != "endif" {
                        return Err(ParseError::new(
                            "'endif' must match a corresponding 'if' tag",
                            end_span,
                        ));
                    }
                    self.expect_kind(TokenKind::TagEnd, "'%}'")?;
                    break;
                }
                "endif" => {
                    self.expect_kind(TokenKind::TagEnd, "'%}'")?;
                    break;
                }
                _ => {
                    return Err(ParseError::new(
                        "expected 'elif', 'else', or 'endif'",
                        kw_span,
                    ))
                }
            }
        }

        Ok(Statement::If {
            branches,
            else_body,
            span,
        })
    }

    fn parse_for(&mut self, span: glint_util::Span) -> Result<Statement, ParseError> {
        let (first, first_span) = self.expect_identifier("a loop variable")?;
        let vars = if self.current().is_symbol(",") {
            self.advance();
            let (second, _) = self.expect_identifier("a second loop variable")?;
            ForVars::Pair(first, second)
        } else {
            ForVars::Single(first)
        };

        if !self.current().is_keyword("in") {
            return Err(ParseError::new("expected 'in'", first_span));
        }
        self.advance();

        let collection = self.parse_expression()?;
        self.expect_kind(TokenKind::TagEnd, "'%}'")?;
        let body = self.parse_statements_until(STOP_FOR)?;

        self.expect_kind(TokenKind::TagBegin, "'endfor'")?;
        let (end_kw, end_span) = self.expect_identifier("'endfor'")?;
        if end_kw.as_str() != "endfor" {
            return Err(ParseError::new(
                "'endfor' must match a corresponding 'for' tag",
                end_span,
            ));
        }
        self.expect_kind(TokenKind::TagEnd, "'%}'")?;

        Ok(Statement::For {
            vars,
            collection,
            body,
            span,
        })
    }
}
