//! Pratt (binding-power) expression parsing.
//!
//! # Precedence (loosest to tightest binding)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|----------------|
//! | 1 | `or`, `\|\|` | Left |
//! | 2 | `and`, `&&` | Left |
//! | 3 | `not`, `!` (prefix) | Right |
//! | 4 | `in`, `not in` | Left |
//! | 5 | `==`, `!=`, `<`, `>`, `<=`, `>=` | Left |
//! | 6 | `+`, `-` (binary) | Left |
//! | 7 | `*`, `/`, `%` | Left |
//! | 8 | unary `-`, unary `+` | Right |
//! | 9 | `.`, `[...]`, `\| name` (postfix) | Left |

use glint_lex::{Token, TokenKind};
use glint_util::{Spanned, Symbol};

use crate::ast::{BinOp, Expr, Literal, UnaryOp};
use crate::error::ParseError;
use crate::Parser;

/// Binding power constants. Each binary level reserves two adjacent
/// numbers: `left` and `right = left + 1` for left-associativity (the
/// recursive call on the right stops before re-consuming an operator at
/// the same level, so the outer loop folds it left-associatively).
mod bp {
    pub const MIN: u8 = 0;
    pub const OR: u8 = 2;
    pub const AND: u8 = 4;
    /// Binding power used when parsing the operand of prefix `not`/`!`: it
    /// must bind tighter than `and` but looser than `in`.
    pub const NOT_OPERAND: u8 = 6;
    pub const IN: u8 = 6;
    pub const COMPARISON: u8 = 8;
    pub const ADDITIVE: u8 = 10;
    pub const MULTIPLICATIVE: u8 = 12;
    /// Binding power used when parsing the operand of unary `-`/`+`.
    pub const UNARY_OPERAND: u8 = 14;
}

impl Parser {
    /// Parses a full expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_bp(bp::MIN)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let Some((op, l_bp, r_bp)) = self.peek_binary_op() else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            let span = lhs.span();
            self.consume_binary_op(op);
            let rhs = self.parse_expr_bp(r_bp)?;
            lhs = Expr::BinaryOp {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
                span,
            };
        }

        Ok(lhs)
    }

    /// Looks at the current token(s) and decides whether they start a
    /// binary operator, without consuming anything. `not in` requires
    /// two-token lookahead.
    fn peek_binary_op(&self) -> Option<(BinOp, u8, u8)> {
        let tok = self.current();
        match &tok.kind {
            TokenKind::Identifier => match tok.text.as_str() {
                "or" => Some((BinOp::Or, bp::OR, bp::OR + 1)),
                "and" => Some((BinOp::And, bp::AND, bp::AND + 1)),
                "in" => Some((BinOp::In, bp::IN, bp::IN + 1)),
                "not" if self.peek_at(1).is_keyword("in") => {
                    Some((BinOp::NotIn, bp::IN, bp::IN + 1))
                }
                _ => None,
            },
            TokenKind::Symbol => match tok.text.as_str() {
                "||" => Some((BinOp::Or, bp::OR, bp::OR + 1)),
                "&&" => Some((BinOp::And, bp::AND, bp::AND + 1)),
                "==" => Some((BinOp::Eq, bp::COMPARISON, bp::COMPARISON + 1)),
                "!=" => Some((BinOp::Ne, bp::COMPARISON, bp::COMPARISON + 1)),
                "<" => Some((BinOp::Lt, bp::COMPARISON, bp::COMPARISON + 1)),
                ">" => Some((BinOp::Gt, bp::COMPARISON, bp::COMPARISON + 1)),
                "<=" => Some((BinOp::Le, bp::COMPARISON, bp::COMPARISON + 1)),
                ">=" => Some((BinOp::Ge, bp::COMPARISON, bp::COMPARISON + 1)),
                "+" => Some((BinOp::Add, bp::ADDITIVE, bp::ADDITIVE + 1)),
                "-" => Some((BinOp::Sub, bp::ADDITIVE, bp::ADDITIVE + 1)),
                "*" => Some((BinOp::Mul, bp::MULTIPLICATIVE, bp::MULTIPLICATIVE + 1)),
                "/" => Some((BinOp::Div, bp::MULTIPLICATIVE, bp::MULTIPLICATIVE + 1)),
                "%" => Some((BinOp::Mod, bp::MULTIPLICATIVE, bp::MULTIPLICATIVE + 1)),
                _ => None,
            },
            _ => None,
        }
    }

    fn consume_binary_op(&mut self, op: BinOp) {
        self.advance();
        if op == BinOp::NotIn {
            self.advance(); // the "in" half of "not in"
        }
    }

    /// Parses a prefix expression: a unary operator application, or a
    /// primary atom with its postfix chain applied.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let tok = self.current();
        if tok.is_symbol("-") {
            let span = tok.span;
            self.advance();
            let operand = self.parse_expr_bp(bp::UNARY_OPERAND)?;
            return Ok(Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
                span,
            });
        }
        if tok.is_symbol("+") {
            let span = tok.span;
            self.advance();
            let operand = self.parse_expr_bp(bp::UNARY_OPERAND)?;
            return Ok(Expr::UnaryOp {
                op: UnaryOp::Plus,
                operand: Box::new(operand),
                span,
            });
        }
        if tok.is_symbol("!") || tok.is_keyword("not") {
            let span = tok.span;
            self.advance();
            let operand = self.parse_expr_bp(bp::NOT_OPERAND)?;
            return Ok(Expr::UnaryOp {
                op: UnaryOp::Not,
                operand: Box::new(operand),
                span,
            });
        }

        let atom = self.parse_primary()?;
        self.parse_postfix_chain(atom)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.current().clone();
        match &tok.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Literal(Literal::Number(*n), tok.span))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::Literal(Literal::String(tok.text.clone()), tok.span))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(literal_or_variable(&tok))
            }
            TokenKind::Symbol if tok.text == "(" => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect_symbol(")")?;
                Ok(inner)
            }
            TokenKind::Eof => Err(self.error_here("unexpected end of input")),
            _ => Err(self.error_here(format!("unexpected token '{}'", tok.text))),
        }
    }

    /// Applies the postfix chain of property access, subscript, and filter
    /// applications to `atom`, left to right.
    fn parse_postfix_chain(&mut self, mut atom: Expr) -> Result<Expr, ParseError> {
        loop {
            if self.current().is_symbol(".") {
                self.advance();
                let (name, _name_span) = self.expect_identifier("property name")?;
                let span = atom.span();
                atom = Expr::PropertyAccess {
                    object: Box::new(atom),
                    property: name,
                    span,
                };
            } else if self.current().is_symbol("[") {
                self.advance();
                let index = self.parse_expression()?;
                self.expect_symbol("]")?;
                let span = atom.span();
                atom = Expr::Subscript {
                    object: Box::new(atom),
                    index: Box::new(index),
                    span,
                };
            } else if self.current().is_symbol("|") {
                self.advance();
                let (name, _name_span) = self.expect_identifier("filter name")?;
                let mut args = Vec::new();
                if self.current().is_symbol(":") {
                    self.advance();
                    loop {
                        let arg = self.parse_expression()?;
                        args.push(arg);
                        if self.current().is_symbol(",") {
                            self.advance();
                            continue;
                        }
                        break;
                    }
                }
                let span = atom.span();
                atom = Expr::Filter {
                    expr: Box::new(atom),
                    name,
                    args,
                    span,
                };
            } else {
                break;
            }
        }
        Ok(atom)
    }
}

fn literal_or_variable(tok: &Token) -> Expr {
    match tok.text.to_ascii_lowercase().as_str() {
        "true" => Expr::Literal(Literal::Bool(true), tok.span),
        "false" => Expr::Literal(Literal::Bool(false), tok.span),
        "null" | "none" => Expr::Literal(Literal::Null, tok.span),
        _ => Expr::Variable(Symbol::intern(&tok.text), tok.span),
    }
}
