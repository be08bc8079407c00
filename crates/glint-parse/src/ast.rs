//! AST node definitions for compiled templates.
//!
//! Nodes are data-only: no behaviour beyond carrying their source
//! position. The evaluator crate walks these trees; nothing here knows how
//! to execute itself.

use glint_util::{Span, Spanned, Symbol};

/// A compiled template: an ordered list of top-level statements.
pub type Ast = Vec<Statement>;

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    In,
    NotIn,
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

/// A literal value as written in source, before evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
}

/// An expression node: pure, produces a value when evaluated.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal, Span),
    Variable(Symbol, Span),
    PropertyAccess {
        object: Box<Expr>,
        property: Symbol,
        span: Span,
    },
    Subscript {
        object: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Filter {
        expr: Box<Expr>,
        name: Symbol,
        args: Vec<Expr>,
        span: Span,
    },
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Literal(_, span)
            | Expr::Variable(_, span)
            | Expr::PropertyAccess { span, .. }
            | Expr::Subscript { span, .. }
            | Expr::UnaryOp { span, .. }
            | Expr::BinaryOp { span, .. }
            | Expr::Filter { span, .. } => *span,
        }
    }
}

/// One `if`/`elif` branch: a condition and the body to run if it's truthy.
#[derive(Debug, Clone)]
pub struct Branch {
    pub condition: Expr,
    pub body: Vec<Statement>,
}

/// The binding form of a `for` tag's loop variables.
#[derive(Debug, Clone)]
pub enum ForVars {
    /// `for x in collection`
    Single(Symbol),
    /// `for k, v in collection`
    Pair(Symbol, Symbol),
}

/// A statement node: emits output or drives control flow.
#[derive(Debug, Clone)]
pub enum Statement {
    Text(String, Span),
    /// `placeholder` is the reconstructed `{{ ... }}` source text, emitted
    /// verbatim in place of the value when evaluation fails because the
    /// expression's root variable is missing.
    Output {
        expr: Expr,
        placeholder: String,
        span: Span,
    },
    If {
        branches: Vec<Branch>,
        else_body: Option<Vec<Statement>>,
        span: Span,
    },
    For {
        vars: ForVars,
        collection: Expr,
        body: Vec<Statement>,
        span: Span,
    },
    Break(Span),
    Continue(Span),
    Comment(Span),
}

impl Spanned for Statement {
    fn span(&self) -> Span {
        match self {
            Statement::Text(_, span)
            | Statement::Output { span, .. }
            | Statement::If { span, .. }
            | Statement::For { span, .. }
            | Statement::Break(span)
            | Statement::Continue(span)
            | Statement::Comment(span) => *span,
        }
    }
}
