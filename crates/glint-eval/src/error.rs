//! Evaluation error type.

use glint_util::{Span, Spanned};
use thiserror::Error;

use crate::value::ValueError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("undefined variable '{name}' (line {}, column {})", span.line, span.column)]
    MissingVariable { name: String, span: Span },

    #[error("{source} (line {}, column {})", span.line, span.column)]
    Value { source: ValueError, span: Span },

    #[error("break/continue outside loop (line {}, column {})", span.line, span.column)]
    ControlFlowOutsideLoop { span: Span },

    #[error("division by zero (line {}, column {})", span.line, span.column)]
    DivisionByZero { span: Span },

    #[error("unknown filter '{name}' (line {}, column {})", span.line, span.column)]
    UnknownFilter { name: String, span: Span },

    #[error("filter '{name}' failed: {reason} (line {}, column {})", span.line, span.column)]
    FilterFailed {
        name: String,
        reason: String,
        span: Span,
    },

    #[error("numeric conversion failed for '{text}' (line {}, column {})", span.line, span.column)]
    NumericConversion { text: String, span: Span },

    #[error("output sink failed (line {}, column {})", span.line, span.column)]
    WriteFailed { span: Span },
}

impl EvalError {
    /// True for the one error kind that is recoverable: an `OutputNode`
    /// whose variable lookup failed. The evaluator emits the original
    /// placeholder text and keeps going instead of aborting.
    pub fn is_missing_variable(&self) -> bool {
        matches!(self, EvalError::MissingVariable { .. })
    }
}

impl Spanned for EvalError {
    fn span(&self) -> Span {
        match self {
            EvalError::MissingVariable { span, .. }
            | EvalError::Value { span, .. }
            | EvalError::ControlFlowOutsideLoop { span }
            | EvalError::DivisionByZero { span }
            | EvalError::UnknownFilter { span, .. }
            | EvalError::FilterFailed { span, .. }
            | EvalError::NumericConversion { span, .. }
            | EvalError::WriteFailed { span } => *span,
        }
    }
}
