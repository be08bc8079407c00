//! Tree-walking evaluator.
//!
//! `execute` drives a compiled statement list against an
//! [`ExecutionContext`], writing rendered output incrementally to the
//! caller-supplied sink. It never buffers the whole result.

use std::fmt::Write;

use glint_parse::{Ast, BinOp, Expr, ForVars, Literal, Statement, UnaryOp};
use glint_util::Span;

use crate::context::{ExecutionContext, LoopContext};
use crate::error::EvalError;
use crate::registry::FilterRegistry;
use crate::value::{IterEntry, Value};

/// Signals how a statement body finished, so a `for` loop (or the
/// top-level driver) can react to `break`/`continue` without the
/// evaluator needing exception-like unwinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Normal,
    Break,
    Continue,
}

/// Executes a compiled template against `ctx`, writing output to `out`.
///
/// Returns `Err` if anything went wrong, fatal or not: a missing-variable
/// output falls back to its placeholder text and keeps executing, but is
/// still reported as the function's error once execution finishes (the
/// first one encountered, if there were several). Whatever was already
/// written to `out` by the time an `Err` is returned — fatal or
/// recoverable — stays written; callers must not assume atomicity of
/// output on error.
pub fn execute<W: Write>(
    ast: &Ast,
    ctx: &mut ExecutionContext,
    filters: &FilterRegistry,
    out: &mut W,
) -> Result<(), EvalError> {
    let mut recovered = Vec::new();
    match exec_statements(ast, ctx, filters, out, &mut recovered)? {
        Flow::Normal => match recovered.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        },
        Flow::Break | Flow::Continue => {
            Err(EvalError::ControlFlowOutsideLoop { span: Span::START })
        }
    }
}

fn exec_statements<W: Write>(
    stmts: &[Statement],
    ctx: &mut ExecutionContext,
    filters: &FilterRegistry,
    out: &mut W,
    recovered: &mut Vec<EvalError>,
) -> Result<Flow, EvalError> {
    for stmt in stmts {
        let flow = exec_statement(stmt, ctx, filters, out, recovered)?;
        if flow != Flow::Normal {
            return Ok(flow);
        }
    }
    Ok(Flow::Normal)
}

fn write_out<W: Write>(out: &mut W, text: &str, span: Span) -> Result<(), EvalError> {
    out.write_str(text).map_err(|_| EvalError::WriteFailed { span })
}

fn exec_statement<W: Write>(
    stmt: &Statement,
    ctx: &mut ExecutionContext,
    filters: &FilterRegistry,
    out: &mut W,
    recovered: &mut Vec<EvalError>,
) -> Result<Flow, EvalError> {
    match stmt {
        Statement::Text(text, span) => {
            write_out(out, text, *span)?;
            Ok(Flow::Normal)
        }
        Statement::Output {
            expr,
            placeholder,
            span,
        } => {
            match eval_expr(expr, ctx, filters) {
                Ok(value) => write_out(out, &value.render(), *span)?,
                Err(err) if err.is_missing_variable() => {
                    tracing::warn!(error = %err, "variable lookup fell back to placeholder text");
                    write_out(out, placeholder, *span)?;
                    recovered.push(err);
                }
                Err(err) => return Err(err),
            }
            Ok(Flow::Normal)
        }
        Statement::If {
            branches,
            else_body,
            ..
        } => {
            for branch in branches {
                if eval_expr(&branch.condition, ctx, filters)?.is_truthy() {
                    return exec_statements(&branch.body, ctx, filters, out, recovered);
                }
            }
            match else_body {
                Some(body) => exec_statements(body, ctx, filters, out, recovered),
                None => Ok(Flow::Normal),
            }
        }
        Statement::For {
            vars,
            collection,
            body,
            span,
        } => exec_for(vars, collection, body, *span, ctx, filters, out, recovered),
        Statement::Break(_) => Ok(Flow::Break),
        Statement::Continue(_) => Ok(Flow::Continue),
        Statement::Comment(_) => Ok(Flow::Normal),
    }
}

#[allow(clippy::too_many_arguments)]
fn exec_for<W: Write>(
    vars: &ForVars,
    collection: &Expr,
    body: &[Statement],
    span: Span,
    ctx: &mut ExecutionContext,
    filters: &FilterRegistry,
    out: &mut W,
    recovered: &mut Vec<EvalError>,
) -> Result<Flow, EvalError> {
    let collection_value = eval_expr(collection, ctx, filters)?;
    let entries = collection_value
        .iter_entries()
        .map_err(|source| EvalError::Value { source, span })?;
    let length = entries.len();

    for (i, entry) in entries.into_iter().enumerate() {
        ctx.push_scope();
        bind_loop_vars(ctx, vars, entry);
        ctx.bind("loop", LoopContext::new(i, length).to_value());

        let flow = exec_statements(body, ctx, filters, out, recovered);
        ctx.pop_scope();

        match flow? {
            Flow::Normal | Flow::Continue => continue,
            Flow::Break => break,
        }
    }

    Ok(Flow::Normal)
}

fn bind_loop_vars(ctx: &mut ExecutionContext, vars: &ForVars, entry: IterEntry) {
    match (vars, entry) {
        (ForVars::Single(name), IterEntry::Indexed(_, value)) => {
            ctx.bind(name.as_str(), value);
        }
        (ForVars::Single(name), IterEntry::Keyed(key, value)) => {
            let mut record = crate::value::ValueMap::default();
            record.insert("key".to_string(), Value::Str(key));
            record.insert("value".to_string(), value);
            ctx.bind(name.as_str(), Value::Map(record));
        }
        (ForVars::Pair(first, second), IterEntry::Indexed(index, value)) => {
            ctx.bind(first.as_str(), Value::Int(index as i64));
            ctx.bind(second.as_str(), value);
        }
        (ForVars::Pair(first, second), IterEntry::Keyed(key, value)) => {
            ctx.bind(first.as_str(), Value::Str(key));
            ctx.bind(second.as_str(), value);
        }
    }
}

pub fn eval_expr(
    expr: &Expr,
    ctx: &ExecutionContext,
    filters: &FilterRegistry,
) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(lit, _span) => Ok(eval_literal(lit)),
        Expr::Variable(name, span) => ctx
            .lookup(name.as_str())
            .ok_or_else(|| EvalError::MissingVariable {
                name: name.as_str().to_string(),
                span: *span,
            }),
        Expr::PropertyAccess {
            object,
            property,
            span,
        } => {
            let obj = eval_expr(object, ctx, filters)?;
            obj.member(&Value::Str(property.as_str().to_string()))
                .map_err(|source| EvalError::Value { source, span: *span })
        }
        Expr::Subscript { object, index, span } => {
            let obj = eval_expr(object, ctx, filters)?;
            let idx = eval_expr(index, ctx, filters)?;
            obj.member(&idx)
                .map_err(|source| EvalError::Value { source, span: *span })
        }
        Expr::UnaryOp { op, operand, span } => {
            let value = eval_expr(operand, ctx, filters)?;
            eval_unary(*op, value, *span)
        }
        Expr::BinaryOp { op, left, right, span } => eval_binary(*op, left, right, ctx, filters, *span),
        Expr::Filter {
            expr,
            name,
            args,
            span,
        } => {
            let base = eval_expr(expr, ctx, filters)?;
            let mut arg_values = Vec::with_capacity(args.len());
            for arg in args {
                arg_values.push(eval_expr(arg, ctx, filters)?);
            }
            let f = filters
                .get(name.as_str())
                .ok_or_else(|| EvalError::UnknownFilter {
                    name: name.as_str().to_string(),
                    span: *span,
                })?;
            f(&base, &arg_values).map_err(|reason| EvalError::FilterFailed {
                name: name.as_str().to_string(),
                reason,
                span: *span,
            })
        }
    }
}

fn eval_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Number(n) => Value::Float(*n),
        Literal::String(s) => Value::Str(s.clone()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
    }
}

fn eval_unary(op: UnaryOp, value: Value, span: Span) -> Result<Value, EvalError> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        UnaryOp::Plus => match value {
            Value::Int(i) => Ok(Value::Int(i)),
            Value::Float(f) => Ok(Value::Float(f)),
            _ => numeric_conversion_error(&value, span),
        },
        UnaryOp::Neg => match value {
            Value::Int(i) => Ok(Value::Int(-i)),
            Value::Float(f) => Ok(Value::Float(-f)),
            _ => numeric_conversion_error(&value, span),
        },
    }
}

fn numeric_conversion_error(value: &Value, span: Span) -> Result<Value, EvalError> {
    Err(EvalError::NumericConversion {
        text: value.render(),
        span,
    })
}

fn eval_binary(
    op: BinOp,
    left: &Expr,
    right: &Expr,
    ctx: &ExecutionContext,
    filters: &FilterRegistry,
    span: Span,
) -> Result<Value, EvalError> {
    match op {
        BinOp::And => {
            let l = eval_expr(left, ctx, filters)?;
            if !l.is_truthy() {
                return Ok(Value::Bool(false));
            }
            let r = eval_expr(right, ctx, filters)?;
            Ok(Value::Bool(r.is_truthy()))
        }
        BinOp::Or => {
            let l = eval_expr(left, ctx, filters)?;
            if l.is_truthy() {
                return Ok(Value::Bool(true));
            }
            let r = eval_expr(right, ctx, filters)?;
            Ok(Value::Bool(r.is_truthy()))
        }
        _ => {
            let l = eval_expr(left, ctx, filters)?;
            let r = eval_expr(right, ctx, filters)?;
            eval_binary_values(op, l, r, span)
        }
    }
}

fn eval_binary_values(op: BinOp, left: Value, right: Value, span: Span) -> Result<Value, EvalError> {
    use BinOp::*;
    match op {
        Eq => Ok(Value::Bool(left == right)),
        Ne => Ok(Value::Bool(left != right)),
        Lt => Ok(Value::Bool(left.compare(&right).is_lt())),
        Gt => Ok(Value::Bool(left.compare(&right).is_gt())),
        Le => Ok(Value::Bool(left.compare(&right).is_le())),
        Ge => Ok(Value::Bool(left.compare(&right).is_ge())),
        Add | Sub | Mul | Div | Mod => eval_arith(op, left, right, span),
        In => eval_containment(&left, &right, span).map(Value::Bool),
        NotIn => eval_containment(&left, &right, span).map(|found| Value::Bool(!found)),
        And | Or => unreachable!("short-circuit ops handled in eval_binary"),
    }
}

fn eval_arith(op: BinOp, left: Value, right: Value, span: Span) -> Result<Value, EvalError> {
    use BinOp::*;
    if let (Value::Int(a), Value::Int(b)) = (&left, &right) {
        return match op {
            Add => Ok(Value::Int(a + b)),
            Sub => Ok(Value::Int(a - b)),
            Mul => Ok(Value::Int(a * b)),
            Mod => {
                if *b == 0 {
                    Err(EvalError::DivisionByZero { span })
                } else {
                    Ok(Value::Int(a % b))
                }
            }
            Div => {
                if *b == 0 {
                    Err(EvalError::DivisionByZero { span })
                } else {
                    Ok(Value::Float(*a as f64 / *b as f64))
                }
            }
            _ => unreachable!("eval_arith called with non-arithmetic op"),
        };
    }

    let a = left
        .to_float()
        .ok_or_else(|| EvalError::NumericConversion {
            text: left.render(),
            span,
        })?;
    let b = right
        .to_float()
        .ok_or_else(|| EvalError::NumericConversion {
            text: right.render(),
            span,
        })?;
    match op {
        Add => Ok(Value::Float(a + b)),
        Sub => Ok(Value::Float(a - b)),
        Mul => Ok(Value::Float(a * b)),
        Div | Mod if b == 0.0 => Err(EvalError::DivisionByZero { span }),
        Div => Ok(Value::Float(a / b)),
        Mod => Ok(Value::Float(a % b)),
        _ => unreachable!("eval_arith called with non-arithmetic op"),
    }
}

fn eval_containment(left: &Value, right: &Value, span: Span) -> Result<bool, EvalError> {
    match right {
        Value::Seq(items) => Ok(items.iter().any(|item| item == left)),
        Value::Str(s) => Ok(s.contains(&left.render())),
        Value::Map(map) => Ok(map.contains_key(&left.render())),
        _ => Err(EvalError::Value {
            source: crate::value::ValueError::UnsupportedCollection,
            span,
        }),
    }
}
