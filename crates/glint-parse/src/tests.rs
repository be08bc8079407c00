//! Precedence, postfix-chain, and tag-nesting tests against the public
//! [`parse`] entry point.

use crate::{parse, BinOp, Expr, Literal, Statement, UnaryOp};

fn output_expr(inner: &str) -> Expr {
    let ast = parse(&format!("{{{{ {inner} }}}}")).unwrap();
    assert_eq!(ast.len(), 1);
    match ast.into_iter().next().unwrap() {
        Statement::Output { expr, .. } => expr,
        other => panic!("expected a single Output statement, got {other:?}"),
    }
}

fn assert_binop(expr: &Expr, want: BinOp) -> (&Expr, &Expr) {
    match expr {
        Expr::BinaryOp { op, left, right, .. } if *op == want => (left, right),
        other => panic!("expected {want:?}, got {other:?}"),
    }
}

fn assert_variable(expr: &Expr, name: &str) {
    match expr {
        Expr::Variable(sym, _) => assert_eq!(sym.as_str(), name),
        other => panic!("expected variable '{name}', got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    // a + b * c  =>  Add(a, Mul(b, c))
    let expr = output_expr("a + b * c");
    let (lhs, rhs) = assert_binop(&expr, BinOp::Add);
    assert_variable(lhs, "a");
    let (mb, mc) = assert_binop(rhs, BinOp::Mul);
    assert_variable(mb, "b");
    assert_variable(mc, "c");
}

#[test]
fn addition_binds_tighter_than_comparison() {
    // a + b > c  =>  Gt(Add(a, b), c)
    let expr = output_expr("a + b > c");
    let (lhs, rhs) = assert_binop(&expr, BinOp::Gt);
    assert_binop(lhs, BinOp::Add);
    assert_variable(rhs, "c");
}

#[test]
fn comparison_binds_tighter_than_and() {
    // a > b and c < d  =>  And(Gt(a, b), Lt(c, d))
    let expr = output_expr("a > b and c < d");
    let (lhs, rhs) = assert_binop(&expr, BinOp::And);
    assert_binop(lhs, BinOp::Gt);
    assert_binop(rhs, BinOp::Lt);
}

#[test]
fn and_binds_tighter_than_or() {
    // a or b and c  =>  Or(a, And(b, c))
    let expr = output_expr("a or b and c");
    let (lhs, rhs) = assert_binop(&expr, BinOp::Or);
    assert_variable(lhs, "a");
    assert_binop(rhs, BinOp::And);
}

#[test]
fn symbolic_and_or_operators_parse_the_same_as_keywords() {
    let keyword = output_expr("a and b or c");
    let symbolic = output_expr("a && b || c");
    assert_eq!(format!("{keyword:?}"), format!("{symbolic:?}"));
}

#[test]
fn not_unary_binds_looser_than_in_but_parens_override() {
    let expr = output_expr("not (true and false)");
    match &expr {
        Expr::UnaryOp { op: UnaryOp::Not, operand, .. } => {
            assert_binop(operand, BinOp::And);
        }
        other => panic!("expected a Not unary op, got {other:?}"),
    }
}

#[test]
fn not_in_parses_as_a_single_operator() {
    let expr = output_expr("x not in items");
    let (lhs, rhs) = assert_binop(&expr, BinOp::NotIn);
    assert_variable(lhs, "x");
    assert_variable(rhs, "items");
}

#[test]
fn postfix_chain_applies_left_to_right() {
    // a.b[0] | f: x  =>  Filter(Subscript(PropertyAccess(a, b), 0), f, [x])
    let expr = output_expr("a.b[0] | f: x");
    match &expr {
        Expr::Filter { expr, name, args, .. } => {
            assert_eq!(name.as_str(), "f");
            assert_eq!(args.len(), 1);
            assert_variable(&args[0], "x");
            match expr.as_ref() {
                Expr::Subscript { object, index, .. } => {
                    assert!(matches!(index.as_ref(), Expr::Literal(Literal::Number(n), _) if *n == 0.0));
                    match object.as_ref() {
                        Expr::PropertyAccess { object, property, .. } => {
                            assert_variable(object, "a");
                            assert_eq!(property.as_str(), "b");
                        }
                        other => panic!("expected property access, got {other:?}"),
                    }
                }
                other => panic!("expected subscript, got {other:?}"),
            }
        }
        other => panic!("expected a filter application, got {other:?}"),
    }
}

#[test]
fn if_elif_else_endif_round_trips() {
    let ast = parse("{% if a %}A{% elif b %}B{% else %}C{% endif %}").unwrap();
    match &ast[0] {
        Statement::If { branches, else_body, .. } => {
            assert_eq!(branches.len(), 2);
            assert!(else_body.is_some());
        }
        other => panic!("expected an If statement, got {other:?}"),
    }
}

#[test]
fn for_endfor_round_trips_with_loop_body() {
    let ast = parse("{% for x in items %}{{ x }}{% endfor %}").unwrap();
    match &ast[0] {
        Statement::For { body, .. } => assert_eq!(body.len(), 1),
        other => panic!("expected a For statement, got {other:?}"),
    }
}

#[test]
fn comment_parses_as_its_own_noop_statement() {
    let ast = parse("a{# drop me #}b").unwrap();
    assert_eq!(ast.len(), 3);
    assert!(matches!(ast[0], Statement::Text(..)));
    assert!(matches!(ast[1], Statement::Comment(_)));
    assert!(matches!(ast[2], Statement::Text(..)));
}

#[test]
fn dangling_elif_is_a_parse_error_naming_if() {
    let err = parse("{% elif x %}{% endif %}").unwrap_err();
    assert!(err.reason.contains("'elif'"), "unexpected message: {}", err.reason);
    assert!(err.reason.contains("'if'"), "unexpected message: {}", err.reason);
}

#[test]
fn dangling_endif_is_a_parse_error() {
    let err = parse("{% endif %}").unwrap_err();
    assert!(err.reason.contains("'endif'"), "unexpected message: {}", err.reason);
}

#[test]
fn dangling_endfor_is_a_parse_error() {
    let err = parse("{% endfor %}").unwrap_err();
    assert!(err.reason.contains("'endfor'"), "unexpected message: {}", err.reason);
}

#[test]
fn unclosed_if_is_a_parse_error() {
    let err = parse("{% if a %}body").unwrap_err();
    assert!(err.reason.contains("a tag"), "unexpected message: {}", err.reason);
}

#[test]
fn endif_inside_a_for_body_does_not_close_it() {
    // `endif` isn't a stop word for `for`, so it's parsed as a statement of
    // its own and rejected as an unmatched `endif`, not silently accepted
    // as closing the `for`.
    let err = parse("{% for x in items %}{% endif %}").unwrap_err();
    assert!(err.reason.contains("'endif'"), "unexpected message: {}", err.reason);
}

#[test]
fn unknown_tag_name_is_a_parse_error() {
    let err = parse("{% frobnicate %}").unwrap_err();
    assert!(err.reason.contains("unknown tag"), "unexpected message: {}", err.reason);
}
