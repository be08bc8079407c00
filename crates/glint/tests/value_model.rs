//! Value-model properties exercised end to end through the public API
//! rather than by poking the evaluator directly.

use std::sync::Arc;

use glint::{render, Context, Value};
use glint_eval::FieldAccess;

#[test]
fn int_and_float_compare_equal_when_numerically_equal() {
    assert_eq!(Value::Int(42), Value::Float(42.0));
    assert_eq!(Value::Int(0), Value::Float(-0.0));
}

#[test]
fn nil_is_less_than_everything_non_nil() {
    assert_eq!(Value::Null.compare(&Value::Int(-1)), std::cmp::Ordering::Less);
    assert_eq!(Value::Int(-1).compare(&Value::Null), std::cmp::Ordering::Greater);
    assert_eq!(Value::Null.compare(&Value::Null), std::cmp::Ordering::Equal);
}

#[test]
fn sequence_renders_as_bracketed_comma_joined_list() {
    let v = Value::Seq(vec![Value::Int(1), Value::Str("b".to_string()), Value::Bool(true)]);
    assert_eq!(v.render(), "[1,b,true]");
}

#[test]
fn empty_sequence_renders_as_empty_brackets() {
    assert_eq!(Value::Seq(Vec::new()).render(), "[]");
}

#[test]
fn mapping_iterates_in_deterministic_numeric_order_when_all_keys_are_numeric() {
    let mut ctx = Context::new();
    ctx.set("scores.10", Value::Str("ten".to_string()));
    ctx.set("scores.2", Value::Str("two".to_string()));
    ctx.set("scores.1", Value::Str("one".to_string()));

    let out = render(
        "{% for k, v in scores %}{{ k }}:{{ v }} {% endfor %}",
        ctx,
    )
    .unwrap();
    assert_eq!(out, "1:one 2:two 10:ten ");
}

#[test]
fn mapping_iterates_lexicographically_when_keys_are_not_all_numeric() {
    let mut ctx = Context::new();
    ctx.set("fields.zeta", Value::Int(1));
    ctx.set("fields.alpha", Value::Int(2));

    let out = render("{% for k, v in fields %}{{ k }} {% endfor %}", ctx).unwrap();
    assert_eq!(out, "alpha zeta ");
}

#[derive(Debug)]
struct Person {
    name: String,
    age: i64,
}

impl FieldAccess for Person {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::Str(self.name.clone())),
            "age" => Some(Value::Int(self.age)),
            _ => None,
        }
    }

    fn field_names(&self) -> Vec<&'static str> {
        vec!["name", "age"]
    }
}

#[test]
fn record_fields_resolve_through_dotted_access() {
    let mut ctx = Context::new();
    ctx.set(
        "person",
        Value::Record(Arc::new(Person {
            name: "Grace".to_string(),
            age: 85,
        })),
    );

    let out = render("{{ person.name }} is {{ person.age }}", ctx).unwrap();
    assert_eq!(out, "Grace is 85");
}

#[test]
fn record_field_lookup_miss_is_a_distinct_fatal_error_from_missing_variable() {
    let mut ctx = Context::new();
    ctx.set(
        "person",
        Value::Record(Arc::new(Person {
            name: "Grace".to_string(),
            age: 85,
        })),
    );

    // `person` itself resolves fine; `email` isn't one of its fields. That's
    // a key-not-found error on an existing object, not a missing variable,
    // so it aborts execution rather than falling back to a placeholder.
    let err = render("{{ person.email }}", ctx).unwrap_err();
    assert!(!err.is_missing_variable());
}
