//! glint: a Liquid/Django-flavored text template engine.
//!
//! A source string goes through [`compile`] once into a [`Template`];
//! the template is then [`Template::execute`]d (or [`Template::render`]d)
//! any number of times against independent [`Context`]s, including
//! concurrently — nothing about execution mutates the compiled AST.
//!
//! ```
//! use glint::Context;
//!
//! let mut ctx = Context::new();
//! ctx.set("name", "Ada".into());
//! let out = glint::render("Hello, {{ name }}!", ctx).unwrap();
//! assert_eq!(out, "Hello, Ada!");
//! ```

mod builtins;
mod error;
mod template;

pub use error::Error;
pub use template::{compile, render, Template};

pub use glint_eval::{Context, ExecutionContext, FilterRegistry, TagRegistry, Value, ValueMap};

/// The registry every [`Template::execute`]/[`Template::render`] call looks
/// filters up in. Exposed so a host can add its own filters alongside the
/// builtins before rendering anything:
///
/// ```
/// use std::sync::Arc;
///
/// glint::default_filters().register("shout", Arc::new(|v: &glint::Value, _args: &[glint::Value]| {
///     Ok(glint::Value::Str(v.render().to_uppercase()))
/// }));
/// ```
pub use builtins::default_filters;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiling_twice_is_pure() {
        let a = compile("{{ 1 + 2 }}").unwrap();
        let b = compile("{{ 1 + 2 }}").unwrap();
        assert_eq!(format!("{:?}", a.ast()), format!("{:?}", b.ast()));
    }

    #[test]
    fn render_equals_compile_then_execute() {
        let mut ctx = Context::new();
        ctx.set("name", Value::Str("Ada".to_string()));

        let via_render = render("Hi {{ name }}", ctx.clone()).unwrap();

        let template = compile("Hi {{ name }}").unwrap();
        let via_execute = template.render(ctx).unwrap();

        assert_eq!(via_render, via_execute);
    }

    #[test]
    fn missing_variable_writes_placeholder_but_returns_a_non_nil_error() {
        let template = compile("X={{ missing }}Y").unwrap();
        let mut ctx = ExecutionContext::new(Context::new().into_map());
        let mut out = String::new();
        let err = template.execute(&mut ctx, &mut out).unwrap_err();

        assert_eq!(out, "X={{ missing }}Y");
        assert!(err.is_missing_variable());
    }

    #[test]
    fn comment_produces_no_output() {
        let out = render("before{# this explains nothing #}after", Context::new()).unwrap();
        assert_eq!(out, "beforeafter");
    }

    #[test]
    fn host_can_register_additional_filters() {
        use std::sync::Arc;
        default_filters().register(
            "shout",
            Arc::new(|v: &Value, _args: &[Value]| Ok(Value::Str(v.render().to_uppercase()))),
        );
        let out = render("{{ \"hi\" | shout }}", Context::new()).unwrap();
        assert_eq!(out, "HI");
    }

    #[test]
    fn conditional_with_else_branch() {
        let mut ctx = Context::new();
        ctx.set("flag", Value::Bool(false));
        let out = render("{% if flag %}yes{% else %}no{% endif %}", ctx).unwrap();
        assert_eq!(out, "no");
    }

    #[test]
    fn loop_exposes_index_and_revindex() {
        let mut ctx = Context::new();
        ctx.set(
            "items",
            Value::Seq(vec![Value::Int(10), Value::Int(20), Value::Int(30)]),
        );
        let out = render(
            "{% for x in items %}{{ loop.index }}:{{ loop.revindex }} {% endfor %}",
            ctx,
        )
        .unwrap();
        assert_eq!(out, "1:3 2:2 3:1 ");
    }

    #[test]
    fn nested_for_if_with_break() {
        let mut ctx = Context::new();
        ctx.set(
            "items",
            Value::Seq(vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]),
        );
        let out = render(
            "{% for x in items %}{% if x > 2 %}{% break %}{% endif %}{{ x }}{% endfor %}",
            ctx,
        )
        .unwrap();
        assert_eq!(out, "12");
    }
}
