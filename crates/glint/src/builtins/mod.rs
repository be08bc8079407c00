//! Default filter implementations.
//!
//! `spec.md` §4.7 treats filter bodies as out-of-core-scope — the engine
//! only commits to the registry *contract* (name, `(value, args) ->
//! (value, error)` shape). This module is the facade-level supplement:
//! small, dependency-light implementations of every name spec §6 lists,
//! registered into the default [`FilterRegistry`] so `Compile`/`Render`
//! work end-to-end on realistic templates instead of failing every
//! `UnknownFilter` lookup out of the box.

mod collections;
mod dates;
mod numbers;
mod strings;

use std::sync::OnceLock;

use glint_eval::{FilterRegistry, Value};

/// Returns this argument slot, or a `"missing argument"` error naming the
/// filter that needed it — every filter with required args funnels its
/// bounds-checking through here so the error message is consistent.
fn require_arg<'a>(args: &'a [Value], index: usize, filter: &str) -> Result<&'a Value, String> {
    args.get(index)
        .ok_or_else(|| format!("{filter}: expected at least {} argument(s)", index + 1))
}

/// Convenience over [`require_arg`] for filters that only ever want the
/// argument's rendered string form.
fn arg_str(args: &[Value], index: usize) -> Result<String, String> {
    require_arg(args, index, "filter").map(Value::render)
}

/// The process-wide registry pre-populated with every builtin filter,
/// lazily built on first use and shared by every [`Template`][crate::Template]
/// executed through this crate's `Compile`/`Render` entry points.
pub fn default_filters() -> &'static FilterRegistry {
    static REGISTRY: OnceLock<FilterRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let reg = FilterRegistry::new();
        register_all(&reg);
        reg
    })
}

macro_rules! register {
    ($reg:expr, $( $name:literal => $f:path ),+ $(,)?) => {
        $( $reg.register($name, std::sync::Arc::new($f)); )+
    };
}

fn register_all(reg: &FilterRegistry) {
    register! { reg,
        "default" => strings::default,
        "trim" => strings::trim,
        "split" => strings::split,
        "replace" => strings::replace,
        "remove" => strings::remove,
        "append" => strings::append,
        "prepend" => strings::prepend,
        "length" => strings::length,
        "upper" => strings::upper,
        "lower" => strings::lower,
        "titleize" => strings::titleize,
        "capitalize" => strings::capitalize,
        "camelize" => strings::camelize,
        "pascalize" => strings::pascalize,
        "dasherize" => strings::dasherize,
        "slugify" => strings::slugify,
        "pluralize" => strings::pluralize,
        "ordinalize" => strings::ordinalize,
        "truncate" => strings::truncate,
        "truncateWords" => strings::truncate_words,
        "join" => strings::join,
        "extract" => strings::extract,

        "unique" => collections::unique,
        "first" => collections::first,
        "last" => collections::last,
        "random" => collections::random,
        "reverse" => collections::reverse,
        "shuffle" => collections::shuffle,
        "size" => collections::size,
        "max" => collections::max,
        "min" => collections::min,
        "sum" => collections::sum,
        "average" => collections::average,
        "map" => collections::map,

        "number" => numbers::number,
        "bytes" => numbers::bytes,
        "abs" => numbers::abs,
        "atLeast" => numbers::at_least,
        "atMost" => numbers::at_most,
        "round" => numbers::round,
        "floor" => numbers::floor,
        "ceil" => numbers::ceil,
        "plus" => numbers::plus,
        "minus" => numbers::minus,
        "times" => numbers::times,
        "divide" => numbers::divide,
        "modulo" => numbers::modulo,

        "date" => dates::date,
        "day" => dates::day,
        "month" => dates::month,
        "monthFull" => dates::month_full,
        "year" => dates::year,
        "week" => dates::week,
        "weekday" => dates::weekday,
        "timeAgo" => dates::time_ago,
    }
}
