//! The dynamically typed value model.
//!
//! Every expression evaluates to a [`Value`]. The variants form a tagged
//! sum over the handful of shapes templates actually need to walk: scalars,
//! sequences, string-keyed maps, and opaque host records reached through
//! [`FieldAccess`].

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;

/// A string-keyed map of values. Iteration order is never derived from
/// insertion order (see [`Value::iter_entries`]); a hash map is sufficient.
pub type ValueMap = FxHashMap<String, Value>;

/// A host type reachable from a template through dotted-path field access.
///
/// Implementations decide their own renamed/hidden fields; `Value` never
/// second-guesses what `field` returns, so a JSON-style `rename`/`skip`
/// convention (if any) is the implementor's responsibility.
pub trait FieldAccess: fmt::Debug + Send + Sync {
    fn field(&self, name: &str) -> Option<Value>;
    fn field_names(&self) -> Vec<&'static str>;
}

/// One element produced while iterating a [`Value`] in a `for` body.
#[derive(Debug, Clone)]
pub enum IterEntry {
    Indexed(usize, Value),
    Keyed(String, Value),
}

/// An error raised by a value-level operation (indexing, field lookup,
/// iteration). The evaluator attaches source position before surfacing
/// these to a caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("key not found: '{0}'")]
    KeyNotFound(String),
    #[error("index out of range: {0}")]
    IndexOutOfRange(i64),
    #[error("invalid index: '{0}'")]
    InvalidIndex(String),
    #[error("value does not support indexing")]
    NotIndexable,
    #[error("unsupported collection type")]
    UnsupportedCollection,
}

/// A dynamically typed template value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A point in time, bound by host data (e.g. a record field) rather
    /// than constructible from template literals. Renders per §4.5 as
    /// `YYYY-MM-DD HH:MM:SS`.
    Time(NaiveDateTime),
    Seq(Vec<Value>),
    Map(ValueMap),
    Record(Arc<dyn FieldAccess>),
}

impl Value {
    pub fn nil() -> Value {
        Value::Null
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Django-style truthiness: nil, `false`, zero, and empty
    /// strings/sequences/mappings are falsy. Everything else — including an
    /// empty record — is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Time(_) => true,
            Value::Seq(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Record(_) => true,
        }
    }

    /// Coerces to an integer: integers pass through, floats truncate toward
    /// zero, booleans become 0/1. Strings are never numerically coerced.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => Some(*f as i64),
            Value::Bool(b) => Some(if *b { 1 } else { 0 }),
            _ => None,
        }
    }

    /// Coerces to a float: integers and booleans widen, floats pass
    /// through. Strings are never numerically coerced.
    pub fn to_float(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// String rendering. Strings render as themselves; numbers render in
    /// their natural base-10 form (Rust's float formatter already produces
    /// the shortest round-tripping decimal with no trailing `.0`);
    /// sequences render as `[e1,e2,…]`; maps and records fall back to
    /// deterministic (key-sorted) JSON.
    pub fn render(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.clone(),
            Value::Time(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
            Value::Seq(items) => {
                let parts: Vec<String> = items.iter().map(Value::render_nested).collect();
                format!("[{}]", parts.join(","))
            }
            Value::Map(_) | Value::Record(_) => self.to_json_string(),
        }
    }

    /// Rendering of an element inside a sequence: maps/records still fall
    /// back to JSON (so they stay quoted/bracketed), everything else uses
    /// the same top-level rendering.
    fn render_nested(&self) -> String {
        match self {
            Value::Map(_) | Value::Record(_) => self.to_json_string(),
            other => other.render(),
        }
    }

    fn to_json_string(&self) -> String {
        serde_json::to_string(&self.to_json()).unwrap_or_else(|_| "null".to_string())
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Time(_) => serde_json::Value::String(self.render()),
            Value::Seq(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => {
                let entries = map.iter().map(|(k, v)| (k.clone(), v.to_json()));
                serde_json::Value::Object(entries.collect())
            }
            Value::Record(rec) => {
                let entries = rec
                    .field_names()
                    .into_iter()
                    .filter_map(|name| rec.field(name).map(|v| (name.to_string(), v.to_json())));
                serde_json::Value::Object(entries.collect())
            }
        }
    }

    /// Length for strings (character count), sequences, and maps.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::Seq(items) => Some(items.len()),
            Value::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len().map(|n| n == 0).unwrap_or(false)
    }

    /// Resolves a dotted-path or subscript member. `key` is the already
    /// evaluated index/property expression; for property access the caller
    /// passes the property name wrapped in `Value::Str`.
    pub fn member(&self, key: &Value) -> Result<Value, ValueError> {
        match self {
            Value::Map(map) => {
                let k = key.render();
                map.get(&k).cloned().ok_or(ValueError::KeyNotFound(k))
            }
            Value::Record(rec) => {
                let k = key.render();
                rec.field(&k).ok_or(ValueError::KeyNotFound(k))
            }
            Value::Seq(items) => {
                let idx = key
                    .to_int()
                    .ok_or_else(|| ValueError::InvalidIndex(key.render()))?;
                if idx < 0 {
                    return Err(ValueError::IndexOutOfRange(idx));
                }
                items
                    .get(idx as usize)
                    .cloned()
                    .ok_or(ValueError::IndexOutOfRange(idx))
            }
            Value::Str(s) => {
                let idx = key
                    .to_int()
                    .ok_or_else(|| ValueError::InvalidIndex(key.render()))?;
                if idx < 0 {
                    return Err(ValueError::IndexOutOfRange(idx));
                }
                s.chars()
                    .nth(idx as usize)
                    .map(|c| Value::Str(c.to_string()))
                    .ok_or(ValueError::IndexOutOfRange(idx))
            }
            _ => Err(ValueError::NotIndexable),
        }
    }

    /// Produces this value's entries in deterministic iteration order:
    /// sequences in stored order, strings by Unicode scalar value, and
    /// mappings numerically ascending if every key parses as a number,
    /// otherwise lexicographically by key.
    pub fn iter_entries(&self) -> Result<Vec<IterEntry>, ValueError> {
        match self {
            Value::Seq(items) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, v)| IterEntry::Indexed(i, v.clone()))
                .collect()),
            Value::Str(s) => Ok(s
                .chars()
                .enumerate()
                .map(|(i, c)| IterEntry::Indexed(i, Value::Str(c.to_string())))
                .collect()),
            Value::Map(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                let all_numeric = keys.iter().all(|k| k.parse::<f64>().is_ok());
                if all_numeric {
                    keys.sort_by(|a, b| {
                        let fa: f64 = a.parse().unwrap();
                        let fb: f64 = b.parse().unwrap();
                        fa.partial_cmp(&fb).unwrap_or(Ordering::Equal)
                    });
                } else {
                    keys.sort();
                }
                Ok(keys
                    .into_iter()
                    .map(|k| IterEntry::Keyed(k.clone(), map[k].clone()))
                    .collect())
            }
            _ => Err(ValueError::UnsupportedCollection),
        }
    }

    /// Total-order comparison. `nil` is less than any non-nil value;
    /// numerically convertible operands compare as floats; everything else
    /// falls back to lexicographic comparison of their rendered strings.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self.is_nil(), other.is_nil()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        if let (Some(a), Some(b)) = (self.to_float(), other.to_float()) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
        self.render().cmp(&other.render())
    }
}

impl PartialEq for Value {
    /// Numeric equality first (so `42 == 42.0`), then exact string
    /// equality, then structural equality for sequences and maps. Records
    /// compare equal only to themselves (pointer identity).
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ if self.is_numeric() && other.is_numeric() => self.to_float() == other.to_float(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(t: NaiveDateTime) -> Self {
        Value::Time(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Person {
        full_name: String,
    }

    impl FieldAccess for Person {
        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "full" | "FullName" => Some(Value::Str(self.full_name.clone())),
                "-" => None,
                _ => None,
            }
        }

        fn field_names(&self) -> Vec<&'static str> {
            vec!["full"]
        }
    }

    #[test]
    fn falsy_values_per_django_rules() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Str(String::new()).is_truthy());
        assert!(!Value::Seq(vec![]).is_truthy());
        assert!(!Value::Map(ValueMap::default()).is_truthy());
    }

    #[test]
    fn empty_record_is_truthy() {
        let rec: Arc<dyn FieldAccess> = Arc::new(Person {
            full_name: String::new(),
        });
        assert!(Value::Record(rec).is_truthy());
    }

    #[test]
    fn numeric_equality_crosses_int_and_float() {
        assert_eq!(Value::Int(42), Value::Float(42.0));
    }

    #[test]
    fn nil_compares_less_than_anything() {
        assert_eq!(Value::Null.compare(&Value::Int(0)), Ordering::Less);
        assert_eq!(Value::Null.compare(&Value::Null), Ordering::Equal);
    }

    #[test]
    fn bool_sequence_renders_without_quotes() {
        let seq = Value::Seq(vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)]);
        assert_eq!(seq.render(), "[true,false,true]");
    }

    #[test]
    fn empty_sequence_renders_brackets() {
        assert_eq!(Value::Seq(vec![]).render(), "[]");
    }

    #[test]
    fn float_renders_without_trailing_zero() {
        assert_eq!(Value::Float(42.0).render(), "42");
        assert_eq!(Value::Float(3.14).render(), "3.14");
    }

    #[test]
    fn field_resolves_by_rename_or_export_name_and_hides_dash() {
        let rec: Arc<dyn FieldAccess> = Arc::new(Person {
            full_name: "Ada Lovelace".to_string(),
        });
        let value = Value::Record(rec);
        assert_eq!(
            value.member(&Value::Str("full".to_string())).unwrap(),
            Value::Str("Ada Lovelace".to_string())
        );
        assert_eq!(
            value.member(&Value::Str("FullName".to_string())).unwrap(),
            Value::Str("Ada Lovelace".to_string())
        );
        assert!(value.member(&Value::Str("-".to_string())).is_err());
    }

    #[test]
    fn map_iterates_numerically_when_all_keys_are_numbers() {
        let mut map = ValueMap::default();
        map.insert("10".to_string(), Value::Int(0));
        map.insert("2".to_string(), Value::Int(0));
        let entries = Value::Map(map).iter_entries().unwrap();
        let keys: Vec<String> = entries
            .into_iter()
            .map(|e| match e {
                IterEntry::Keyed(k, _) => k,
                IterEntry::Indexed(i, _) => i.to_string(),
            })
            .collect();
        assert_eq!(keys, vec!["2", "10"]);
    }

    #[test]
    fn map_iterates_lexicographically_otherwise() {
        let mut map = ValueMap::default();
        map.insert("b".to_string(), Value::Int(2));
        map.insert("a".to_string(), Value::Int(1));
        let entries = Value::Map(map).iter_entries().unwrap();
        let keys: Vec<String> = entries
            .into_iter()
            .map(|e| match e {
                IterEntry::Keyed(k, _) => k,
                IterEntry::Indexed(i, _) => i.to_string(),
            })
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn time_renders_as_sql_style_timestamp() {
        use chrono::NaiveDate;
        let t = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 30, 15)
            .unwrap();
        assert_eq!(Value::Time(t).render(), "2024-03-05 09:30:15");
    }

    #[test]
    fn subscript_out_of_range_is_an_error() {
        let seq = Value::Seq(vec![Value::Int(1)]);
        assert_eq!(
            seq.member(&Value::Int(5)),
            Err(ValueError::IndexOutOfRange(5))
        );
    }
}
