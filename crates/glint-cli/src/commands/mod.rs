pub mod check;
pub mod render;

use glint::{Context, Value, ValueMap};

/// Converts a JSON data file's contents into the [`Context`] a template
/// renders against. Top-level JSON must be an object; its entries become
/// the public scope's variables.
pub(crate) fn context_from_json(json: serde_json::Value) -> crate::error::Result<Context> {
    match json {
        serde_json::Value::Object(entries) => {
            let mut map = ValueMap::default();
            for (key, value) in entries {
                map.insert(key, value_from_json(value));
            }
            Ok(Context::from_map(map))
        }
        other => Err(crate::error::CliError::Config(format!(
            "template data must be a JSON object at the top level, got {other}"
        ))),
    }
}

fn value_from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Array(items) => {
            Value::Seq(items.into_iter().map(value_from_json).collect())
        }
        serde_json::Value::Object(entries) => {
            let mut map = ValueMap::default();
            for (key, value) in entries {
                map.insert(key, value_from_json(value));
            }
            Value::Map(map)
        }
    }
}
