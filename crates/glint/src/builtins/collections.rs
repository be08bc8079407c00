//! Filters over sequences: dedup, sampling, reduction, and the `map`
//! filter that projects a field out of each element.

use rand::seq::SliceRandom;
use rand::Rng;

use glint_eval::Value;

use super::require_arg;

fn as_seq<'a>(value: &'a Value, filter: &str) -> Result<&'a [Value], String> {
    match value {
        Value::Seq(items) => Ok(items),
        other => Err(format!("{filter}: '{}' is not a sequence", other.render())),
    }
}

pub fn unique(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let items = as_seq(value, "unique")?;
    let mut out: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    Ok(Value::Seq(out))
}

pub fn first(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let items = as_seq(value, "first")?;
    items
        .first()
        .cloned()
        .ok_or_else(|| "first: sequence is empty".to_string())
}

pub fn last(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let items = as_seq(value, "last")?;
    items
        .last()
        .cloned()
        .ok_or_else(|| "last: sequence is empty".to_string())
}

pub fn random(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let items = as_seq(value, "random")?;
    items
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| "random: sequence is empty".to_string())
}

pub fn reverse(value: &Value, _args: &[Value]) -> Result<Value, String> {
    match value {
        Value::Seq(items) => {
            let mut out = items.clone();
            out.reverse();
            Ok(Value::Seq(out))
        }
        Value::Str(s) => Ok(Value::Str(s.chars().rev().collect())),
        other => Err(format!("reverse: '{}' cannot be reversed", other.render())),
    }
}

pub fn shuffle(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let items = as_seq(value, "shuffle")?;
    let mut out = items.to_vec();
    out.shuffle(&mut rand::thread_rng());
    Ok(Value::Seq(out))
}

pub fn size(value: &Value, _args: &[Value]) -> Result<Value, String> {
    value
        .len()
        .map(|n| Value::Int(n as i64))
        .ok_or_else(|| format!("size: '{}' has no size", value.render()))
}

pub fn max(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let items = as_seq(value, "max")?;
    items
        .iter()
        .max_by(|a, b| a.compare(b))
        .cloned()
        .ok_or_else(|| "max: sequence is empty".to_string())
}

pub fn min(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let items = as_seq(value, "min")?;
    items
        .iter()
        .min_by(|a, b| a.compare(b))
        .cloned()
        .ok_or_else(|| "min: sequence is empty".to_string())
}

pub fn sum(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let items = as_seq(value, "sum")?;
    let mut total = 0.0;
    for item in items {
        total += item
            .to_float()
            .ok_or_else(|| format!("sum: '{}' is not numeric", item.render()))?;
    }
    Ok(Value::Float(total))
}

pub fn average(value: &Value, args: &[Value]) -> Result<Value, String> {
    let items = as_seq(value, "average")?;
    if items.is_empty() {
        return Err("average: sequence is empty".to_string());
    }
    let total = match sum(value, args)? {
        Value::Float(f) => f,
        _ => unreachable!("sum always returns Value::Float"),
    };
    Ok(Value::Float(total / items.len() as f64))
}

/// `{{ people | map: "name" }}` — projects a field or key out of every
/// element, skipping elements where the lookup fails.
pub fn map(value: &Value, args: &[Value]) -> Result<Value, String> {
    let items = as_seq(value, "map")?;
    let key = require_arg(args, 0, "map")?;
    let projected: Vec<Value> = items
        .iter()
        .filter_map(|item| item.member(key).ok())
        .collect();
    Ok(Value::Seq(projected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: Vec<i64>) -> Value {
        Value::Seq(items.into_iter().map(Value::Int).collect())
    }

    #[test]
    fn unique_dedupes_preserving_order() {
        let v = Value::Seq(vec![Value::Int(1), Value::Int(2), Value::Int(1), Value::Int(3)]);
        assert_eq!(unique(&v, &[]).unwrap(), seq(vec![1, 2, 3]));
    }

    #[test]
    fn first_and_last_of_sequence() {
        let v = seq(vec![10, 20, 30]);
        assert_eq!(first(&v, &[]).unwrap(), Value::Int(10));
        assert_eq!(last(&v, &[]).unwrap(), Value::Int(30));
    }

    #[test]
    fn reverse_sequence_and_string() {
        assert_eq!(reverse(&seq(vec![1, 2, 3]), &[]).unwrap(), seq(vec![3, 2, 1]));
        assert_eq!(
            reverse(&Value::Str("abc".to_string()), &[]).unwrap(),
            Value::Str("cba".to_string())
        );
    }

    #[test]
    fn max_and_min_use_value_compare() {
        let v = seq(vec![3, 1, 4, 1, 5]);
        assert_eq!(max(&v, &[]).unwrap(), Value::Int(5));
        assert_eq!(min(&v, &[]).unwrap(), Value::Int(1));
    }

    #[test]
    fn sum_and_average_coerce_to_float() {
        let v = seq(vec![1, 2, 3, 4]);
        assert_eq!(sum(&v, &[]).unwrap(), Value::Float(10.0));
        assert_eq!(average(&v, &[]).unwrap(), Value::Float(2.5));
    }

    #[test]
    fn map_projects_a_field_from_each_record() {
        let mut a = glint_eval::ValueMap::default();
        a.insert("name".to_string(), Value::Str("Ada".to_string()));
        let mut b = glint_eval::ValueMap::default();
        b.insert("name".to_string(), Value::Str("Grace".to_string()));
        let v = Value::Seq(vec![Value::Map(a), Value::Map(b)]);
        let key = Value::Str("name".to_string());
        assert_eq!(
            map(&v, &[key]).unwrap(),
            Value::Seq(vec![
                Value::Str("Ada".to_string()),
                Value::Str("Grace".to_string())
            ])
        );
    }
}
