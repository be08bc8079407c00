//! Numeric filters: formatting, clamping, rounding, and the four
//! arithmetic filters (`plus`/`minus`/`times`/`divide`/`modulo`) that give
//! templates an alternative to the `+ - * / %` operators.

use glint_eval::Value;

use super::require_arg;

fn as_f64(value: &Value, filter: &str) -> Result<f64, String> {
    value
        .to_float()
        .ok_or_else(|| format!("{filter}: '{}' is not numeric", value.render()))
}

fn arg_f64(args: &[Value], index: usize, filter: &str) -> Result<f64, String> {
    as_f64(require_arg(args, index, filter)?, filter)
}

/// Formats with thousands separators: `1234567 -> "1,234,567"`. Fractional
/// parts, if any, are preserved as-is.
pub fn number(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let n = as_f64(value, "number")?;
    let negative = n.is_sign_negative();
    let abs = n.abs();
    let whole = abs.trunc() as i64;
    let frac = abs.fract();

    let mut grouped = String::new();
    let digits = whole.to_string();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac > 0.0 {
        out.push_str(&format!("{:.2}", frac).trim_start_matches('0'));
    }
    Ok(Value::Str(out))
}

const BYTE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

/// Human-readable byte size: `1536 -> "1.50 KB"`.
pub fn bytes(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let mut n = as_f64(value, "bytes")?;
    let mut unit_index = 0;
    while n >= 1024.0 && unit_index < BYTE_UNITS.len() - 1 {
        n /= 1024.0;
        unit_index += 1;
    }
    Ok(Value::Str(format!("{n:.2} {}", BYTE_UNITS[unit_index])))
}

pub fn abs(value: &Value, _args: &[Value]) -> Result<Value, String> {
    match value {
        Value::Int(i) => Ok(Value::Int(i.abs())),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        other => Err(format!("abs: '{}' is not numeric", other.render())),
    }
}

pub fn at_least(value: &Value, args: &[Value]) -> Result<Value, String> {
    let floor = arg_f64(args, 0, "atLeast")?;
    let n = as_f64(value, "atLeast")?;
    Ok(Value::Float(n.max(floor)))
}

pub fn at_most(value: &Value, args: &[Value]) -> Result<Value, String> {
    let ceiling = arg_f64(args, 0, "atMost")?;
    let n = as_f64(value, "atMost")?;
    Ok(Value::Float(n.min(ceiling)))
}

pub fn round(value: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Int(as_f64(value, "round")?.round() as i64))
}

pub fn floor(value: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Int(as_f64(value, "floor")?.floor() as i64))
}

pub fn ceil(value: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Int(as_f64(value, "ceil")?.ceil() as i64))
}

pub fn plus(value: &Value, args: &[Value]) -> Result<Value, String> {
    Ok(Value::Float(as_f64(value, "plus")? + arg_f64(args, 0, "plus")?))
}

pub fn minus(value: &Value, args: &[Value]) -> Result<Value, String> {
    Ok(Value::Float(as_f64(value, "minus")? - arg_f64(args, 0, "minus")?))
}

pub fn times(value: &Value, args: &[Value]) -> Result<Value, String> {
    Ok(Value::Float(as_f64(value, "times")? * arg_f64(args, 0, "times")?))
}

pub fn divide(value: &Value, args: &[Value]) -> Result<Value, String> {
    let divisor = arg_f64(args, 0, "divide")?;
    if divisor == 0.0 {
        return Err("divide: division by zero".to_string());
    }
    Ok(Value::Float(as_f64(value, "divide")? / divisor))
}

pub fn modulo(value: &Value, args: &[Value]) -> Result<Value, String> {
    let divisor = arg_f64(args, 0, "modulo")?;
    if divisor == 0.0 {
        return Err("modulo: division by zero".to_string());
    }
    Ok(Value::Float(as_f64(value, "modulo")? % divisor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_groups_thousands() {
        assert_eq!(
            number(&Value::Int(1234567), &[]).unwrap(),
            Value::Str("1,234,567".to_string())
        );
    }

    #[test]
    fn bytes_scales_to_largest_unit() {
        assert_eq!(
            bytes(&Value::Int(1536), &[]).unwrap(),
            Value::Str("1.50 KB".to_string())
        );
    }

    #[test]
    fn at_least_and_at_most_clamp() {
        assert_eq!(at_least(&Value::Int(2), &[Value::Int(5)]).unwrap(), Value::Float(5.0));
        assert_eq!(at_most(&Value::Int(8), &[Value::Int(5)]).unwrap(), Value::Float(5.0));
    }

    #[test]
    fn rounding_filters() {
        assert_eq!(round(&Value::Float(2.5), &[]).unwrap(), Value::Int(3));
        assert_eq!(floor(&Value::Float(2.9), &[]).unwrap(), Value::Int(2));
        assert_eq!(ceil(&Value::Float(2.1), &[]).unwrap(), Value::Int(3));
    }

    #[test]
    fn arithmetic_filters() {
        assert_eq!(plus(&Value::Int(2), &[Value::Int(3)]).unwrap(), Value::Float(5.0));
        assert_eq!(minus(&Value::Int(5), &[Value::Int(3)]).unwrap(), Value::Float(2.0));
        assert_eq!(times(&Value::Int(4), &[Value::Int(3)]).unwrap(), Value::Float(12.0));
        assert_eq!(divide(&Value::Int(10), &[Value::Int(4)]).unwrap(), Value::Float(2.5));
        assert_eq!(modulo(&Value::Int(10), &[Value::Int(3)]).unwrap(), Value::Float(1.0));
    }

    #[test]
    fn divide_by_zero_errors() {
        assert!(divide(&Value::Int(1), &[Value::Int(0)]).is_err());
    }
}
