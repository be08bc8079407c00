//! Date/time filters over [`Value::Time`].
//!
//! These only accept a piped `Value::Time` — templates get timestamps
//! from host data (a record field, a context value set by the caller),
//! never from a literal, so there is no lexer/parser surface for them.

use chrono::{Datelike, NaiveDateTime};

use glint_eval::Value;

use super::arg_str;

fn as_time(value: &Value, filter: &str) -> Result<NaiveDateTime, String> {
    match value {
        Value::Time(t) => Ok(*t),
        other => Err(format!("{filter}: '{}' is not a time value", other.render())),
    }
}

/// `{{ created_at | date: "%Y-%m-%d" }}` — `strftime`-style format string.
pub fn date(value: &Value, args: &[Value]) -> Result<Value, String> {
    let t = as_time(value, "date")?;
    let fmt = arg_str(args, 0)?;
    Ok(Value::Str(t.format(&fmt).to_string()))
}

pub fn day(value: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Int(as_time(value, "day")?.day() as i64))
}

pub fn month(value: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Int(as_time(value, "month")?.month() as i64))
}

const MONTH_NAMES: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub fn month_full(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let t = as_time(value, "monthFull")?;
    Ok(Value::Str(MONTH_NAMES[t.month0() as usize].to_string()))
}

pub fn year(value: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Int(as_time(value, "year")?.year() as i64))
}

/// ISO 8601 week number.
pub fn week(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let t = as_time(value, "week")?;
    Ok(Value::Int(t.iso_week().week() as i64))
}

const WEEKDAY_NAMES: &[&str] = &[
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

pub fn weekday(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let t = as_time(value, "weekday")?;
    Ok(Value::Str(
        WEEKDAY_NAMES[t.weekday().num_days_from_monday() as usize].to_string(),
    ))
}

/// Coarse relative description against the current local time, e.g.
/// `"3 hours ago"` / `"in 2 days"`.
pub fn time_ago(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let t = as_time(value, "timeAgo")?;
    let now = chrono::Local::now().naive_local();
    let delta = now.signed_duration_since(t);
    let seconds = delta.num_seconds();
    let (amount, unit) = magnitude(seconds.abs());
    let phrase = format!("{amount} {unit}{}", if amount == 1 { "" } else { "s" });
    Ok(Value::Str(if seconds >= 0 {
        format!("{phrase} ago")
    } else {
        format!("in {phrase}")
    }))
}

fn magnitude(seconds: i64) -> (i64, &'static str) {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    if seconds < MINUTE {
        (seconds.max(0), "second")
    } else if seconds < HOUR {
        (seconds / MINUTE, "minute")
    } else if seconds < DAY {
        (seconds / HOUR, "hour")
    } else if seconds < MONTH {
        (seconds / DAY, "day")
    } else if seconds < YEAR {
        (seconds / MONTH, "month")
    } else {
        (seconds / YEAR, "year")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> Value {
        Value::Time(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap(),
        )
    }

    #[test]
    fn day_month_year_extract_fields() {
        let v = t(2024, 3, 5, 9, 0, 0);
        assert_eq!(day(&v, &[]).unwrap(), Value::Int(5));
        assert_eq!(month(&v, &[]).unwrap(), Value::Int(3));
        assert_eq!(year(&v, &[]).unwrap(), Value::Int(2024));
        assert_eq!(month_full(&v, &[]).unwrap(), Value::Str("March".to_string()));
    }

    #[test]
    fn weekday_names_the_day() {
        // 2024-03-05 is a Tuesday.
        let v = t(2024, 3, 5, 0, 0, 0);
        assert_eq!(weekday(&v, &[]).unwrap(), Value::Str("Tuesday".to_string()));
    }

    #[test]
    fn date_uses_strftime_format() {
        let v = t(2024, 3, 5, 9, 30, 0);
        assert_eq!(
            date(&v, &[Value::Str("%Y/%m/%d".to_string())]).unwrap(),
            Value::Str("2024/03/05".to_string())
        );
    }

    #[test]
    fn time_ago_rejects_non_time_values() {
        assert!(time_ago(&Value::Int(1), &[]).is_err());
    }
}
