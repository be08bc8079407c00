//! String-shaped filters: case conversion, trimming, splitting, and the
//! handful of "slug"/"case style" conversions common to template engines.

use glint_eval::Value;

use super::{arg_str, require_arg};

pub fn default(value: &Value, args: &[Value]) -> Result<Value, String> {
    let fallback = require_arg(args, 0, "default")?;
    if value.is_nil() || !value.is_truthy() {
        Ok(fallback.clone())
    } else {
        Ok(value.clone())
    }
}

pub fn trim(value: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Str(value.render().trim().to_string()))
}

pub fn split(value: &Value, args: &[Value]) -> Result<Value, String> {
    let sep = arg_str(args, 0)?;
    let parts: Vec<Value> = value
        .render()
        .split(sep.as_str())
        .map(|s| Value::Str(s.to_string()))
        .collect();
    Ok(Value::Seq(parts))
}

pub fn replace(value: &Value, args: &[Value]) -> Result<Value, String> {
    let from = arg_str(args, 0)?;
    let to = arg_str(args, 1)?;
    Ok(Value::Str(value.render().replace(from.as_str(), &to)))
}

pub fn remove(value: &Value, args: &[Value]) -> Result<Value, String> {
    let needle = arg_str(args, 0)?;
    Ok(Value::Str(value.render().replace(needle.as_str(), "")))
}

pub fn append(value: &Value, args: &[Value]) -> Result<Value, String> {
    let suffix = arg_str(args, 0)?;
    Ok(Value::Str(format!("{}{}", value.render(), suffix)))
}

pub fn prepend(value: &Value, args: &[Value]) -> Result<Value, String> {
    let prefix = arg_str(args, 0)?;
    Ok(Value::Str(format!("{}{}", prefix, value.render())))
}

pub fn length(value: &Value, _args: &[Value]) -> Result<Value, String> {
    value
        .len()
        .map(|n| Value::Int(n as i64))
        .ok_or_else(|| "length: value has no length".to_string())
}

pub fn upper(value: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Str(value.render().to_uppercase()))
}

pub fn lower(value: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Str(value.render().to_lowercase()))
}

/// Title-cases every word: `"hello world" -> "Hello World"`.
pub fn titleize(value: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Str(title_case(&value.render())))
}

/// Capitalizes only the first character of the whole string.
pub fn capitalize(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let s = value.render();
    let mut chars = s.chars();
    let out = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    Ok(Value::Str(out))
}

/// `"hello_world" -> "helloWorld"` (lower camelCase).
pub fn camelize(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let words = split_words(&value.render());
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize_word(word));
        }
    }
    Ok(Value::Str(out))
}

/// `"hello_world" -> "HelloWorld"` (PascalCase).
pub fn pascalize(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let words = split_words(&value.render());
    let out: String = words.iter().map(|w| capitalize_word(w)).collect();
    Ok(Value::Str(out))
}

/// `"HelloWorld" -> "hello-world"`.
pub fn dasherize(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let words = split_words(&value.render());
    let out = words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    Ok(Value::Str(out))
}

/// `"Hello, World!" -> "hello-world"`: dasherize, then drop anything that
/// isn't alphanumeric or a separator.
pub fn slugify(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let lowered = value.render().to_lowercase();
    let mut slug = String::new();
    let mut last_was_dash = true;
    for c in lowered.chars() {
        if c.is_alphanumeric() {
            slug.push(c);
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    Ok(Value::Str(slug))
}

/// Naive English pluralization: `y -> ies`, `s/x/ch/sh -> es`, else `+s`.
/// Irregular plurals are out of scope for this registry-contract filler.
pub fn pluralize(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let s = value.render();
    let plural = if let Some(stem) = s.strip_suffix('y') {
        if stem
            .chars()
            .last()
            .map(|c| !"aeiou".contains(c))
            .unwrap_or(false)
        {
            format!("{stem}ies")
        } else {
            format!("{s}s")
        }
    } else if s.ends_with('s')
        || s.ends_with('x')
        || s.ends_with("ch")
        || s.ends_with("sh")
    {
        format!("{s}es")
    } else {
        format!("{s}s")
    };
    Ok(Value::Str(plural))
}

/// `1 -> "1st"`, `2 -> "2nd"`, `11 -> "11th"`, etc.
pub fn ordinalize(value: &Value, _args: &[Value]) -> Result<Value, String> {
    let n = value
        .to_int()
        .ok_or_else(|| format!("ordinalize: '{}' is not a number", value.render()))?;
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    Ok(Value::Str(format!("{n}{suffix}")))
}

pub fn truncate(value: &Value, args: &[Value]) -> Result<Value, String> {
    let max_len = arg_usize(args, 0)?;
    let s = value.render();
    let truncated: String = s.chars().take(max_len).collect();
    if s.chars().count() > max_len {
        Ok(Value::Str(format!("{truncated}...")))
    } else {
        Ok(Value::Str(s))
    }
}

pub fn truncate_words(value: &Value, args: &[Value]) -> Result<Value, String> {
    let max_words = arg_usize(args, 0)?;
    let s = value.render();
    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() > max_words {
        Ok(Value::Str(format!("{}...", words[..max_words].join(" "))))
    } else {
        Ok(Value::Str(s))
    }
}

pub fn join(value: &Value, args: &[Value]) -> Result<Value, String> {
    let sep = arg_str(args, 0)?;
    match value {
        Value::Seq(items) => {
            let parts: Vec<String> = items.iter().map(Value::render).collect();
            Ok(Value::Str(parts.join(&sep)))
        }
        other => Err(format!("join: '{}' is not a sequence", other.render())),
    }
}

/// Given an indexable piped value and a key, extracts that member —
/// `{{ record | extract: "field" }}` where `record` might not be a
/// template variable at all (e.g. the result of another filter chain).
pub fn extract(value: &Value, args: &[Value]) -> Result<Value, String> {
    let key = require_arg(args, 0, "extract")?;
    value.member(key).map_err(|e| e.to_string())
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Splits `s` into words on `_`, `-`, whitespace, and case boundaries, so
/// `camelize`/`pascalize`/`dasherize` all work from the same notion of a
/// "word" regardless of the input's original casing convention.
fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in s.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        prev_lower = c.is_lowercase();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn arg_usize(args: &[Value], index: usize) -> Result<usize, String> {
    let arg = require_arg(args, index, "filter")?;
    arg.to_int()
        .filter(|n| *n >= 0)
        .map(|n| n as usize)
        .ok_or_else(|| format!("expected a non-negative integer argument, got '{}'", arg.render()))
}
