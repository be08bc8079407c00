//! Filter and tag registries.
//!
//! Both are process-wide, thread-safe, and idempotent on re-registration:
//! registering a name that already exists silently replaces the previous
//! entry rather than erroring. Reads take a read lock held only across the
//! map lookup itself, never across filter invocation or template
//! execution.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::value::Value;

/// A filter implementation: takes the piped value and its (already
/// evaluated) argument values, and produces a value or a failure reason.
pub type FilterFn = Arc<dyn Fn(&Value, &[Value]) -> Result<Value, String> + Send + Sync>;

/// Name-indexed store of filter implementations.
pub struct FilterRegistry {
    filters: RwLock<FxHashMap<String, FilterFn>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self {
            filters: RwLock::new(FxHashMap::default()),
        }
    }

    /// Registers `name`, replacing any existing filter under that name.
    pub fn register(&self, name: impl Into<String>, f: FilterFn) {
        self.filters.write().insert(name.into(), f);
    }

    pub fn get(&self, name: &str) -> Option<FilterFn> {
        self.filters.read().get(name).cloned()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.filters.read().contains_key(name)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The four built-in block tags every template source may use.
pub const BUILTIN_TAGS: &[&str] = &["if", "for", "break", "continue"];

/// Tracks which tag names a host has registered.
///
/// The statement parser only ever produces the fixed built-in `Statement`
/// variants (`If`, `For`, `Break`, `Continue`); there is no dynamic AST node
/// a registered custom tag could parse into. `TagRegistry` still exists as
/// the contract surface `RegisterTag` targets — it records which names are
/// known and rejects the empty name as a programming mistake — but it does
/// not (and, without extending the AST, cannot) make the parser accept new
/// tag syntax.
pub struct TagRegistry {
    names: RwLock<FxHashSet<String>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        let names = BUILTIN_TAGS.iter().map(|s| s.to_string()).collect();
        Self {
            names: RwLock::new(names),
        }
    }

    pub fn register(&self, name: impl Into<String>) -> Result<(), String> {
        let name = name.into();
        if name.is_empty() {
            return Err("tag name must not be empty".to_string());
        }
        self.names.write().insert(name);
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.names.read().contains(name)
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tags_are_preregistered() {
        let reg = TagRegistry::new();
        for name in BUILTIN_TAGS {
            assert!(reg.is_registered(name));
        }
    }

    #[test]
    fn registering_empty_tag_name_errors() {
        let reg = TagRegistry::new();
        assert!(reg.register("").is_err());
    }

    #[test]
    fn re_registering_a_filter_overwrites_without_error() {
        let reg = FilterRegistry::new();
        reg.register("upper", Arc::new(|v: &Value, _args: &[Value]| Ok(v.clone())));
        reg.register("upper", Arc::new(|v: &Value, _args: &[Value]| Ok(v.clone())));
        assert!(reg.is_registered("upper"));
    }

    #[test]
    fn unknown_filter_is_none() {
        let reg = FilterRegistry::new();
        assert!(reg.get("nope").is_none());
    }
}
