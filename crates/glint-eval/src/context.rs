//! Public and per-execution scopes.
//!
//! [`Context`] is the caller-populated map a template renders against.
//! [`ExecutionContext`] layers a private scope stack (loop variables, the
//! `loop` binding) on top of one [`Context`] for the duration of a single
//! `execute` call.

use crate::value::{Value, ValueMap};

/// Caller-provided mapping of names to values. Dotted keys on [`set`]
/// create nested maps (`set("user.name", ..)` builds
/// `{"user": {"name": ..}}`); [`get`] accepts the same dotted paths, plus
/// integer segments for indexing into sequences.
#[derive(Debug, Clone, Default)]
pub struct Context {
    root: ValueMap,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context from an already-assembled map, e.g. for
    /// `NewExecutionContext(publicMap)` callers that hand over a ready
    /// value tree instead of building it path-by-path.
    pub fn from_map(root: ValueMap) -> Self {
        Self { root }
    }

    pub fn set(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        set_path(&mut self.root, &segments, value);
    }

    pub fn get(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?.clone();
        for segment in segments {
            let key = match (segment.parse::<i64>(), &current) {
                (Ok(n), Value::Seq(_) | Value::Str(_)) => Value::Int(n),
                _ => Value::Str(segment.to_string()),
            };
            current = current.member(&key).ok()?;
        }
        Some(current)
    }

    pub fn as_map(&self) -> &ValueMap {
        &self.root
    }

    pub fn into_map(self) -> ValueMap {
        self.root
    }
}

fn set_path(map: &mut ValueMap, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let entry = map
                .entry((*head).to_string())
                .or_insert_with(|| Value::Map(ValueMap::default()));
            if !matches!(entry, Value::Map(_)) {
                *entry = Value::Map(ValueMap::default());
            }
            if let Value::Map(nested) = entry {
                set_path(nested, rest, value);
            }
        }
    }
}

/// The `loop` record bound inside a `for` body: `{ index, index0,
/// revindex, first, last, length }`.
#[derive(Debug, Clone, Copy)]
pub struct LoopContext {
    pub index: usize,
    pub index0: usize,
    pub revindex: usize,
    pub first: bool,
    pub last: bool,
    pub length: usize,
}

impl LoopContext {
    pub fn new(index0: usize, length: usize) -> Self {
        Self {
            index: index0 + 1,
            index0,
            revindex: length - index0,
            first: index0 == 0,
            last: index0 + 1 == length,
            length,
        }
    }

    pub fn to_value(self) -> Value {
        let mut map = ValueMap::default();
        map.insert("index".to_string(), Value::Int(self.index as i64));
        map.insert("index0".to_string(), Value::Int(self.index0 as i64));
        map.insert("revindex".to_string(), Value::Int(self.revindex as i64));
        map.insert("first".to_string(), Value::Bool(self.first));
        map.insert("last".to_string(), Value::Bool(self.last));
        map.insert("length".to_string(), Value::Int(self.length as i64));
        Value::Map(map)
    }
}

/// A stack of scope layers: index 0 is the public context, every layer
/// above it is a private scope pushed for an active `for` body. Lookups
/// walk top-down; writes always hit the top layer.
#[derive(Debug)]
pub struct ExecutionContext {
    public: ValueMap,
    private: Vec<ValueMap>,
}

impl ExecutionContext {
    pub fn new(public: ValueMap) -> Self {
        Self {
            public,
            private: Vec::new(),
        }
    }

    /// Looks up a bare name: private scopes first (innermost first), then
    /// the public context.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        for layer in self.private.iter().rev() {
            if let Some(value) = layer.get(name) {
                return Some(value.clone());
            }
        }
        self.public.get(name).cloned()
    }

    /// Pushes a new private scope layer, used on entering a `for` body.
    pub fn push_scope(&mut self) {
        self.private.push(ValueMap::default());
    }

    /// Pops the innermost private scope layer, used on leaving a `for`
    /// body via any exit path (normal, break, continue, or error).
    pub fn pop_scope(&mut self) {
        self.private.pop();
    }

    /// Binds a name in the innermost private scope. Panics if no scope has
    /// been pushed — callers only bind loop variables inside a pushed
    /// scope.
    pub fn bind(&mut self, name: &str, value: Value) {
        let layer = self
            .private
            .last_mut()
            .expect("bind called with no active scope");
        layer.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_set_builds_nested_maps() {
        let mut ctx = Context::new();
        ctx.set("user.name", Value::Str("Joe".to_string()));
        assert_eq!(ctx.get("user.name"), Some(Value::Str("Joe".to_string())));
    }

    #[test]
    fn get_indexes_into_sequences_by_integer_segment() {
        let mut ctx = Context::new();
        ctx.set("items", Value::Seq(vec![Value::Int(10), Value::Int(20)]));
        assert_eq!(ctx.get("items.1"), Some(Value::Int(20)));
    }

    #[test]
    fn private_scope_shadows_public_and_is_removed_on_pop() {
        let mut public = ValueMap::default();
        public.insert("x".to_string(), Value::Int(1));
        let mut exec = ExecutionContext::new(public);

        exec.push_scope();
        exec.bind("x", Value::Int(2));
        assert_eq!(exec.lookup("x"), Some(Value::Int(2)));
        exec.pop_scope();
        assert_eq!(exec.lookup("x"), Some(Value::Int(1)));
    }

    #[test]
    fn loop_context_reports_1_based_index_and_revindex() {
        let loop_ctx = LoopContext::new(0, 3);
        assert_eq!(loop_ctx.index, 1);
        assert_eq!(loop_ctx.index0, 0);
        assert_eq!(loop_ctx.revindex, 3);
        assert!(loop_ctx.first);
        assert!(!loop_ctx.last);
    }
}
