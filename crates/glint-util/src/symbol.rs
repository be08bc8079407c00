//! String interning for template variable, tag and filter names.
//!
//! A [`Symbol`] is a compact (4-byte) handle to a string stored in a
//! process-wide [`StringTable`]. Templates are parsed repeatedly with the
//! same small set of identifiers (`loop`, `index`, filter names, ...), so
//! interning lets the parser and evaluator compare names in O(1) instead of
//! re-hashing or re-comparing full strings on every lookup.
//!
//! The table itself is a lock-free `DashMap` keyed by an `AHasher` digest of
//! the string, the same concurrent-interner design the teacher uses for its
//! own symbol table — multiple threads can intern concurrently without
//! blocking each other.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use ahash::AHasher;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// An interned string identifier.
///
/// Two symbols compare equal if and only if the strings they were interned
/// from are equal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Interns `text`, returning its symbol.
    pub fn intern(text: &str) -> Self {
        table().intern(text)
    }

    /// Returns the interned string for this symbol.
    pub fn as_str(&self) -> &'static str {
        table().get(*self)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::intern(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Symbol::intern(&value)
    }
}

/// Linear-probe distance for resolving hash collisions in [`StringTable`].
const MAX_PROBES: u64 = 32;

/// Golden-ratio-derived odd constant used to perturb the hash on each probe
/// step, so consecutive probes don't line up with other hashes' own probe
/// sequences.
const PROBE_PRIME: u64 = 0x9e3779b97f4a7c15;

/// A process-wide table mapping strings to [`Symbol`]s and back.
///
/// Entries are never removed: the set of distinct identifiers a program
/// ever parses is small and bounded, so leaking the backing string (via
/// `Box::leak`) to get a `'static` lifetime is simpler than reference
/// counting and cheap in practice. Keyed by an `AHasher` digest of the
/// string rather than the string itself, so lookups and inserts never hash
/// twice.
struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    next_index: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            next_index: AtomicU32::new(0),
        }
    }

    fn intern(&self, text: &str) -> Symbol {
        let hash = Self::hash_str(text);
        // Fast path: the string is already interned and the hash wasn't
        // reused by a different string.
        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == text {
                return Symbol(entry.value().1);
            }
        }

        // Slow path: insert on a true miss, or resolve a collision.
        match self.map.entry(hash) {
            Entry::Occupied(entry) => {
                if entry.get().0 == text {
                    Symbol(entry.get().1)
                } else {
                    drop(entry);
                    self.handle_collision(text, hash)
                }
            }
            Entry::Vacant(entry) => {
                let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
                let index = self.next_index.fetch_add(1, Ordering::Relaxed);
                entry.insert((leaked, index));
                Symbol(index)
            }
        }
    }

    /// Resolves a hash collision (a different string already occupying
    /// `original_hash`'s slot) by linear-probing forward with a
    /// golden-ratio stride, the same scheme the teacher's interner uses.
    fn handle_collision(&self, text: &str, original_hash: u64) -> Symbol {
        for i in 1..=MAX_PROBES {
            let probe_hash = original_hash.wrapping_add(i.wrapping_mul(PROBE_PRIME));
            match self.map.entry(probe_hash) {
                Entry::Occupied(entry) => {
                    if entry.get().0 == text {
                        return Symbol(entry.get().1);
                    }
                }
                Entry::Vacant(entry) => {
                    let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
                    let index = self.next_index.fetch_add(1, Ordering::Relaxed);
                    entry.insert((leaked, index));
                    return Symbol(index);
                }
            }
        }
        // Every probe slot was occupied by a different string. The
        // identifier set a template engine interns (variable/tag/filter
        // names) is small and bounded, so this is not expected to trigger
        // in practice; fall back to overwriting the original slot rather
        // than growing the probe sequence further.
        let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.map.insert(original_hash, (leaked, index));
        Symbol(index)
    }

    /// O(n) linear search by index — rare relative to `intern`, since
    /// `Symbol::as_str` is only called when rendering or formatting, not on
    /// every lookup.
    fn get(&self, symbol: Symbol) -> &'static str {
        self.map
            .iter()
            .find(|entry| entry.value().1 == symbol.0)
            .map(|entry| entry.value().0)
            .expect("Symbol always refers to a previously interned string")
    }

    fn hash_str(text: &str) -> u64 {
        let mut hasher = AHasher::default();
        text.hash(&mut hasher);
        hasher.finish()
    }
}

static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(StringTable::new);

fn table() -> &'static StringTable {
    &STRING_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_same_symbol() {
        let a = Symbol::intern("loop");
        let b = Symbol::intern("loop");
        assert_eq!(a, b);
    }

    #[test]
    fn different_text_interns_to_different_symbols() {
        let a = Symbol::intern("index");
        let b = Symbol::intern("index0");
        assert_ne!(a, b);
    }

    #[test]
    fn round_trips_through_as_str() {
        let sym = Symbol::intern("truncateWords");
        assert_eq!(sym.as_str(), "truncateWords");
    }
}
