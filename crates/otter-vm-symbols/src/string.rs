//! Interned JavaScript strings
//!
//! Strings are immutable. Property names and builtin names are interned for
//! deduplication; strings produced at runtime are allocated with [`JsString::new`].
//! Content may contain any codepoint, including embedded NUL.

use dashmap::DashMap;
use rustc_hash::{FxBuildHasher, FxHasher};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

/// Global string intern table
static STRING_TABLE: LazyLock<DashMap<Arc<str>, Arc<JsString>, FxBuildHasher>> =
    LazyLock::new(|| DashMap::with_hasher(FxBuildHasher));

/// An immutable JavaScript string
#[derive(Clone)]
pub struct JsString {
    /// The actual string data
    data: Arc<str>,
    /// Precomputed hash for fast lookup
    hash: u64,
}

impl JsString {
    /// Create or retrieve an interned string (using global table)
    pub fn intern(s: &str) -> Arc<Self> {
        if let Some(existing) = STRING_TABLE.get(s) {
            return existing.clone();
        }
        let js_str = Arc::new(Self::new(s));
        STRING_TABLE
            .entry(js_str.data.clone())
            .or_insert(js_str)
            .clone()
    }

    /// Create a string without interning (for temporary strings)
    pub fn new(s: impl Into<Arc<str>>) -> Self {
        let data: Arc<str> = s.into();
        let hash = Self::compute_hash(&data);
        Self { data, hash }
    }

    /// Allocate a runtime string behind an `Arc`
    pub fn new_arc(s: impl Into<Arc<str>>) -> Arc<Self> {
        Arc::new(Self::new(s))
    }

    /// Get the string content
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Length in UTF-16 code units, as scripts observe `.length`
    pub fn utf16_len(&self) -> usize {
        self.data.encode_utf16().count()
    }

    /// Is the string empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Precomputed content hash
    #[inline]
    pub fn hash_value(&self) -> u64 {
        self.hash
    }

    fn compute_hash(s: &str) -> u64 {
        let mut hasher = FxHasher::default();
        s.hash(&mut hasher);
        hasher.finish()
    }
}

impl PartialEq for JsString {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.data == other.data
    }
}

impl Eq for JsString {}

impl Hash for JsString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl std::fmt::Debug for JsString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.data)
    }
}

impl std::fmt::Display for JsString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedupes() {
        let a = JsString::intern("hello");
        let b = JsString::intern("hello");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_new_is_not_interned_but_equal() {
        let a = JsString::intern("world");
        let b = JsString::new_arc("world");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_embedded_nul_preserved() {
        let s = JsString::new("foo\u{0}bar");
        assert_eq!(s.as_str().len(), 7);
        assert_eq!(s.utf16_len(), 7);
    }

    #[test]
    fn test_utf16_len_counts_code_units() {
        assert_eq!(JsString::new("\u{ffff}").utf16_len(), 1);
        assert_eq!(JsString::new("\u{1F600}").utf16_len(), 2);
    }
}
