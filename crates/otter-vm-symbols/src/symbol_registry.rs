use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::string::JsString;
use crate::symbol::{Symbol, SymbolId, SymbolKind};

static GLOBAL_REGISTRY: LazyLock<Arc<SymbolRegistry>> =
    LazyLock::new(|| Arc::new(SymbolRegistry::new()));

/// Symbol registry for Symbol.for() / Symbol.keyFor()
///
/// Append-only. The process-wide instance is shared by every realm unless a
/// realm is configured with its own registry. Lookups for the same key from
/// concurrent threads always observe a single symbol: insert-or-fetch runs
/// under the shard lock of the key.
pub struct SymbolRegistry {
    by_key: DashMap<Arc<str>, Symbol, FxBuildHasher>,
    by_id: DashMap<SymbolId, Arc<JsString>, FxBuildHasher>,
}

impl SymbolRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            by_key: DashMap::with_hasher(FxBuildHasher),
            by_id: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// The process-wide registry
    pub fn global() -> Arc<SymbolRegistry> {
        GLOBAL_REGISTRY.clone()
    }

    /// `Symbol.for(key)` after the key has been string-coerced.
    pub fn for_key(&self, key: &str) -> Symbol {
        if let Some(existing) = self.by_key.get(key) {
            tracing::trace!(key, id = existing.id().0, "symbol registry hit");
            return existing.clone();
        }
        self.by_key
            .entry(Arc::from(key))
            .or_insert_with(|| {
                let description = JsString::intern(key);
                let symbol = Symbol::with_kind(Some(description.clone()), SymbolKind::Registered);
                // Reverse entry lands before the forward entry becomes visible
                self.by_id.insert(symbol.id(), description);
                tracing::trace!(key, id = symbol.id().0, "symbol registered");
                symbol
            })
            .clone()
    }

    /// `Symbol.keyFor(symbol)`: the registered key, or `None` for symbols
    /// this registry does not own (local, well-known, or another registry's).
    pub fn key_for(&self, symbol: &Symbol) -> Option<Arc<JsString>> {
        if symbol.kind() != SymbolKind::Registered {
            return None;
        }
        self.by_id.get(&symbol.id()).map(|key| key.clone())
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Is the registry empty
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolRegistry")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::well_known::to_primitive_symbol;

    #[test]
    fn test_for_key_is_identity_stable() {
        let registry = SymbolRegistry::new();
        let a = registry.for_key("app.id");
        let b = registry.for_key("app.id");
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_keys_distinct_symbols() {
        let registry = SymbolRegistry::new();
        assert_ne!(registry.for_key("a"), registry.for_key("b"));
    }

    #[test]
    fn test_key_for_round_trip_and_misses() {
        let registry = SymbolRegistry::new();
        let sym = registry.for_key("foo\u{0}bar");
        assert_eq!(registry.key_for(&sym).unwrap().as_str(), "foo\u{0}bar");

        let local = Symbol::new(Some(JsString::intern("foo\u{0}bar")));
        assert!(registry.key_for(&local).is_none());
        assert!(registry.key_for(&to_primitive_symbol()).is_none());
    }

    #[test]
    fn test_registries_do_not_share_entries() {
        let a = SymbolRegistry::new();
        let b = SymbolRegistry::new();
        let sym_a = a.for_key("shared");
        assert_ne!(sym_a, b.for_key("shared"));
        assert!(b.key_for(&sym_a).is_none());
    }

    #[test]
    fn test_registered_symbol_description_is_key() {
        let registry = SymbolRegistry::new();
        let sym = registry.for_key("");
        assert_eq!(sym.descriptive_string(), "Symbol()");
        assert_eq!(sym.kind(), SymbolKind::Registered);
    }
}
