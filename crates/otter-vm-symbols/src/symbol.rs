//! Symbol values.
//!
//! A [`Symbol`] is an opaque identity plus an optional, immutable description.
//! Identity is the only basis for equality: two symbols created with the same
//! description are different values.

use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::string::JsString;
use crate::well_known;

/// First id handed out to runtime-created symbols; lower ids belong to the
/// well-known table.
pub const FIRST_DYNAMIC_SYMBOL_ID: u64 = well_known::UNSCOPABLES + 1;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(FIRST_DYNAMIC_SYMBOL_ID);

fn next_symbol_id() -> SymbolId {
    SymbolId(NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed))
}

/// Unique identity token of a symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u64);

/// How a symbol came into existence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    /// `Symbol(desc)`: a fresh local symbol
    Local,
    /// `Symbol.for(key)`: owned by a registry
    Registered,
    /// Engine-defined, created once at startup
    WellKnown,
}

#[derive(Debug)]
struct SymbolData {
    id: SymbolId,
    /// `None` is the no-description sentinel, distinct from `Some("")`.
    description: Option<Arc<JsString>>,
    kind: SymbolKind,
}

/// A JavaScript Symbol
#[derive(Clone)]
pub struct Symbol(Arc<SymbolData>);

impl Symbol {
    /// Create a fresh local symbol. Never returns an existing identity.
    pub fn new(description: Option<Arc<JsString>>) -> Self {
        Self::with_kind(description, SymbolKind::Local)
    }

    /// Create a fresh symbol of the given kind
    pub(crate) fn with_kind(description: Option<Arc<JsString>>, kind: SymbolKind) -> Self {
        Self(Arc::new(SymbolData {
            id: next_symbol_id(),
            description,
            kind,
        }))
    }

    /// Create a well-known symbol with a reserved id
    pub(crate) fn well_known(id: u64, description: &str) -> Self {
        Self(Arc::new(SymbolData {
            id: SymbolId(id),
            description: Some(JsString::intern(description)),
            kind: SymbolKind::WellKnown,
        }))
    }

    /// Identity token
    #[inline]
    pub fn id(&self) -> SymbolId {
        self.0.id
    }

    /// Internal description (`None` when created without one)
    pub fn description(&self) -> Option<&Arc<JsString>> {
        self.0.description.as_ref()
    }

    /// How this symbol was created
    pub fn kind(&self) -> SymbolKind {
        self.0.kind
    }

    /// `"Symbol(" + description + ")"` built from the internal description.
    ///
    /// Never consults `Symbol.prototype`, so it has no script-visible side effects.
    pub fn descriptive_string(&self) -> String {
        match &self.0.description {
            Some(desc) => format!("Symbol({})", desc.as_str()),
            None => "Symbol()".to_string(),
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.descriptive_string(), self.0.id.0)
    }
}
