//! Engine-internal property keys.
//!
//! A [`HiddenKey`] is a distinct key type, not a symbol and not a string, so no
//! script-visible construction path can produce one and every reflection
//! surface can drop it by matching on [`PropertyKey::Hidden`](crate::PropertyKey::Hidden).
//! Hidden properties live in ordinary property storage and follow the
//! prototype chain on lookup.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HIDDEN_ID: AtomicU64 = AtomicU64::new(RESERVED_HIDDEN_IDS);

const RESERVED_HIDDEN_IDS: u64 = 16;

/// An engine-only property key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HiddenKey {
    id: u64,
    name: &'static str,
}

impl HiddenKey {
    /// Allocate a new hidden key. Only engine code can call this.
    pub fn new(name: &'static str) -> Self {
        Self {
            id: NEXT_HIDDEN_ID.fetch_add(1, Ordering::Relaxed),
            name,
        }
    }

    const fn reserved(id: u64, name: &'static str) -> Self {
        Self { id, name }
    }

    /// Debug name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Unique id
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Marks builtin functions that have no `[[Construct]]` behavior.
pub const NON_CONSTRUCTOR: HiddenKey = HiddenKey::reserved(1, "NonConstructor");

/// Name used in "is not a constructor" / "is not a function" messages.
pub const FUNCTION_NAME: HiddenKey = HiddenKey::reserved(2, "FunctionName");
