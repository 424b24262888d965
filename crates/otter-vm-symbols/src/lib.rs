//! # Otter VM Symbols
//!
//! The Symbol primitive subsystem of the Otter JavaScript runtime.
//!
//! Symbols are opaque, identity-based values usable as non-colliding property
//! keys. This crate owns everything that has to special-case them:
//!
//! - **Identity**: [`Symbol`] values compare by allocation id, never by description
//! - **Registry**: process-wide interning backing `Symbol.for` / `Symbol.keyFor`
//! - **Well-known symbols**: a fixed table created once and shared by every realm
//! - **Hidden keys**: engine-only property keys that no reflection API can observe
//! - **Property keys**: plain and wrapped symbols index the same storage slot
//! - **Coercion guard**: the restricted coercion table for symbol operands
//! - **JSON**: symbol keys and values are dropped by `JSON.stringify`
//!
//! ## Example
//!
//! ```ignore
//! use otter_vm_symbols::{Realm, Value};
//!
//! let realm = Realm::new();
//! let mut ncx = realm.context();
//! let symbol_ctor = realm.global_value("Symbol");
//! let sym = ncx.call_function(&symbol_ctor, Value::undefined(), &[Value::from("foo")])?;
//! assert_eq!(ncx.to_display_string(&sym)?.as_str(), "Symbol(foo)");
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod builtin_builder;
pub mod coercion;
pub mod config;
pub mod context;
pub mod error;
pub mod hidden;
pub mod intrinsics;
pub mod intrinsics_impl;
pub mod number;
pub mod object;
pub mod operations;
pub mod property_key;
pub mod realm;
pub mod string;
pub mod symbol;
pub mod symbol_registry;
pub mod value;
pub mod well_known;

pub use coercion::{CoercionGuard, PreferredType};
pub use config::RealmConfig;
pub use context::NativeContext;
pub use error::{CoercionError, CoercionTarget, VmError, VmResult};
pub use hidden::HiddenKey;
pub use object::{JsObject, PropertyKey};
pub use realm::Realm;
pub use string::JsString;
pub use symbol::Symbol;
pub use symbol_registry::SymbolRegistry;
pub use value::Value;
pub use well_known::{WellKnownSymbol, WellKnownSymbols};
