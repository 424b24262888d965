//! Property-key adaptation and key enumeration.
//!
//! A plain symbol and its wrapper both adapt to the same [`PropertyKey::Symbol`],
//! so they index one storage slot. The enumeration surfaces below are the only
//! way reflection builtins list keys; each one filters by key kind, and hidden
//! keys never survive any of them.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::coercion::PreferredType;
use crate::context::NativeContext;
use crate::error::VmResult;
use crate::number;
use crate::object::{JsObject, PropertyKey};
use crate::string::JsString;
use crate::symbol::Symbol;
use crate::value::Value;

/// Kind of a script-visible key, as the serializer sees it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// String or array index
    String,
    /// Symbol
    Symbol,
}

/// ToPropertyKey
pub fn to_property_key(ncx: &mut NativeContext<'_>, value: &Value) -> VmResult<PropertyKey> {
    match value {
        Value::Symbol(sym) => Ok(PropertyKey::Symbol(sym.clone())),
        Value::String(s) => Ok(PropertyKey::from_js_string(s.clone())),
        Value::Number(n) => Ok(number_key(*n)),
        Value::Object(obj) => {
            if let Some(sym) = obj.symbol_data() {
                return Ok(PropertyKey::Symbol(sym.clone()));
            }
            let prim = ncx.to_primitive(value, PreferredType::String)?;
            to_property_key(ncx, &prim)
        }
        _ => Ok(PropertyKey::from_js_string(ncx.to_string_value(value)?)),
    }
}

fn number_key(n: f64) -> PropertyKey {
    if n >= 0.0 && n < u32::MAX as f64 && n.fract() == 0.0 {
        PropertyKey::Index(n as u32)
    } else {
        PropertyKey::from_js_string(JsString::new_arc(number::to_js_string(n)))
    }
}

/// Key kind for serialization; `None` for engine-internal keys
pub fn key_kind_of(key: &PropertyKey) -> Option<KeyKind> {
    match key {
        PropertyKey::String(_) | PropertyKey::Index(_) => Some(KeyKind::String),
        PropertyKey::Symbol(_) => Some(KeyKind::Symbol),
        PropertyKey::Hidden(_) => None,
    }
}

/// Whether `JSON.stringify` produces output for `value` at all.
///
/// False for plain symbols, `undefined` and functions.
pub fn is_serializable(value: &Value) -> bool {
    !(value.is_symbol() || value.is_undefined() || value.is_callable())
}

/// The plain symbol inside a Symbol wrapper, or `value` unchanged
pub fn unwrap_if_wrapped(value: &Value) -> Value {
    match value.as_object().and_then(|obj| obj.symbol_data()) {
        Some(sym) => Value::symbol(sym.clone()),
        None => value.clone(),
    }
}

/// Own enumerable string keys, in property order (`Object.keys`)
pub fn own_enumerable_string_keys(obj: &JsObject) -> Vec<PropertyKey> {
    obj.own_keys()
        .into_iter()
        .filter(|key| key.is_string_like())
        .filter(|key| obj.get_own_property(key).is_some_and(|d| d.enumerable()))
        .collect()
}

/// Own string keys, enumerable or not (`Object.getOwnPropertyNames`)
pub fn own_string_keys(obj: &JsObject) -> Vec<PropertyKey> {
    obj.own_keys()
        .into_iter()
        .filter(|key| key.is_string_like())
        .collect()
}

/// Own symbol keys, enumerable or not, in creation order
/// (`Object.getOwnPropertySymbols`). Hidden keys are a different variant and
/// cannot appear.
pub fn own_symbol_keys(obj: &JsObject) -> Vec<Symbol> {
    obj.own_keys()
        .into_iter()
        .filter_map(|key| match key {
            PropertyKey::Symbol(sym) => Some(sym),
            _ => None,
        })
        .collect()
}

/// Keys visited by `for-in`: own then inherited enumerable string keys.
/// A key shadowed lower in the chain is reported once, and not at all when
/// the shadowing property is non-enumerable.
pub fn for_in_keys(obj: &Arc<JsObject>) -> Vec<Arc<JsString>> {
    let mut seen: FxHashSet<PropertyKey> = FxHashSet::default();
    let mut keys = Vec::new();
    let mut current = Some(obj.clone());
    while let Some(o) = current {
        for key in o.own_keys() {
            if !key.is_string_like() || !seen.insert(key.clone()) {
                continue;
            }
            let enumerable = o.get_own_property(&key).is_some_and(|d| d.enumerable());
            if let (true, Some(name)) = (enumerable, key.to_js_string()) {
                keys.push(name);
            }
        }
        current = o.prototype();
    }
    keys
}
