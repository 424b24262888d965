//! JavaScript objects
//!
//! Property storage is a single insertion-ordered map keyed by [`PropertyKey`].
//! String, symbol and hidden keys share the map but never alias: a symbol key
//! is compared by symbol identity, never by description.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::hidden::HiddenKey;
use crate::string::JsString;
use crate::symbol::Symbol;
use crate::value::{NativeFn, Value};

/// Property key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// String property key
    String(Arc<JsString>),
    /// Canonical array index (`"0"`..`"4294967294"`)
    Index(u32),
    /// Symbol property key, by identity
    Symbol(Symbol),
    /// Engine-internal key, invisible to every reflection surface
    Hidden(HiddenKey),
}

impl PropertyKey {
    /// Create a string property key, canonicalizing array indices
    pub fn string(s: &str) -> Self {
        match canonical_index(s) {
            Some(i) => Self::Index(i),
            None => Self::String(JsString::intern(s)),
        }
    }

    /// Create from a string Arc, canonicalizing array indices
    pub fn from_js_string(s: Arc<JsString>) -> Self {
        match canonical_index(s.as_str()) {
            Some(i) => Self::Index(i),
            None => Self::String(s),
        }
    }

    /// Create an index property key
    pub fn index(i: u32) -> Self {
        Self::Index(i)
    }

    /// Create a symbol property key
    pub fn symbol(sym: Symbol) -> Self {
        Self::Symbol(sym)
    }

    /// Is a symbol key
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Is an engine-internal key
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden(_))
    }

    /// Is a string-shaped key (string or index)
    pub fn is_string_like(&self) -> bool {
        matches!(self, Self::String(_) | Self::Index(_))
    }

    /// Get the symbol of a symbol key
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// String form of a string-shaped key
    pub fn to_js_string(&self) -> Option<Arc<JsString>> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Index(i) => Some(JsString::intern(&i.to_string())),
            Self::Symbol(_) | Self::Hidden(_) => None,
        }
    }

    /// Script-visible value for this key (`None` for hidden keys)
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Symbol(sym) => Some(Value::symbol(sym.clone())),
            Self::Hidden(_) => None,
            _ => self.to_js_string().map(Value::string),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl From<u32> for PropertyKey {
    fn from(i: u32) -> Self {
        Self::Index(i)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(sym: Symbol) -> Self {
        Self::Symbol(sym)
    }
}

impl From<HiddenKey> for PropertyKey {
    fn from(key: HiddenKey) -> Self {
        Self::Hidden(key)
    }
}

fn canonical_index(s: &str) -> Option<u32> {
    if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // 2^32 - 1 is not an array index
    s.parse::<u32>().ok().filter(|i| *i != u32::MAX)
}

/// Property attributes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropertyAttributes {
    /// Property is writable
    pub writable: bool,
    /// Property is enumerable
    pub enumerable: bool,
    /// Property is configurable
    pub configurable: bool,
}

impl PropertyAttributes {
    /// Default data property attributes
    pub const fn data() -> Self {
        Self {
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Non-writable, non-enumerable, non-configurable
    pub const fn frozen() -> Self {
        Self {
            writable: false,
            enumerable: false,
            configurable: false,
        }
    }

    /// Builtin methods: `{ writable: true, enumerable: false, configurable: true }`
    pub const fn builtin_method() -> Self {
        Self {
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }

    /// Function `length`/`name`: `{ writable: false, enumerable: false, configurable: true }`
    pub const fn function_length() -> Self {
        Self {
            writable: false,
            enumerable: false,
            configurable: true,
        }
    }

    /// `prototype.constructor` link
    pub const fn constructor_link() -> Self {
        Self::builtin_method()
    }

    /// Array `length`
    pub const fn array_length() -> Self {
        Self {
            writable: true,
            enumerable: false,
            configurable: false,
        }
    }
}

/// Property descriptor
#[derive(Clone, Debug)]
pub enum PropertyDescriptor {
    /// Data property
    Data {
        /// The value
        value: Value,
        /// Attributes
        attributes: PropertyAttributes,
    },
    /// Accessor property
    Accessor {
        /// Getter function
        get: Option<Value>,
        /// Setter function
        set: Option<Value>,
        /// Attributes (`writable` is ignored)
        attributes: PropertyAttributes,
    },
}

impl PropertyDescriptor {
    /// Create a data property
    pub fn data(value: Value) -> Self {
        Self::Data {
            value,
            attributes: PropertyAttributes::data(),
        }
    }

    /// Create a data property with specific attributes
    pub fn data_with_attrs(value: Value, attributes: PropertyAttributes) -> Self {
        Self::Data { value, attributes }
    }

    /// Builtin method property (non-enumerable)
    pub fn builtin_method(value: Value) -> Self {
        Self::data_with_attrs(value, PropertyAttributes::builtin_method())
    }

    /// Function `length`/`name` property
    pub fn function_length(value: Value) -> Self {
        Self::data_with_attrs(value, PropertyAttributes::function_length())
    }

    /// Get the value (for data properties)
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Data { value, .. } => Some(value),
            Self::Accessor { .. } => None,
        }
    }

    /// Attributes of either kind
    pub fn attributes(&self) -> PropertyAttributes {
        match self {
            Self::Data { attributes, .. } | Self::Accessor { attributes, .. } => *attributes,
        }
    }

    /// Is a writable data property
    pub fn is_writable(&self) -> bool {
        match self {
            Self::Data { attributes, .. } => attributes.writable,
            Self::Accessor { .. } => false,
        }
    }

    /// Enumerable flag
    pub fn enumerable(&self) -> bool {
        self.attributes().enumerable
    }

    /// Configurable flag
    pub fn configurable(&self) -> bool {
        self.attributes().configurable
    }
}

/// Internal object class and its internal slot
#[derive(Clone)]
pub enum ObjectKind {
    /// Ordinary object
    Ordinary,
    /// Array exotic object
    Array,
    /// Native function
    Function(NativeFn),
    /// Symbol wrapper: `[[SymbolData]]`
    Symbol(Symbol),
    /// Boolean wrapper: `[[BooleanData]]`
    Boolean(bool),
    /// Number wrapper: `[[NumberData]]`
    Number(f64),
    /// String wrapper: `[[StringData]]`
    String(Arc<JsString>),
}

impl std::fmt::Debug for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ordinary => write!(f, "Ordinary"),
            Self::Array => write!(f, "Array"),
            Self::Function(_) => write!(f, "Function"),
            Self::Symbol(sym) => write!(f, "Symbol({:?})", sym),
            Self::Boolean(b) => write!(f, "Boolean({})", b),
            Self::Number(n) => write!(f, "Number({})", n),
            Self::String(s) => write!(f, "String({:?})", s),
        }
    }
}

type PropertyMap = IndexMap<PropertyKey, PropertyDescriptor, FxBuildHasher>;

/// A JavaScript object
///
/// Thread-safe with interior mutability.
pub struct JsObject {
    /// Class and internal slot, fixed at creation
    kind: ObjectKind,
    /// Properties storage, in insertion order
    properties: RwLock<PropertyMap>,
    /// Prototype (None for Object.prototype)
    prototype: RwLock<Option<Arc<JsObject>>>,
}

impl JsObject {
    /// Create a new ordinary object
    pub fn new(prototype: Option<Arc<JsObject>>) -> Self {
        Self::with_kind(ObjectKind::Ordinary, prototype)
    }

    /// Create an object of a specific class
    pub fn with_kind(kind: ObjectKind, prototype: Option<Arc<JsObject>>) -> Self {
        Self {
            kind,
            properties: RwLock::new(PropertyMap::default()),
            prototype: RwLock::new(prototype),
        }
    }

    /// Create an array holding `values`
    pub fn array(values: Vec<Value>, prototype: Option<Arc<JsObject>>) -> Self {
        let obj = Self::with_kind(ObjectKind::Array, prototype);
        {
            let mut props = obj.properties.write();
            props.insert(
                PropertyKey::string("length"),
                PropertyDescriptor::data_with_attrs(
                    Value::number(values.len() as f64),
                    PropertyAttributes::array_length(),
                ),
            );
            for (i, value) in values.into_iter().enumerate() {
                props.insert(PropertyKey::Index(i as u32), PropertyDescriptor::data(value));
            }
        }
        obj
    }

    /// Class and internal slot
    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Is this an array
    pub fn is_array(&self) -> bool {
        matches!(self.kind, ObjectKind::Array)
    }

    /// Is this a function
    pub fn is_callable(&self) -> bool {
        matches!(self.kind, ObjectKind::Function(_))
    }

    /// The native function body, if callable
    pub fn native_fn(&self) -> Option<NativeFn> {
        match &self.kind {
            ObjectKind::Function(f) => Some(f.clone()),
            _ => None,
        }
    }

    /// `[[SymbolData]]` of a Symbol wrapper
    pub fn symbol_data(&self) -> Option<&Symbol> {
        match &self.kind {
            ObjectKind::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// Own property descriptor
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        self.properties.read().get(key).cloned()
    }

    /// Property descriptor, walking the prototype chain
    pub fn lookup(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        if let Some(desc) = self.get_own_property(key) {
            return Some(desc);
        }
        let mut current = self.prototype();
        while let Some(obj) = current {
            if let Some(desc) = obj.get_own_property(key) {
                return Some(desc);
            }
            current = obj.prototype();
        }
        None
    }

    /// Get a data property value by key (accessors yield `None`)
    pub fn get(&self, key: &PropertyKey) -> Option<Value> {
        self.lookup(key).and_then(|desc| desc.value().cloned())
    }

    /// Ordinary data write.
    ///
    /// Returns false when an own or inherited non-writable data property, or
    /// an accessor, blocks the write. Accessor setters are invoked by the
    /// context, not here.
    pub fn set(&self, key: PropertyKey, value: Value) -> bool {
        {
            let mut props = self.properties.write();
            if let Some(desc) = props.get_mut(&key) {
                return match desc {
                    PropertyDescriptor::Data { value: slot, attributes } if attributes.writable => {
                        *slot = value;
                        true
                    }
                    _ => false,
                };
            }
        }

        if let Some(inherited) = self.prototype().and_then(|p| p.lookup(&key)) {
            if !inherited.is_writable() {
                return false;
            }
        }

        let index = match &key {
            PropertyKey::Index(i) => Some(*i),
            _ => None,
        };
        self.properties
            .write()
            .insert(key, PropertyDescriptor::data(value));
        if let Some(i) = index {
            self.grow_array_length(i);
        }
        true
    }

    /// Define a property with descriptor, replacing any existing one in place
    pub fn define_property(&self, key: PropertyKey, desc: PropertyDescriptor) -> bool {
        let index = match &key {
            PropertyKey::Index(i) => Some(*i),
            _ => None,
        };
        {
            let mut props = self.properties.write();
            if let Some(existing) = props.get(&key) {
                if !existing.configurable() {
                    return false;
                }
            }
            props.insert(key, desc);
        }
        if let Some(i) = index {
            self.grow_array_length(i);
        }
        true
    }

    fn grow_array_length(&self, index: u32) {
        if !self.is_array() {
            return;
        }
        let mut props = self.properties.write();
        if let Some(PropertyDescriptor::Data { value, .. }) =
            props.get_mut(&PropertyKey::string("length"))
        {
            let len = value.as_number().unwrap_or(0.0);
            if (index as f64) >= len {
                *value = Value::number(index as f64 + 1.0);
            }
        }
    }

    /// Delete own property
    pub fn delete(&self, key: &PropertyKey) -> bool {
        let mut props = self.properties.write();
        match props.get(key) {
            Some(desc) if !desc.configurable() => false,
            Some(_) => {
                props.shift_remove(key);
                true
            }
            None => true,
        }
    }

    /// Check if object has own property
    pub fn has_own(&self, key: &PropertyKey) -> bool {
        self.properties.read().contains_key(key)
    }

    /// Check if object has property (including prototype chain)
    pub fn has(&self, key: &PropertyKey) -> bool {
        self.lookup(key).is_some()
    }

    /// Own property keys in ordinary `[[OwnPropertyKeys]]` order: indices
    /// ascending, then strings and symbols each in insertion order. Hidden
    /// keys come last; callers filter them.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let props = self.properties.read();
        let mut indices: Vec<u32> = props
            .keys()
            .filter_map(|k| match k {
                PropertyKey::Index(i) => Some(*i),
                _ => None,
            })
            .collect();
        indices.sort_unstable();

        let mut keys: Vec<PropertyKey> = indices.into_iter().map(PropertyKey::Index).collect();
        keys.extend(
            props
                .keys()
                .filter(|k| matches!(k, PropertyKey::String(_)))
                .cloned(),
        );
        keys.extend(props.keys().filter(|k| k.is_symbol()).cloned());
        keys.extend(props.keys().filter(|k| k.is_hidden()).cloned());
        keys
    }

    /// Get prototype
    pub fn prototype(&self) -> Option<Arc<JsObject>> {
        self.prototype.read().clone()
    }

    /// Set prototype. Fails if it would create a cycle.
    pub fn set_prototype(&self, prototype: Option<Arc<JsObject>>) -> bool {
        let mut current = prototype.clone();
        while let Some(obj) = current {
            if std::ptr::eq(Arc::as_ptr(&obj), self) {
                return false;
            }
            current = obj.prototype();
        }
        *self.prototype.write() = prototype;
        true
    }

    /// Array `length` (0 for non-arrays)
    pub fn array_length(&self) -> u32 {
        self.get_own_property(&PropertyKey::string("length"))
            .and_then(|desc| desc.value().and_then(Value::as_number))
            .map(|n| n as u32)
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for JsObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let props = self.properties.read();
        f.debug_struct("JsObject")
            .field("kind", &self.kind)
            .field("properties", &props.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hidden::HiddenKey;

    #[test]
    fn test_object_get_set() {
        let obj = JsObject::new(None);
        obj.set(PropertyKey::string("foo"), Value::number(42.0));
        assert_eq!(
            obj.get(&PropertyKey::string("foo")).and_then(|v| v.as_number()),
            Some(42.0)
        );
    }

    #[test]
    fn test_numeric_strings_are_indices() {
        assert_eq!(PropertyKey::string("7"), PropertyKey::Index(7));
        assert!(matches!(PropertyKey::string("07"), PropertyKey::String(_)));
        assert!(matches!(PropertyKey::string("4294967295"), PropertyKey::String(_)));
    }

    #[test]
    fn test_symbol_and_string_slots_do_not_alias() {
        let obj = JsObject::new(None);
        let sym = Symbol::new(Some(JsString::intern("foo")));
        obj.set(PropertyKey::string("foo"), Value::from("string"));
        obj.set(PropertyKey::symbol(sym.clone()), Value::from("symbol"));
        obj.set(PropertyKey::string("Symbol(foo)"), Value::from("text"));

        let by_sym = obj.get(&PropertyKey::symbol(sym)).unwrap();
        assert_eq!(by_sym.as_string().unwrap().as_str(), "symbol");
        assert_eq!(obj.own_keys().len(), 3);
    }

    #[test]
    fn test_own_keys_order() {
        let obj = JsObject::new(None);
        let sym = Symbol::new(None);
        let hidden = HiddenKey::new("Bookkeeping");
        obj.set(PropertyKey::Hidden(hidden), Value::null());
        obj.set(PropertyKey::symbol(sym.clone()), Value::null());
        obj.set(PropertyKey::string("b"), Value::null());
        obj.set(PropertyKey::Index(2), Value::null());
        obj.set(PropertyKey::string("a"), Value::null());
        obj.set(PropertyKey::Index(1), Value::null());

        assert_eq!(
            obj.own_keys(),
            vec![
                PropertyKey::Index(1),
                PropertyKey::Index(2),
                PropertyKey::string("b"),
                PropertyKey::string("a"),
                PropertyKey::Symbol(sym),
                PropertyKey::Hidden(hidden),
            ]
        );
    }

    #[test]
    fn test_prototype_chain_lookup() {
        let proto = Arc::new(JsObject::new(None));
        let sym = Symbol::new(None);
        proto.set(PropertyKey::symbol(sym.clone()), Value::number(1.0));
        let child = JsObject::new(Some(proto));
        assert!(child.has(&PropertyKey::symbol(sym.clone())));
        assert!(!child.has_own(&PropertyKey::symbol(sym)));
    }

    #[test]
    fn test_non_writable_inherited_blocks_set() {
        let proto = Arc::new(JsObject::new(None));
        proto.define_property(
            PropertyKey::string("x"),
            PropertyDescriptor::data_with_attrs(Value::number(1.0), PropertyAttributes::frozen()),
        );
        let child = JsObject::new(Some(proto));
        assert!(!child.set(PropertyKey::string("x"), Value::number(2.0)));
        assert!(!child.has_own(&PropertyKey::string("x")));
    }

    #[test]
    fn test_delete_keeps_order_of_rest() {
        let obj = JsObject::new(None);
        obj.set(PropertyKey::string("a"), Value::null());
        obj.set(PropertyKey::string("b"), Value::null());
        obj.set(PropertyKey::string("c"), Value::null());
        assert!(obj.delete(&PropertyKey::string("b")));
        assert_eq!(
            obj.own_keys(),
            vec![PropertyKey::string("a"), PropertyKey::string("c")]
        );
    }

    #[test]
    fn test_array_length_tracks_indices() {
        let arr = JsObject::array(vec![Value::number(1.0)], None);
        assert!(arr.is_array());
        assert_eq!(arr.array_length(), 1);
        arr.set(PropertyKey::Index(4), Value::null());
        assert_eq!(arr.array_length(), 5);
    }

    #[test]
    fn test_prototype_cycle_rejected() {
        let a = Arc::new(JsObject::new(None));
        let b = Arc::new(JsObject::new(Some(a.clone())));
        assert!(!a.set_prototype(Some(b)));
    }

    #[test]
    fn test_object_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsObject>();
    }
}
