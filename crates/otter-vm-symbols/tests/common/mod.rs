//! Shared helpers for the integration tests.
//!
//! Each helper mirrors one script-level operation (`Symbol(desc)`,
//! `Object(v)`, `String(v)`, `obj[key]`, `JSON.stringify(...)`) so the tests
//! read close to the behavior they check.

#![allow(dead_code)]

use std::sync::Arc;

use otter_vm_symbols::object::ObjectKind;
use otter_vm_symbols::{JsObject, JsString, PropertyKey, Realm, Value, VmResult};
use tracing_subscriber::filter::EnvFilter;

/// Install a test-writer subscriber once; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A realm plus helpers for driving its builtins
pub struct Harness {
    pub realm: Realm,
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();
        Self {
            realm: Realm::new(),
        }
    }

    pub fn with_realm(realm: Realm) -> Self {
        init_tracing();
        Self { realm }
    }

    /// `globalThis[name]`
    pub fn global(&self, name: &str) -> Value {
        self.realm.global_value(name)
    }

    /// `name(...args)`
    pub fn call_global(&self, name: &str, args: &[Value]) -> VmResult<Value> {
        self.realm.call(&self.global(name), Value::undefined(), args)
    }

    /// `new name(...args)`
    pub fn construct_global(&self, name: &str, args: &[Value]) -> VmResult<Value> {
        self.realm.construct(&self.global(name), args)
    }

    /// `target[name](...args)`
    pub fn call_method(&self, target: &Value, name: &str, args: &[Value]) -> VmResult<Value> {
        let mut ncx = self.realm.context();
        let method = ncx.get(target, &PropertyKey::string(name))?;
        ncx.call_function(&method, target.clone(), args)
    }

    /// `Ctor.name(...args)`
    pub fn call_static(&self, ctor: &str, name: &str, args: &[Value]) -> VmResult<Value> {
        self.call_method(&self.global(ctor), name, args)
    }

    /// `Ctor.prototype.name.call(this, ...args)`
    pub fn call_proto(&self, ctor: &str, name: &str, this: Value, args: &[Value]) -> VmResult<Value> {
        let proto = self.get(&self.global(ctor), "prototype")?;
        let method = self.get(&proto, name)?;
        self.realm.call(&method, this, args)
    }

    /// `target[name]`
    pub fn get(&self, target: &Value, name: &str) -> VmResult<Value> {
        self.realm.context().get(target, &PropertyKey::string(name))
    }

    /// `target[key]` with an arbitrary key value
    pub fn get_by(&self, target: &Value, key: &Value) -> VmResult<Value> {
        let mut ncx = self.realm.context();
        let key = ncx.to_property_key(key)?;
        ncx.get(target, &key)
    }

    /// `target[key] = value` with an arbitrary key value
    pub fn set_by(&self, target: &Value, key: &Value, value: Value) -> VmResult<()> {
        let mut ncx = self.realm.context();
        let key = ncx.to_property_key(key)?;
        ncx.set(target, key, value)?;
        Ok(())
    }

    /// `Symbol(description)` (no argument for `None`)
    pub fn symbol(&self, description: Option<&str>) -> Value {
        let args: Vec<Value> = description.into_iter().map(Value::from).collect();
        self.call_global("Symbol", &args)
            .expect("Symbol() should not fail for a string description")
    }

    /// `Symbol.for(key)`
    pub fn symbol_for(&self, key: &str) -> Value {
        self.call_static("Symbol", "for", &[Value::from(key)])
            .expect("Symbol.for should not fail for a string key")
    }

    /// `Object(value)`
    pub fn object(&self, value: &Value) -> Value {
        self.call_global("Object", std::slice::from_ref(value))
            .expect("Object() should not fail")
    }

    /// `{}`
    pub fn new_object(&self) -> Value {
        Value::object(self.realm.new_object())
    }

    /// `[...values]`
    pub fn array(&self, values: Vec<Value>) -> Value {
        Value::object(self.realm.new_array(values))
    }

    /// `String(value)` as a Rust string
    pub fn string_of(&self, value: &Value) -> VmResult<String> {
        let s = self.call_global("String", std::slice::from_ref(value))?;
        Ok(text(&s))
    }

    /// `JSON.stringify(...args)`; `None` when the result is undefined
    pub fn stringify(&self, args: &[Value]) -> VmResult<Option<String>> {
        let result = self.call_static("JSON", "stringify", args)?;
        Ok(result.as_string().map(|s| s.as_str().to_string()))
    }

    /// Script-visible function wrapping `f`
    pub fn function<F>(&self, name: &str, length: u32, f: F) -> Value
    where
        F: Fn(&Value, &[Value], &mut otter_vm_symbols::NativeContext<'_>) -> VmResult<Value>
            + Send
            + Sync
            + 'static,
    {
        Value::object(self.realm.new_function(name, length, f))
    }

    /// Plain-object descriptor `{ name: value, ... }`
    pub fn descriptor(&self, fields: &[(&str, Value)]) -> Value {
        let obj = self.realm.new_object();
        for (name, value) in fields {
            obj.set(PropertyKey::string(name), value.clone());
        }
        Value::object(obj)
    }

    /// Elements of an array value
    pub fn elements(&self, array: &Value) -> Vec<Value> {
        let obj = array.as_object().expect("expected an array");
        (0..obj.array_length())
            .map(|i| obj.get(&PropertyKey::Index(i)).unwrap_or_default())
            .collect()
    }
}

/// Text of a string value
pub fn text(value: &Value) -> String {
    value
        .as_string()
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|| panic!("expected a string, got {value:?}"))
}

/// String value from a Rust literal
pub fn js(s: &str) -> Value {
    Value::string(JsString::intern(s))
}

/// Whether `value` is a Symbol wrapper object
pub fn is_symbol_object(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj: &Arc<JsObject>| matches!(obj.kind(), ObjectKind::Symbol(_)))
}
