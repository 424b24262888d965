//! Native call context and the coercion engine.
//!
//! `NativeContext` is handed to every native function. It carries the realm,
//! whether the current call is a `[[Construct]]`, and the call depth. All
//! abstract operations that may re-enter script code (Get with accessors,
//! ToPrimitive, ToString, ToNumber) live here and consult
//! [`CoercionGuard`] before running the ordinary algorithm.

use std::sync::Arc;

use crate::coercion::{Coercion, CoercionGuard, PreferredType, Verdict};
use crate::error::{CoercionError, CoercionTarget, VmError, VmResult};
use crate::hidden::{FUNCTION_NAME, NON_CONSTRUCTOR};
use crate::number;
use crate::object::{JsObject, ObjectKind, PropertyDescriptor, PropertyKey};
use crate::property_key;
use crate::realm::Realm;
use crate::string::JsString;
use crate::symbol_registry::SymbolRegistry;
use crate::value::Value;
use crate::well_known::to_primitive_symbol;

/// Context for native function calls
pub struct NativeContext<'a> {
    realm: &'a Realm,
    construct: bool,
    depth: usize,
}

impl<'a> NativeContext<'a> {
    /// Top-level context for `realm`
    pub fn new(realm: &'a Realm) -> Self {
        Self {
            realm,
            construct: false,
            depth: 0,
        }
    }

    /// The realm this call runs in
    pub fn realm(&self) -> &'a Realm {
        self.realm
    }

    /// Symbol registry backing `Symbol.for` in this realm
    pub fn registry(&self) -> &'a SymbolRegistry {
        self.realm.registry()
    }

    /// Whether the current native call is a `[[Construct]]`
    pub fn is_construct(&self) -> bool {
        self.construct
    }

    /// Current native call depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn enter(&self, construct: bool) -> VmResult<NativeContext<'a>> {
        let depth = self.depth + 1;
        if depth > self.realm.config().max_call_depth {
            return Err(VmError::StackOverflow);
        }
        Ok(NativeContext {
            realm: self.realm,
            construct,
            depth,
        })
    }

    /// Call a function value with `this` and `args`
    pub fn call_function(&mut self, func: &Value, this: Value, args: &[Value]) -> VmResult<Value> {
        let Some(native) = func.as_object().and_then(|obj| obj.native_fn()) else {
            return Err(VmError::type_error(format!(
                "{} is not a function",
                callee_name(func)
            )));
        };
        let mut inner = self.enter(false)?;
        native(&this, args, &mut inner)
    }

    /// `new func(...args)`
    pub fn construct(&mut self, func: &Value, args: &[Value]) -> VmResult<Value> {
        let native = func
            .as_object()
            .filter(|obj| !obj.has_own(&PropertyKey::Hidden(NON_CONSTRUCTOR)))
            .and_then(|obj| obj.native_fn());
        let Some(native) = native else {
            return Err(VmError::type_error(format!(
                "{} is not a constructor",
                callee_name(func)
            )));
        };
        let mut inner = self.enter(true)?;
        let result = native(&Value::undefined(), args, &mut inner)?;
        if !result.is_object() {
            return Err(VmError::internal(format!(
                "{} constructor returned a primitive",
                callee_name(func)
            )));
        }
        Ok(result)
    }

    /// GetV: property read on any value. Primitives read through their
    /// prototype; a symbol has no own properties of any kind.
    pub fn get(&mut self, target: &Value, key: &PropertyKey) -> VmResult<Value> {
        let desc = match target {
            Value::Object(obj) => obj.lookup(key),
            Value::Undefined | Value::Null => {
                return Err(VmError::type_error(format!(
                    "Cannot read properties of {:?} (reading '{}')",
                    target,
                    key_display(key)
                )));
            }
            Value::String(s) => {
                if let Some(own) = string_own_property(s, key) {
                    return Ok(own);
                }
                self.realm
                    .intrinsics()
                    .prototype_for_primitive(target)
                    .and_then(|proto| proto.lookup(key))
            }
            _ => self
                .realm
                .intrinsics()
                .prototype_for_primitive(target)
                .and_then(|proto| proto.lookup(key)),
        };

        match desc {
            Some(PropertyDescriptor::Data { value, .. }) => Ok(value),
            Some(PropertyDescriptor::Accessor {
                get: Some(getter), ..
            }) => self.call_function(&getter, target.clone(), &[]),
            Some(PropertyDescriptor::Accessor { get: None, .. }) | None => Ok(Value::undefined()),
        }
    }

    /// `obj[key] = value`. Returns whether the write took effect.
    pub fn set(&mut self, target: &Value, key: PropertyKey, value: Value) -> VmResult<bool> {
        let obj = match target {
            Value::Object(obj) => obj,
            Value::Undefined | Value::Null => {
                return Err(VmError::type_error(format!(
                    "Cannot set properties of {:?} (setting '{}')",
                    target,
                    key_display(&key)
                )));
            }
            // Writes to primitives are silently dropped
            _ => return Ok(false),
        };
        match obj.lookup(&key) {
            Some(PropertyDescriptor::Accessor {
                set: Some(setter), ..
            }) => {
                self.call_function(&setter, target.clone(), &[value])?;
                Ok(true)
            }
            Some(PropertyDescriptor::Accessor { set: None, .. }) => Ok(false),
            _ => Ok(obj.set(key, value)),
        }
    }

    /// GetMethod: `None` for undefined/null, TypeError for non-callables
    pub fn get_method(&mut self, target: &Value, key: &PropertyKey) -> VmResult<Option<Value>> {
        let func = self.get(target, key)?;
        if func.is_nullish() {
            return Ok(None);
        }
        if !func.is_callable() {
            return Err(VmError::type_error(format!(
                "{} is not a function",
                key_display(key)
            )));
        }
        Ok(Some(func))
    }

    /// ToPrimitive
    pub fn to_primitive(&mut self, value: &Value, hint: PreferredType) -> VmResult<Value> {
        match CoercionGuard::check(value, Coercion::ToPrimitive) {
            Some(Verdict::Identity) => return Ok(value.clone()),
            Some(Verdict::Reject(err)) => return Err(err.into()),
            _ => {}
        }
        if !value.is_object() {
            return Ok(value.clone());
        }

        let exotic = self.get_method(value, &PropertyKey::Symbol(to_primitive_symbol()))?;
        if let Some(exotic) = exotic {
            let hint_value = Value::string(JsString::intern(hint.as_str()));
            let result = self.call_function(&exotic, value.clone(), &[hint_value])?;
            if result.is_object() {
                return Err(VmError::type_error("Cannot convert object to primitive value"));
            }
            return Ok(result);
        }

        let hint = match hint {
            PreferredType::Default => PreferredType::Number,
            other => other,
        };
        self.ordinary_to_primitive(value, hint)
    }

    fn ordinary_to_primitive(&mut self, value: &Value, hint: PreferredType) -> VmResult<Value> {
        let order = match hint {
            PreferredType::String => ["toString", "valueOf"],
            _ => ["valueOf", "toString"],
        };
        for name in order {
            let method = self.get(value, &PropertyKey::string(name))?;
            if method.is_callable() {
                let result = self.call_function(&method, value.clone(), &[])?;
                if !result.is_object() {
                    return Ok(result);
                }
            }
        }
        Err(VmError::type_error("Cannot convert object to primitive value"))
    }

    /// ToBoolean
    pub fn to_boolean(&self, value: &Value) -> bool {
        value.to_boolean()
    }

    /// ToNumber
    pub fn to_number(&mut self, value: &Value) -> VmResult<f64> {
        if let Some(Verdict::Reject(err)) = CoercionGuard::check(value, Coercion::ToNumber) {
            return Err(err.into());
        }
        match value {
            Value::Undefined => Ok(f64::NAN),
            Value::Null => Ok(0.0),
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => Ok(*n),
            Value::String(s) => Ok(number::string_to_number(s.as_str())),
            Value::Symbol(_) => Err(CoercionError::plain(CoercionTarget::Number).into()),
            Value::Object(_) => {
                let prim = self.to_primitive(value, PreferredType::Number)?;
                self.to_number(&prim)
                    .map_err(|err| via_wrapper(err, value))
            }
        }
    }

    /// ToIntegerOrInfinity
    pub fn to_integer_or_infinity(&mut self, value: &Value) -> VmResult<f64> {
        let n = self.to_number(value)?;
        if n.is_nan() {
            return Ok(0.0);
        }
        Ok(n.trunc())
    }

    /// Implicit ToString
    pub fn to_string_value(&mut self, value: &Value) -> VmResult<Arc<JsString>> {
        if let Some(Verdict::Reject(err)) = CoercionGuard::check(value, Coercion::ToString) {
            return Err(err.into());
        }
        match value {
            Value::Undefined => Ok(JsString::intern("undefined")),
            Value::Null => Ok(JsString::intern("null")),
            Value::Boolean(b) => Ok(JsString::intern(if *b { "true" } else { "false" })),
            Value::Number(n) => Ok(JsString::new_arc(number::to_js_string(*n))),
            Value::String(s) => Ok(s.clone()),
            Value::Symbol(_) => Err(CoercionError::plain(CoercionTarget::String).into()),
            Value::Object(_) => {
                let prim = self.to_primitive(value, PreferredType::String)?;
                self.to_string_value(&prim)
                    .map_err(|err| via_wrapper(err, value))
            }
        }
    }

    /// Explicit describe-as-text (the `String(value)` path).
    ///
    /// A plain symbol renders from its internal description and never touches
    /// `Symbol.prototype`. Everything else, wrappers included, goes through
    /// ordinary ToString.
    pub fn to_display_string(&mut self, value: &Value) -> VmResult<Arc<JsString>> {
        match CoercionGuard::check(value, Coercion::Describe) {
            Some(Verdict::Describe) => {
                if let Value::Symbol(sym) = value {
                    return Ok(JsString::new_arc(sym.descriptive_string()));
                }
            }
            Some(Verdict::Reject(err)) => return Err(err.into()),
            _ => {}
        }
        self.to_string_value(value)
    }

    /// ToObject
    pub fn to_object(&mut self, value: &Value) -> VmResult<Arc<JsObject>> {
        match (CoercionGuard::check(value, Coercion::ToObject), value) {
            (Some(Verdict::Wrap), Value::Symbol(sym)) => {
                return Ok(self.realm.new_wrapper(ObjectKind::Symbol(sym.clone())));
            }
            (Some(Verdict::Identity), Value::Object(obj)) => return Ok(obj.clone()),
            (Some(Verdict::Reject(err)), _) => return Err(err.into()),
            _ => {}
        }
        let kind = match value {
            Value::Undefined | Value::Null => {
                return Err(VmError::type_error(
                    "Cannot convert undefined or null to object",
                ));
            }
            Value::Object(obj) => return Ok(obj.clone()),
            Value::Symbol(sym) => ObjectKind::Symbol(sym.clone()),
            Value::Boolean(b) => ObjectKind::Boolean(*b),
            Value::Number(n) => ObjectKind::Number(*n),
            Value::String(s) => ObjectKind::String(s.clone()),
        };
        Ok(self.realm.new_wrapper(kind))
    }

    /// ToPropertyKey
    pub fn to_property_key(&mut self, value: &Value) -> VmResult<PropertyKey> {
        property_key::to_property_key(self, value)
    }
}

/// Tag a coercion failure that was reached by unwrapping a Symbol object.
fn via_wrapper(err: VmError, original: &Value) -> VmError {
    match err {
        VmError::Coercion(mut inner) if original.is_symbol_wrapper() => {
            inner.via_wrapper = true;
            VmError::Coercion(inner)
        }
        other => other,
    }
}

fn string_own_property(s: &JsString, key: &PropertyKey) -> Option<Value> {
    match key {
        PropertyKey::String(name) if name.as_str() == "length" => {
            Some(Value::number(s.utf16_len() as f64))
        }
        PropertyKey::Index(i) => s
            .as_str()
            .encode_utf16()
            .nth(*i as usize)
            .map(|unit| Value::string(JsString::new_arc(String::from_utf16_lossy(&[unit])))),
        _ => None,
    }
}

/// Human-readable key for error messages
pub(crate) fn key_display(key: &PropertyKey) -> String {
    match key {
        PropertyKey::String(s) => s.as_str().to_string(),
        PropertyKey::Index(i) => i.to_string(),
        PropertyKey::Symbol(sym) => sym.descriptive_string(),
        PropertyKey::Hidden(hidden) => hidden.name().to_string(),
    }
}

/// Name of a callee for error messages, without running script code
pub(crate) fn callee_name(value: &Value) -> String {
    match value {
        Value::Object(obj) => match obj.get_own_property(&PropertyKey::Hidden(FUNCTION_NAME)) {
            Some(desc) => desc
                .value()
                .and_then(|v| v.as_string().map(|s| s.as_str().to_string()))
                .unwrap_or_else(|| "function".to_string()),
            None => "object".to_string(),
        },
        Value::Symbol(sym) => sym.descriptive_string(),
        Value::String(s) => format!("\"{}\"", s.as_str()),
        other => format!("{:?}", other),
    }
}
