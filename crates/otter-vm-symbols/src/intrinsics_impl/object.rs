//! Object constructor statics and `Object.prototype` methods.
//!
//! The reflection statics are thin shells over the enumeration surfaces in
//! [`crate::property_key`]; none of them can observe a hidden key.

use std::sync::Arc;

use crate::builtin_builder::BuiltInBuilder;
use crate::context::{NativeContext, key_display};
use crate::error::{VmError, VmResult};
use crate::intrinsics::Intrinsics;
use crate::object::{JsObject, ObjectKind, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::property_key;
use crate::string::JsString;
use crate::value::Value;
use crate::well_known::to_string_tag_symbol;

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

fn keys_to_array(ncx: &NativeContext<'_>, keys: Vec<PropertyKey>) -> Value {
    let values = keys.iter().filter_map(PropertyKey::to_value).collect();
    Value::object(ncx.realm().new_array(values))
}

/// `Object(value)`
fn object_constructor(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let value = arg(args, 0);
    if value.is_nullish() {
        return Ok(Value::object(ncx.realm().new_object()));
    }
    ncx.to_object(&value).map(Value::object)
}

fn object_keys(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let obj = ncx.to_object(&arg(args, 0))?;
    Ok(keys_to_array(ncx, property_key::own_enumerable_string_keys(&obj)))
}

fn object_get_own_property_names(
    _this: &Value,
    args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let obj = ncx.to_object(&arg(args, 0))?;
    Ok(keys_to_array(ncx, property_key::own_string_keys(&obj)))
}

fn object_get_own_property_symbols(
    _this: &Value,
    args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let obj = ncx.to_object(&arg(args, 0))?;
    let symbols = property_key::own_symbol_keys(&obj)
        .into_iter()
        .map(Value::symbol)
        .collect();
    Ok(Value::object(ncx.realm().new_array(symbols)))
}

/// ToPropertyDescriptor, merged over the existing own property (if any).
fn to_property_descriptor(
    ncx: &mut NativeContext<'_>,
    desc: &Value,
    existing: Option<PropertyDescriptor>,
) -> VmResult<PropertyDescriptor> {
    if !desc.is_object() {
        return Err(VmError::type_error("Property description must be an object"));
    }
    let field = |ncx: &mut NativeContext<'_>, name: &str| -> VmResult<Option<Value>> {
        let key = PropertyKey::string(name);
        match desc.as_object() {
            Some(obj) if obj.has(&key) => ncx.get(desc, &key).map(Some),
            _ => Ok(None),
        }
    };

    let base = existing.as_ref().map(|d| d.attributes()).unwrap_or_default();
    let enumerable = field(ncx, "enumerable")?.map_or(base.enumerable, |v| v.to_boolean());
    let configurable = field(ncx, "configurable")?.map_or(base.configurable, |v| v.to_boolean());
    let getter = field(ncx, "get")?;
    let setter = field(ncx, "set")?;

    if getter.is_some() || setter.is_some() {
        for accessor in [&getter, &setter].into_iter().flatten() {
            if !accessor.is_undefined() && !accessor.is_callable() {
                return Err(VmError::type_error("Getter/setter must be a function"));
            }
        }
        let (old_get, old_set) = match &existing {
            Some(PropertyDescriptor::Accessor { get, set, .. }) => (get.clone(), set.clone()),
            _ => (None, None),
        };
        let normalize = |v: Value| (!v.is_undefined()).then_some(v);
        return Ok(PropertyDescriptor::Accessor {
            get: getter.map_or(old_get, normalize),
            set: setter.map_or(old_set, normalize),
            attributes: PropertyAttributes {
                writable: false,
                enumerable,
                configurable,
            },
        });
    }

    let (old_value, old_writable) = match &existing {
        Some(PropertyDescriptor::Data { value, attributes }) => (value.clone(), attributes.writable),
        _ => (Value::undefined(), false),
    };
    let value = field(ncx, "value")?.unwrap_or(old_value);
    let writable = field(ncx, "writable")?.map_or(old_writable, |v| v.to_boolean());
    Ok(PropertyDescriptor::data_with_attrs(
        value,
        PropertyAttributes {
            writable,
            enumerable,
            configurable,
        },
    ))
}

fn define_from_value(
    ncx: &mut NativeContext<'_>,
    obj: &Arc<JsObject>,
    key: PropertyKey,
    desc: &Value,
) -> VmResult<()> {
    let existing = obj.get_own_property(&key);
    let desc = to_property_descriptor(ncx, desc, existing)?;
    if !obj.define_property(key.clone(), desc) {
        return Err(VmError::type_error(format!(
            "Cannot redefine property: {}",
            key_display(&key)
        )));
    }
    Ok(())
}

fn object_define_property(
    _this: &Value,
    args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let target = arg(args, 0);
    let Some(obj) = target.as_object().cloned() else {
        return Err(VmError::type_error("Object.defineProperty called on non-object"));
    };
    let key = ncx.to_property_key(&arg(args, 1))?;
    define_from_value(ncx, &obj, key, &arg(args, 2))?;
    Ok(target)
}

fn object_get_own_property_descriptor(
    _this: &Value,
    args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let obj = ncx.to_object(&arg(args, 0))?;
    let key = ncx.to_property_key(&arg(args, 1))?;
    let Some(desc) = obj.get_own_property(&key) else {
        return Ok(Value::undefined());
    };

    let result = ncx.realm().new_object();
    let attrs = desc.attributes();
    match desc {
        PropertyDescriptor::Data { value, attributes } => {
            result.set(PropertyKey::string("value"), value);
            result.set(PropertyKey::string("writable"), Value::boolean(attributes.writable));
        }
        PropertyDescriptor::Accessor { get, set, .. } => {
            result.set(PropertyKey::string("get"), get.unwrap_or_default());
            result.set(PropertyKey::string("set"), set.unwrap_or_default());
        }
    }
    result.set(PropertyKey::string("enumerable"), Value::boolean(attrs.enumerable));
    result.set(PropertyKey::string("configurable"), Value::boolean(attrs.configurable));
    Ok(Value::object(result))
}

fn object_get_prototype_of(
    _this: &Value,
    args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let obj = ncx.to_object(&arg(args, 0))?;
    Ok(obj.prototype().map(Value::object).unwrap_or_else(Value::null))
}

fn prototype_argument(value: &Value, caller: &str) -> VmResult<Option<Arc<JsObject>>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(obj) => Ok(Some(obj.clone())),
        _ => Err(VmError::type_error(format!(
            "{caller}: Object prototype may only be an Object or null"
        ))),
    }
}

fn object_set_prototype_of(
    _this: &Value,
    args: &[Value],
    _ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let target = arg(args, 0);
    if target.is_nullish() {
        return Err(VmError::type_error(
            "Object.setPrototypeOf called on null or undefined",
        ));
    }
    let proto = prototype_argument(&arg(args, 1), "Object.setPrototypeOf")?;
    if let Some(obj) = target.as_object() {
        if !obj.set_prototype(proto) {
            return Err(VmError::type_error("Cyclic __proto__ value"));
        }
    }
    Ok(target)
}

fn object_create(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let proto = prototype_argument(&arg(args, 0), "Object.create")?;
    let obj = Arc::new(JsObject::new(proto));

    let props = arg(args, 1);
    if !props.is_undefined() {
        let props_obj = ncx.to_object(&props)?;
        for key in props_obj.own_keys() {
            if key.is_hidden() || !props_obj.get_own_property(&key).is_some_and(|d| d.enumerable()) {
                continue;
            }
            let desc = ncx.get(&props, &key)?;
            define_from_value(ncx, &obj, key, &desc)?;
        }
    }
    Ok(Value::object(obj))
}

/// `Object.prototype.toString`
fn object_proto_to_string(
    this_val: &Value,
    _args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    match this_val {
        Value::Undefined => return Ok(Value::string(JsString::intern("[object Undefined]"))),
        Value::Null => return Ok(Value::string(JsString::intern("[object Null]"))),
        _ => {}
    }
    let obj = ncx.to_object(this_val)?;
    let builtin_tag = match obj.kind() {
        ObjectKind::Array => "Array",
        ObjectKind::Function(_) => "Function",
        ObjectKind::Boolean(_) => "Boolean",
        ObjectKind::Number(_) => "Number",
        ObjectKind::String(_) => "String",
        ObjectKind::Ordinary | ObjectKind::Symbol(_) => "Object",
    };
    let tag = ncx.get(&Value::object(obj), &PropertyKey::Symbol(to_string_tag_symbol()))?;
    let tag = match tag.as_string() {
        Some(s) => s.as_str().to_string(),
        None => builtin_tag.to_string(),
    };
    Ok(Value::string(JsString::new_arc(format!("[object {tag}]"))))
}

fn object_proto_has_own_property(
    this_val: &Value,
    args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let key = ncx.to_property_key(&arg(args, 0))?;
    let obj = ncx.to_object(this_val)?;
    Ok(Value::boolean(obj.has_own(&key)))
}

fn object_proto_value_of(
    this_val: &Value,
    _args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    ncx.to_object(this_val).map(Value::object)
}

/// Build the `Object` constructor over `Object.prototype` and install it on the global.
pub fn install_object_constructor(intrinsics: &Intrinsics, global: &Arc<JsObject>) {
    let ctor = BuiltInBuilder::new(
        intrinsics.function_prototype.clone(),
        intrinsics.object_prototype.clone(),
        "Object",
    )
    .constructor_fn(object_constructor, 1)
    .static_method("keys", object_keys, 1)
    .static_method("getOwnPropertyNames", object_get_own_property_names, 1)
    .static_method("getOwnPropertySymbols", object_get_own_property_symbols, 1)
    .static_method("defineProperty", object_define_property, 3)
    .static_method("getOwnPropertyDescriptor", object_get_own_property_descriptor, 2)
    .static_method("getPrototypeOf", object_get_prototype_of, 1)
    .static_method("setPrototypeOf", object_set_prototype_of, 2)
    .static_method("create", object_create, 2)
    .method("toString", object_proto_to_string, 0)
    .method("hasOwnProperty", object_proto_has_own_property, 1)
    .method("valueOf", object_proto_value_of, 0)
    .build();

    global.define_property(
        PropertyKey::string("Object"),
        PropertyDescriptor::builtin_method(ctor),
    );
}
