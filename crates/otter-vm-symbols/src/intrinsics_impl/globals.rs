//! Primitive wrapper constructors and the global parsing functions.
//!
//! `String(value)` is the explicit describe-as-text path: it renders a plain
//! symbol from its description. `parseFloat` and `parseInt` use implicit
//! ToString and therefore reject symbols.

use std::sync::Arc;

use crate::builtin_builder::{BuiltInBuilder, make_native_fn};
use crate::context::NativeContext;
use crate::error::{VmError, VmResult};
use crate::intrinsics::Intrinsics;
use crate::number;
use crate::object::{JsObject, ObjectKind, PropertyDescriptor, PropertyKey};
use crate::string::JsString;
use crate::value::{NativeFn, Value};

fn this_string_value(this_val: &Value, method: &str) -> VmResult<Arc<JsString>> {
    match this_val {
        Value::String(s) => Ok(s.clone()),
        Value::Object(obj) => match obj.kind() {
            ObjectKind::String(s) => Ok(s.clone()),
            _ => Err(VmError::type_error(format!(
                "String.prototype.{method} requires that 'this' be a String"
            ))),
        },
        _ => Err(VmError::type_error(format!(
            "String.prototype.{method} requires that 'this' be a String"
        ))),
    }
}

fn this_number_value(this_val: &Value, method: &str) -> VmResult<f64> {
    match this_val {
        Value::Number(n) => Ok(*n),
        Value::Object(obj) => match obj.kind() {
            ObjectKind::Number(n) => Ok(*n),
            _ => Err(VmError::type_error(format!(
                "Number.prototype.{method} requires that 'this' be a Number"
            ))),
        },
        _ => Err(VmError::type_error(format!(
            "Number.prototype.{method} requires that 'this' be a Number"
        ))),
    }
}

fn this_boolean_value(this_val: &Value, method: &str) -> VmResult<bool> {
    match this_val {
        Value::Boolean(b) => Ok(*b),
        Value::Object(obj) => match obj.kind() {
            ObjectKind::Boolean(b) => Ok(*b),
            _ => Err(VmError::type_error(format!(
                "Boolean.prototype.{method} requires that 'this' be a Boolean"
            ))),
        },
        _ => Err(VmError::type_error(format!(
            "Boolean.prototype.{method} requires that 'this' be a Boolean"
        ))),
    }
}

/// `String(value)` / `new String(value)`
fn string_constructor(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let s = match args.first() {
        None => JsString::intern(""),
        // Only the call form describes symbols
        Some(value) if ncx.is_construct() => ncx.to_string_value(value)?,
        Some(value) => ncx.to_display_string(value)?,
    };
    if ncx.is_construct() {
        return Ok(Value::object(ncx.realm().new_wrapper(ObjectKind::String(s))));
    }
    Ok(Value::string(s))
}

fn string_proto_to_string(this_val: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    this_string_value(this_val, "toString").map(Value::string)
}

fn string_proto_value_of(this_val: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    this_string_value(this_val, "valueOf").map(Value::string)
}

/// `Number(value)` / `new Number(value)`
fn number_constructor(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let n = match args.first() {
        None => 0.0,
        Some(value) => ncx.to_number(value)?,
    };
    if ncx.is_construct() {
        return Ok(Value::object(ncx.realm().new_wrapper(ObjectKind::Number(n))));
    }
    Ok(Value::number(n))
}

fn number_proto_to_string(this_val: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let n = this_number_value(this_val, "toString")?;
    Ok(Value::string(JsString::new_arc(number::to_js_string(n))))
}

fn number_proto_value_of(this_val: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    this_number_value(this_val, "valueOf").map(Value::number)
}

/// `Boolean(value)` / `new Boolean(value)`
fn boolean_constructor(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let b = args.first().is_some_and(|value| ncx.to_boolean(value));
    if ncx.is_construct() {
        return Ok(Value::object(ncx.realm().new_wrapper(ObjectKind::Boolean(b))));
    }
    Ok(Value::boolean(b))
}

fn boolean_proto_to_string(this_val: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let b = this_boolean_value(this_val, "toString")?;
    Ok(Value::string(JsString::intern(if b { "true" } else { "false" })))
}

fn boolean_proto_value_of(this_val: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    this_boolean_value(this_val, "valueOf").map(Value::boolean)
}

/// `parseFloat(string)`
fn parse_float(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let input = args.first().cloned().unwrap_or_default();
    let s = ncx.to_string_value(&input)?;
    Ok(Value::number(number::parse_float_prefix(s.as_str())))
}

/// `parseInt(string, radix)`
fn parse_int(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let input = args.first().cloned().unwrap_or_default();
    let s = ncx.to_string_value(&input)?;
    let radix = match args.get(1) {
        Some(radix) => to_int32(ncx.to_number(radix)?),
        None => 0,
    };
    Ok(Value::number(number::parse_int_prefix(s.as_str(), radix)))
}

/// ToInt32 on an already-converted number
fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(4_294_967_296.0) as u32 as i32
}

/// Install `String`, `Number`, `Boolean`, `parseFloat` and `parseInt` on the global.
pub fn install_global_functions(intrinsics: &Intrinsics, global: &Arc<JsObject>) {
    let fn_proto = &intrinsics.function_prototype;

    let string_ctor = BuiltInBuilder::new(fn_proto.clone(), intrinsics.string_prototype.clone(), "String")
        .constructor_fn(string_constructor, 1)
        .method("toString", string_proto_to_string, 0)
        .method("valueOf", string_proto_value_of, 0)
        .build();
    let number_ctor = BuiltInBuilder::new(fn_proto.clone(), intrinsics.number_prototype.clone(), "Number")
        .constructor_fn(number_constructor, 1)
        .method("toString", number_proto_to_string, 1)
        .method("valueOf", number_proto_value_of, 0)
        .build();
    let boolean_ctor = BuiltInBuilder::new(fn_proto.clone(), intrinsics.boolean_prototype.clone(), "Boolean")
        .constructor_fn(boolean_constructor, 1)
        .method("toString", boolean_proto_to_string, 0)
        .method("valueOf", boolean_proto_value_of, 0)
        .build();

    for (name, ctor) in [("String", string_ctor), ("Number", number_ctor), ("Boolean", boolean_ctor)] {
        global.define_property(PropertyKey::string(name), PropertyDescriptor::builtin_method(ctor));
    }

    let functions: [(&str, NativeFn, u32); 2] = [
        ("parseFloat", Arc::new(parse_float), 1),
        ("parseInt", Arc::new(parse_int), 2),
    ];
    for (name, func, length) in functions {
        let f = make_native_fn(fn_proto, func, name, length, false);
        global.define_property(
            PropertyKey::string(name),
            PropertyDescriptor::builtin_method(Value::object(f)),
        );
    }
}
