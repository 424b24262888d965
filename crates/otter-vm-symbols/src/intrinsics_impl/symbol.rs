//! Symbol constructor and prototype implementation

use std::sync::Arc;

use crate::builtin_builder::BuiltInBuilder;
use crate::context::NativeContext;
use crate::error::{VmError, VmResult};
use crate::intrinsics::Intrinsics;
use crate::object::{JsObject, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::string::JsString;
use crate::symbol::Symbol;
use crate::value::Value;
use crate::well_known::{WellKnownSymbols, to_primitive_symbol, to_string_tag_symbol};

/// The symbol behind `this`: a plain symbol or a Symbol wrapper.
fn this_symbol_value(this_val: &Value, method: &str) -> VmResult<Symbol> {
    if let Some(sym) = this_val.as_symbol() {
        return Ok(sym.clone());
    }
    this_val
        .as_object()
        .and_then(|obj| obj.symbol_data())
        .cloned()
        .ok_or_else(|| {
            VmError::type_error(format!(
                "Symbol.prototype.{method} requires that 'this' be a Symbol"
            ))
        })
}

/// `Symbol(description?)`
fn symbol_constructor(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    if ncx.is_construct() {
        return Err(VmError::construction_misuse("Symbol"));
    }
    let description = match args.first() {
        None | Some(Value::Undefined) => None,
        Some(arg) => Some(ncx.to_string_value(arg)?),
    };
    Ok(Value::symbol(Symbol::new(description)))
}

/// `Symbol.for(key)`
fn symbol_for(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let key = args.first().cloned().unwrap_or_default();
    let key = ncx.to_string_value(&key)?;
    Ok(Value::symbol(ncx.registry().for_key(key.as_str())))
}

/// `Symbol.keyFor(sym)`
fn symbol_key_for(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let sym = args
        .first()
        .and_then(|v| v.as_symbol())
        .ok_or_else(|| VmError::type_error("Symbol.keyFor requires that the argument be a Symbol"))?;
    Ok(ncx
        .registry()
        .key_for(sym)
        .map(Value::string)
        .unwrap_or_default())
}

fn symbol_to_string(this_val: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let sym = this_symbol_value(this_val, "toString")?;
    Ok(Value::string(JsString::new_arc(sym.descriptive_string())))
}

fn symbol_value_of(this_val: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    this_symbol_value(this_val, "valueOf").map(Value::symbol)
}

fn symbol_to_primitive(this_val: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    this_symbol_value(this_val, "[Symbol.toPrimitive]").map(Value::symbol)
}

fn symbol_description(this_val: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let sym = this_symbol_value(this_val, "description")?;
    Ok(sym.description().cloned().map(Value::string).unwrap_or_default())
}

/// Build the `Symbol` constructor over `Symbol.prototype` and install it on the global.
pub fn install_symbol_constructor(intrinsics: &Intrinsics, global: &Arc<JsObject>) {
    let mut builder = BuiltInBuilder::new(
        intrinsics.function_prototype.clone(),
        intrinsics.symbol_prototype.clone(),
        "Symbol",
    )
    .constructor_fn(symbol_constructor, 0)
    .static_method("for", symbol_for, 1)
    .static_method("keyFor", symbol_key_for, 1)
    .method("toString", symbol_to_string, 0)
    .method("valueOf", symbol_value_of, 0)
    .accessor("description", symbol_description)
    .symbol_method(
        to_primitive_symbol(),
        "Symbol.toPrimitive",
        symbol_to_primitive,
        1,
        PropertyAttributes::function_length(),
    )
    .property(
        PropertyKey::Symbol(to_string_tag_symbol()),
        Value::string(JsString::intern("Symbol")),
        PropertyAttributes::function_length(),
    );

    for (which, sym) in WellKnownSymbols::get().iter() {
        builder = builder.static_property(
            PropertyKey::string(which.property_name()),
            Value::symbol(sym.clone()),
            PropertyAttributes::frozen(),
        );
    }

    global.define_property(
        PropertyKey::string("Symbol"),
        PropertyDescriptor::builtin_method(builder.build()),
    );
}
