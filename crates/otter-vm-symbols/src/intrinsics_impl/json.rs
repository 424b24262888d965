//! JSON namespace: `JSON.stringify(value, replacer?, space?)`
//!
//! Symbol handling:
//! - symbol-keyed members are skipped before the replacer is consulted
//! - a plain symbol value produces no output (omitted in objects, `null` in arrays,
//!   `undefined` at the top level)
//! - a replacer still sees symbol values and may turn them into something serializable
//! - a Symbol wrapper is an object with no enumerable string keys, so it becomes `{}`

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::builtin_builder::NamespaceBuilder;
use crate::context::NativeContext;
use crate::error::{VmError, VmResult};
use crate::intrinsics::Intrinsics;
use crate::number;
use crate::object::{JsObject, ObjectKind, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::property_key::{self, KeyKind};
use crate::string::JsString;
use crate::value::Value;
use crate::well_known::to_string_tag_symbol;

/// Tracks the objects currently being serialized, to detect cycles.
struct CircularTracker {
    /// Maps object pointer to index in path
    visited: FxHashMap<usize, usize>,
    /// Path from root: (property key, is_array)
    path: Vec<(String, bool)>,
}

impl CircularTracker {
    fn new() -> Self {
        Self {
            visited: FxHashMap::default(),
            path: Vec::new(),
        }
    }

    fn depth(&self) -> usize {
        self.path.len()
    }

    fn enter(&mut self, key: &str, ptr: usize, is_array: bool) -> Result<(), String> {
        if let Some(&cycle_start) = self.visited.get(&ptr) {
            return Err(self.format_circular_error(key, cycle_start));
        }
        self.visited.insert(ptr, self.path.len());
        self.path.push((key.to_string(), is_array));
        Ok(())
    }

    fn exit(&mut self, ptr: usize) {
        self.visited.remove(&ptr);
        self.path.pop();
    }

    fn format_circular_error(&self, closing_key: &str, cycle_start: usize) -> String {
        let mut msg = String::from("Converting circular structure to JSON");
        let Some((start_key, start_is_array)) = self.path.get(cycle_start) else {
            return msg;
        };
        let constructor = |is_array: bool| if is_array { "Array" } else { "Object" };
        if cycle_start == 0 {
            msg.push_str(&format!(
                "\n    --> starting at object with constructor '{}'",
                constructor(*start_is_array)
            ));
        } else {
            msg.push_str(&format!(
                "\n    --> starting at object with constructor '{}' (property '{}')",
                constructor(*start_is_array),
                start_key
            ));
        }
        for (key, is_array) in &self.path[cycle_start + 1..] {
            msg.push_str(&format!(
                "\n    |     property '{}' -> object with constructor '{}'",
                key,
                constructor(*is_array)
            ));
        }
        msg.push_str(&format!(
            "\n    --- property '{}' closes the circle",
            closing_key
        ));
        msg
    }
}

/// Quote a string as a JSON string literal
fn quote_json_string(s: &str) -> VmResult<String> {
    serde_json::to_string(s).map_err(|e| VmError::internal(format!("JSON quoting failed: {e}")))
}

/// Format a number for JSON output (NaN and Infinity become "null")
fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    number::to_js_string(n)
}

/// Format an array with optional indentation
fn format_array(items: &[String], indent: &Option<String>, depth: usize) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    match indent {
        None => format!("[{}]", items.join(",")),
        Some(ind) => {
            let inner_indent = ind.repeat(depth + 1);
            let outer_indent = ind.repeat(depth);
            let formatted: Vec<_> = items
                .iter()
                .map(|item| format!("{}{}", inner_indent, item))
                .collect();
            format!("[\n{}\n{}]", formatted.join(",\n"), outer_indent)
        }
    }
}

/// Format an object with optional indentation, preserving key order
fn format_object(items: &[(String, String)], indent: &Option<String>, depth: usize) -> String {
    if items.is_empty() {
        return "{}".to_string();
    }
    match indent {
        None => {
            let pairs: Vec<_> = items.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
            format!("{{{}}}", pairs.join(","))
        }
        Some(ind) => {
            let inner_indent = ind.repeat(depth + 1);
            let outer_indent = ind.repeat(depth);
            let pairs: Vec<_> = items
                .iter()
                .map(|(k, v)| format!("{}{}: {}", inner_indent, k, v))
                .collect();
            format!("{{\n{}\n{}}}", pairs.join(",\n"), outer_indent)
        }
    }
}

struct Stringifier {
    replacer_fn: Option<Value>,
    property_list: Option<Vec<PropertyKey>>,
    indent: Option<String>,
    tracker: CircularTracker,
    max_depth: usize,
}

impl Stringifier {
    /// SerializeJSONProperty
    fn serialize_property(
        &mut self,
        holder: &Value,
        key: &PropertyKey,
        ncx: &mut NativeContext<'_>,
    ) -> VmResult<Option<String>> {
        let key_string = key.to_js_string().unwrap_or_else(|| JsString::intern(""));

        let mut value = ncx.get(holder, key)?;

        if value.is_object() {
            let to_json = ncx.get(&value, &PropertyKey::string("toJSON"))?;
            if to_json.is_callable() {
                value = ncx.call_function(&to_json, value.clone(), &[Value::string(key_string.clone())])?;
            }
        }

        if let Some(replacer) = &self.replacer_fn {
            let replacer = replacer.clone();
            value = ncx.call_function(
                &replacer,
                holder.clone(),
                &[Value::string(key_string.clone()), value],
            )?;
        }

        // Primitive wrappers serialize as their primitive; Symbol wrappers do not
        if let Some(obj) = value.as_object() {
            value = match obj.kind() {
                ObjectKind::Number(_) => Value::number(ncx.to_number(&value)?),
                ObjectKind::String(_) => Value::string(ncx.to_string_value(&value)?),
                ObjectKind::Boolean(b) => Value::boolean(*b),
                _ => value,
            };
        }

        if !property_key::is_serializable(&value) {
            return Ok(None);
        }

        match &value {
            Value::Null => Ok(Some("null".to_string())),
            Value::Boolean(b) => Ok(Some(b.to_string())),
            Value::Number(n) => Ok(Some(format_number(*n))),
            Value::String(s) => quote_json_string(s.as_str()).map(Some),
            Value::Object(obj) if obj.is_array() => {
                self.serialize_array(obj, key_string.as_str(), ncx).map(Some)
            }
            Value::Object(obj) => self.serialize_object(obj, key_string.as_str(), ncx).map(Some),
            Value::Undefined | Value::Symbol(_) => Ok(None),
        }
    }

    fn enter(&mut self, obj: &Arc<JsObject>, key: &str) -> VmResult<(usize, usize)> {
        let depth = self.tracker.depth();
        if depth >= self.max_depth {
            return Err(VmError::range_error(format!(
                "Maximum JSON nesting depth of {} exceeded",
                self.max_depth
            )));
        }
        let ptr = Arc::as_ptr(obj) as usize;
        self.tracker
            .enter(key, ptr, obj.is_array())
            .map_err(VmError::type_error)?;
        Ok((ptr, depth))
    }

    fn serialize_array(
        &mut self,
        arr: &Arc<JsObject>,
        key: &str,
        ncx: &mut NativeContext<'_>,
    ) -> VmResult<String> {
        let (ptr, depth) = self.enter(arr, key)?;
        let holder = Value::object(arr.clone());
        let length = ncx.get(&holder, &PropertyKey::string("length"))?;
        let length = ncx.to_integer_or_infinity(&length)?.clamp(0.0, u32::MAX as f64) as u32;

        let mut items = Vec::with_capacity(length as usize);
        for i in 0..length {
            let item = self.serialize_property(&holder, &PropertyKey::Index(i), ncx)?;
            items.push(item.unwrap_or_else(|| "null".to_string()));
        }

        self.tracker.exit(ptr);
        Ok(format_array(&items, &self.indent, depth))
    }

    fn serialize_object(
        &mut self,
        obj: &Arc<JsObject>,
        key: &str,
        ncx: &mut NativeContext<'_>,
    ) -> VmResult<String> {
        let (ptr, depth) = self.enter(obj, key)?;
        let holder = Value::object(obj.clone());

        let keys: Vec<PropertyKey> = match &self.property_list {
            Some(list) => list.clone(),
            None => obj
                .own_keys()
                .into_iter()
                .filter(|k| match property_key::key_kind_of(k) {
                    Some(KeyKind::String) => {
                        obj.get_own_property(k).is_some_and(|d| d.enumerable())
                    }
                    Some(KeyKind::Symbol) => {
                        tracing::trace!(key = ?k, "JSON.stringify skipped symbol key");
                        false
                    }
                    None => false,
                })
                .collect(),
        };

        let mut items = Vec::new();
        for k in keys {
            if let Some(json) = self.serialize_property(&holder, &k, ncx)? {
                let name = k.to_js_string().unwrap_or_else(|| JsString::intern(""));
                items.push((quote_json_string(name.as_str())?, json));
            }
        }

        self.tracker.exit(ptr);
        Ok(format_object(&items, &self.indent, depth))
    }
}

/// Parse an array replacer into a property list. Symbol entries, plain or
/// wrapped, are ignored.
fn parse_property_list(
    replacer: &Arc<JsObject>,
    ncx: &mut NativeContext<'_>,
) -> VmResult<Vec<PropertyKey>> {
    let holder = Value::object(replacer.clone());
    let mut seen: FxHashSet<PropertyKey> = FxHashSet::default();
    let mut list = Vec::new();
    for i in 0..replacer.array_length() {
        let element = ncx.get(&holder, &PropertyKey::Index(i))?;
        if property_key::unwrap_if_wrapped(&element).is_symbol() {
            continue;
        }
        let item = match &element {
            Value::String(s) => Some(s.clone()),
            Value::Number(_) => Some(ncx.to_string_value(&element)?),
            Value::Object(obj) if matches!(obj.kind(), ObjectKind::String(_) | ObjectKind::Number(_)) => {
                Some(ncx.to_string_value(&element)?)
            }
            _ => None,
        };
        if let Some(item) = item {
            let key = PropertyKey::from_js_string(item);
            if seen.insert(key.clone()) {
                list.push(key);
            }
        }
    }
    Ok(list)
}

/// Parse the space argument into an indent string
fn parse_space(space: &Value, ncx: &mut NativeContext<'_>) -> VmResult<Option<String>> {
    let space = match space.as_object().map(|obj| obj.kind()) {
        Some(ObjectKind::Number(_)) => Value::number(ncx.to_number(space)?),
        Some(ObjectKind::String(_)) => Value::string(ncx.to_string_value(space)?),
        _ => space.clone(),
    };
    match &space {
        Value::Number(_) => {
            let count = ncx.to_integer_or_infinity(&space)?.clamp(0.0, 10.0) as usize;
            Ok((count > 0).then(|| " ".repeat(count)))
        }
        Value::String(s) if !s.is_empty() => Ok(Some(s.as_str().chars().take(10).collect())),
        _ => Ok(None),
    }
}

fn json_stringify(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let value = args.first().cloned().unwrap_or_default();
    let replacer = args.get(1).cloned().unwrap_or_default();
    let space = args.get(2).cloned().unwrap_or_default();

    let mut replacer_fn = None;
    let mut property_list = None;
    if replacer.is_callable() {
        replacer_fn = Some(replacer);
    } else if let Some(arr) = replacer.as_object().filter(|obj| obj.is_array()) {
        property_list = Some(parse_property_list(arr, ncx)?);
    }

    let indent = parse_space(&space, ncx)?;

    let wrapper = ncx.realm().new_object();
    wrapper.set(PropertyKey::string(""), value);

    let mut stringifier = Stringifier {
        replacer_fn,
        property_list,
        indent,
        tracker: CircularTracker::new(),
        max_depth: ncx.realm().config().json_max_depth,
    };
    match stringifier.serialize_property(&Value::object(wrapper), &PropertyKey::string(""), ncx)? {
        Some(json) => Ok(Value::string(JsString::new_arc(json))),
        None => Ok(Value::undefined()),
    }
}

/// Create the `JSON` namespace object and install it on the global.
pub fn install_json_namespace(intrinsics: &Intrinsics, global: &Arc<JsObject>) {
    let json = NamespaceBuilder::new(
        intrinsics.function_prototype.clone(),
        Arc::new(JsObject::new(Some(intrinsics.object_prototype.clone()))),
    )
    .method("stringify", json_stringify, 3)
    .property(
        PropertyKey::Symbol(to_string_tag_symbol()),
        Value::string(JsString::intern("JSON")),
        PropertyAttributes::function_length(),
    )
    .build();

    global.define_property(
        PropertyKey::string("JSON"),
        PropertyDescriptor::builtin_method(Value::object(json)),
    );
}
