//! Builder pattern for creating builtin constructors and prototypes.
//!
//! All builtin methods get the correct property attributes (non-enumerable),
//! function objects get `length` and `name`, and plain methods are marked as
//! non-constructors so `new` on them raises a TypeError.
//!
//! ## Usage
//!
//! ```ignore
//! let ctor = BuiltInBuilder::new(fn_proto, symbol_proto, "Symbol")
//!     .constructor_fn(symbol_constructor, 0)
//!     .method("toString", symbol_to_string, 0)
//!     .static_method("for", symbol_for, 1)
//!     .build();
//! ```

use std::sync::Arc;

use crate::context::NativeContext;
use crate::error::VmResult;
use crate::hidden::{FUNCTION_NAME, NON_CONSTRUCTOR};
use crate::object::{JsObject, ObjectKind, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::string::JsString;
use crate::symbol::Symbol;
use crate::value::{NativeFn, Value};

/// A deferred property definition to be applied during `build()`.
enum DeferredProperty {
    /// Method on the prototype
    Method {
        name: String,
        func: NativeFn,
        length: u32,
    },
    /// Static method on the constructor
    StaticMethod {
        name: String,
        func: NativeFn,
        length: u32,
    },
    /// Data property on the prototype
    Property {
        key: PropertyKey,
        value: Value,
        attrs: PropertyAttributes,
    },
    /// Data property on the constructor
    StaticProperty {
        key: PropertyKey,
        value: Value,
        attrs: PropertyAttributes,
    },
    /// Getter on the prototype
    Accessor { name: String, getter: NativeFn },
    /// Symbol-keyed method on the prototype
    SymbolMethod {
        symbol: Symbol,
        name: String,
        func: NativeFn,
        length: u32,
        attrs: PropertyAttributes,
    },
}

/// Builder for a builtin constructor + prototype pair.
pub struct BuiltInBuilder {
    fn_proto: Arc<JsObject>,
    prototype: Arc<JsObject>,
    name: String,
    /// Constructor implementation and arity
    ctor: Option<(NativeFn, u32)>,
    properties: Vec<DeferredProperty>,
}

impl BuiltInBuilder {
    /// Start a builder over a pre-allocated prototype.
    ///
    /// - `fn_proto`: `%Function.prototype%`, the `[[Prototype]]` of every native function
    /// - `prototype`: the builtin's prototype object (e.g. `Symbol.prototype`)
    /// - `name`: constructor name
    pub fn new(fn_proto: Arc<JsObject>, prototype: Arc<JsObject>, name: &str) -> Self {
        Self {
            fn_proto,
            prototype,
            name: name.to_string(),
            ctor: None,
            properties: Vec::new(),
        }
    }

    /// Set the constructor function implementation and its arity.
    pub fn constructor_fn<F>(mut self, f: F, length: u32) -> Self
    where
        F: Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync + 'static,
    {
        self.ctor = Some((Arc::new(f), length));
        self
    }

    /// Add a method to the prototype.
    ///
    /// Attributes `{ writable: true, enumerable: false, configurable: true }`.
    pub fn method<F>(mut self, name: &str, f: F, length: u32) -> Self
    where
        F: Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync + 'static,
    {
        self.properties.push(DeferredProperty::Method {
            name: name.to_string(),
            func: Arc::new(f),
            length,
        });
        self
    }

    /// Add a static method to the constructor.
    pub fn static_method<F>(mut self, name: &str, f: F, length: u32) -> Self
    where
        F: Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync + 'static,
    {
        self.properties.push(DeferredProperty::StaticMethod {
            name: name.to_string(),
            func: Arc::new(f),
            length,
        });
        self
    }

    /// Add a data property to the prototype with explicit attributes.
    pub fn property(mut self, key: PropertyKey, value: Value, attrs: PropertyAttributes) -> Self {
        self.properties
            .push(DeferredProperty::Property { key, value, attrs });
        self
    }

    /// Add a data property to the constructor with explicit attributes.
    pub fn static_property(
        mut self,
        key: PropertyKey,
        value: Value,
        attrs: PropertyAttributes,
    ) -> Self {
        self.properties
            .push(DeferredProperty::StaticProperty { key, value, attrs });
        self
    }

    /// Add a getter to the prototype.
    pub fn accessor<F>(mut self, name: &str, getter: F) -> Self
    where
        F: Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync + 'static,
    {
        self.properties.push(DeferredProperty::Accessor {
            name: name.to_string(),
            getter: Arc::new(getter),
        });
        self
    }

    /// Add a symbol-keyed method to the prototype (e.g. `[Symbol.toPrimitive]`).
    pub fn symbol_method<F>(
        mut self,
        symbol: Symbol,
        name: &str,
        f: F,
        length: u32,
        attrs: PropertyAttributes,
    ) -> Self
    where
        F: Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync + 'static,
    {
        self.properties.push(DeferredProperty::SymbolMethod {
            symbol,
            name: name.to_string(),
            func: Arc::new(f),
            length,
            attrs,
        });
        self
    }

    /// Build the constructor + prototype pair.
    ///
    /// 1. Creates the constructor function object
    /// 2. Adds all deferred properties with correct attributes
    /// 3. Wires `constructor.prototype` and `prototype.constructor`
    ///
    /// Returns the constructor as a `Value`.
    pub fn build(self) -> Value {
        let BuiltInBuilder {
            fn_proto,
            prototype,
            name,
            ctor,
            properties,
        } = self;

        let constructor = match ctor {
            Some((func, length)) => make_native_fn(&fn_proto, func, &name, length, true),
            None => Arc::new(JsObject::new(Some(fn_proto.clone()))),
        };

        for prop in properties {
            match prop {
                DeferredProperty::Method { name, func, length } => {
                    let f = make_native_fn(&fn_proto, func, &name, length, false);
                    prototype.define_property(
                        PropertyKey::string(&name),
                        PropertyDescriptor::builtin_method(Value::object(f)),
                    );
                }
                DeferredProperty::StaticMethod { name, func, length } => {
                    let f = make_native_fn(&fn_proto, func, &name, length, false);
                    constructor.define_property(
                        PropertyKey::string(&name),
                        PropertyDescriptor::builtin_method(Value::object(f)),
                    );
                }
                DeferredProperty::Property { key, value, attrs } => {
                    prototype.define_property(key, PropertyDescriptor::data_with_attrs(value, attrs));
                }
                DeferredProperty::StaticProperty { key, value, attrs } => {
                    constructor
                        .define_property(key, PropertyDescriptor::data_with_attrs(value, attrs));
                }
                DeferredProperty::Accessor { name, getter } => {
                    let get = make_native_fn(&fn_proto, getter, &format!("get {name}"), 0, false);
                    prototype.define_property(
                        PropertyKey::string(&name),
                        PropertyDescriptor::Accessor {
                            get: Some(Value::object(get)),
                            set: None,
                            attributes: PropertyAttributes::function_length(),
                        },
                    );
                }
                DeferredProperty::SymbolMethod {
                    symbol,
                    name,
                    func,
                    length,
                    attrs,
                } => {
                    let f = make_native_fn(&fn_proto, func, &format!("[{name}]"), length, false);
                    prototype.define_property(
                        PropertyKey::Symbol(symbol),
                        PropertyDescriptor::data_with_attrs(Value::object(f), attrs),
                    );
                }
            }
        }

        constructor.define_property(
            PropertyKey::string("prototype"),
            PropertyDescriptor::data_with_attrs(
                Value::object(prototype.clone()),
                PropertyAttributes::frozen(),
            ),
        );
        prototype.define_property(
            PropertyKey::string("constructor"),
            PropertyDescriptor::data_with_attrs(
                Value::object(constructor.clone()),
                PropertyAttributes::constructor_link(),
            ),
        );

        Value::object(constructor)
    }
}

/// Create a native function object with `length` and `name`, using `fn_proto`
/// as `[[Prototype]]`. Non-constructors carry the engine's hidden marker.
pub fn make_native_fn(
    fn_proto: &Arc<JsObject>,
    func: NativeFn,
    name: &str,
    length: u32,
    constructor: bool,
) -> Arc<JsObject> {
    let fn_obj = Arc::new(JsObject::with_kind(
        ObjectKind::Function(func),
        Some(fn_proto.clone()),
    ));
    fn_obj.define_property(
        PropertyKey::string("length"),
        PropertyDescriptor::function_length(Value::number(length as f64)),
    );
    let name = JsString::intern(name);
    fn_obj.define_property(
        PropertyKey::string("name"),
        PropertyDescriptor::function_length(Value::string(name.clone())),
    );
    fn_obj.define_property(
        PropertyKey::Hidden(FUNCTION_NAME),
        PropertyDescriptor::data_with_attrs(Value::string(name), PropertyAttributes::frozen()),
    );
    if !constructor {
        fn_obj.define_property(
            PropertyKey::Hidden(NON_CONSTRUCTOR),
            PropertyDescriptor::data_with_attrs(Value::boolean(true), PropertyAttributes::frozen()),
        );
    }
    fn_obj
}

/// Builder for namespace objects (like `JSON`).
///
/// Namespace objects are not constructors: plain objects with methods.
pub struct NamespaceBuilder {
    fn_proto: Arc<JsObject>,
    object: Arc<JsObject>,
}

impl NamespaceBuilder {
    /// Create a new namespace builder over `object`.
    pub fn new(fn_proto: Arc<JsObject>, object: Arc<JsObject>) -> Self {
        Self { fn_proto, object }
    }

    /// Add a method to the namespace object.
    pub fn method<F>(self, name: &str, f: F, length: u32) -> Self
    where
        F: Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync + 'static,
    {
        let func = make_native_fn(&self.fn_proto, Arc::new(f), name, length, false);
        self.object.define_property(
            PropertyKey::string(name),
            PropertyDescriptor::builtin_method(Value::object(func)),
        );
        self
    }

    /// Add a data property to the namespace object.
    pub fn property(self, key: PropertyKey, value: Value, attrs: PropertyAttributes) -> Self {
        self.object
            .define_property(key, PropertyDescriptor::data_with_attrs(value, attrs));
        self
    }

    /// Finish and return the namespace object.
    pub fn build(self) -> Arc<JsObject> {
        self.object
    }
}
