//! Realm: intrinsics, global object and the symbol registry a script sees.
//!
//! Every realm owns its own prototypes and global object. The well-known
//! symbols are shared by all realms in the process, and so is the symbol
//! registry unless the realm was configured with an isolated one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::builtin_builder::make_native_fn;
use crate::config::RealmConfig;
use crate::context::NativeContext;
use crate::error::VmResult;
use crate::intrinsics::Intrinsics;
use crate::object::{JsObject, ObjectKind, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::property_key;
use crate::string::JsString;
use crate::symbol_registry::SymbolRegistry;
use crate::value::{NativeFn, Value};

/// Unique realm identifier.
pub type RealmId = u32;

static NEXT_REALM_ID: AtomicU32 = AtomicU32::new(0);

/// A script realm
pub struct Realm {
    id: RealmId,
    intrinsics: Intrinsics,
    global: Arc<JsObject>,
    registry: Arc<SymbolRegistry>,
    config: RealmConfig,
}

impl Realm {
    /// Realm with default settings, sharing the process-wide registry
    pub fn new() -> Self {
        Self::with_config(RealmConfig::default())
    }

    /// Realm with explicit settings
    pub fn with_config(config: RealmConfig) -> Self {
        let id = NEXT_REALM_ID.fetch_add(1, Ordering::Relaxed);
        let registry = if config.isolated_registry {
            Arc::new(SymbolRegistry::new())
        } else {
            SymbolRegistry::global()
        };

        let intrinsics = Intrinsics::allocate();
        let global = Arc::new(JsObject::new(Some(intrinsics.object_prototype.clone())));
        intrinsics.install_on_global(&global);
        global.define_property(
            PropertyKey::string("globalThis"),
            PropertyDescriptor::builtin_method(Value::object(global.clone())),
        );

        tracing::debug!(
            realm = id,
            isolated_registry = config.isolated_registry,
            max_call_depth = config.max_call_depth,
            "realm initialized"
        );

        Self {
            id,
            intrinsics,
            global,
            registry,
            config,
        }
    }

    /// Realm identifier
    pub fn id(&self) -> RealmId {
        self.id
    }

    /// The realm's intrinsic prototypes
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// The global object
    pub fn global(&self) -> &Arc<JsObject> {
        &self.global
    }

    /// Registry backing `Symbol.for` / `Symbol.keyFor`
    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    /// Settings this realm was created with
    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    /// A fresh top-level native context
    pub fn context(&self) -> NativeContext<'_> {
        NativeContext::new(self)
    }

    /// Global binding `name`, or undefined
    pub fn global_value(&self, name: &str) -> Value {
        self.global
            .get(&PropertyKey::string(name))
            .unwrap_or_default()
    }

    /// `{}` inheriting from `Object.prototype`
    pub fn new_object(&self) -> Arc<JsObject> {
        Arc::new(JsObject::new(Some(self.intrinsics.object_prototype.clone())))
    }

    /// Array literal holding `values`
    pub fn new_array(&self, values: Vec<Value>) -> Arc<JsObject> {
        Arc::new(JsObject::array(
            values,
            Some(self.intrinsics.array_prototype.clone()),
        ))
    }

    /// Native function that can be called but not constructed
    pub fn new_function<F>(&self, name: &str, length: u32, f: F) -> Arc<JsObject>
    where
        F: Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync + 'static,
    {
        let func: NativeFn = Arc::new(f);
        make_native_fn(
            &self.intrinsics.function_prototype,
            func,
            name,
            length,
            false,
        )
    }

    /// Primitive wrapper object for `kind`.
    ///
    /// A String wrapper also gets its non-writable `length`.
    pub fn new_wrapper(&self, kind: ObjectKind) -> Arc<JsObject> {
        let proto = self.intrinsics.prototype_for_kind(&kind);
        let length = match &kind {
            ObjectKind::String(s) => Some(s.utf16_len()),
            _ => None,
        };
        let wrapper = Arc::new(JsObject::with_kind(kind, Some(proto)));
        if let Some(length) = length {
            wrapper.define_property(
                PropertyKey::string("length"),
                PropertyDescriptor::data_with_attrs(
                    Value::number(length as f64),
                    PropertyAttributes::frozen(),
                ),
            );
        }
        wrapper
    }

    /// Call `func` with `this` and `args` from a fresh context
    pub fn call(&self, func: &Value, this: Value, args: &[Value]) -> VmResult<Value> {
        self.context().call_function(func, this, args)
    }

    /// `new func(...args)` from a fresh context
    pub fn construct(&self, func: &Value, args: &[Value]) -> VmResult<Value> {
        self.context().construct(func, args)
    }

    /// Keys a `for (k in value)` loop visits
    pub fn for_in_keys(&self, value: &Value) -> VmResult<Vec<Arc<JsString>>> {
        if value.is_nullish() {
            return Ok(Vec::new());
        }
        let obj = self.context().to_object(value)?;
        Ok(property_key::for_in_keys(&obj))
    }
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Realm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Realm")
            .field("id", &self.id)
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}
