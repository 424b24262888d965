//! Intrinsics registry for the built-in prototypes.
//!
//! The initialization follows a two-stage pattern:
//! 1. **Stage 1**: Allocate empty prototype objects to break circular deps
//! 2. **Stage 2**: Install constructors and methods with `BuiltInBuilder`

use std::sync::Arc;

use crate::intrinsics_impl;
use crate::object::{JsObject, ObjectKind};
use crate::value::Value;

/// Registry of the intrinsic prototypes of one realm.
#[derive(Clone)]
pub struct Intrinsics {
    /// `Object.prototype`, `[[Prototype]]` is `null`
    pub object_prototype: Arc<JsObject>,
    /// `Function.prototype`
    pub function_prototype: Arc<JsObject>,
    /// `Array.prototype`
    pub array_prototype: Arc<JsObject>,
    /// `Symbol.prototype`
    pub symbol_prototype: Arc<JsObject>,
    /// `String.prototype`
    pub string_prototype: Arc<JsObject>,
    /// `Number.prototype`
    pub number_prototype: Arc<JsObject>,
    /// `Boolean.prototype`
    pub boolean_prototype: Arc<JsObject>,
}

impl Intrinsics {
    /// Stage 1: allocate the prototype objects and wire their chains.
    pub fn allocate() -> Self {
        let object_prototype = Arc::new(JsObject::new(None));
        let derived = || Arc::new(JsObject::new(Some(object_prototype.clone())));
        Self {
            function_prototype: derived(),
            array_prototype: derived(),
            symbol_prototype: derived(),
            string_prototype: derived(),
            number_prototype: derived(),
            boolean_prototype: derived(),
            object_prototype,
        }
    }

    /// Stage 2: install every constructor and namespace on `global`.
    pub fn install_on_global(&self, global: &Arc<JsObject>) {
        intrinsics_impl::object::install_object_constructor(self, global);
        intrinsics_impl::symbol::install_symbol_constructor(self, global);
        intrinsics_impl::globals::install_global_functions(self, global);
        intrinsics_impl::json::install_json_namespace(self, global);
    }

    /// Prototype a primitive reads its properties through.
    ///
    /// `None` for undefined, null and objects.
    pub fn prototype_for_primitive(&self, value: &Value) -> Option<Arc<JsObject>> {
        match value {
            Value::Boolean(_) => Some(self.boolean_prototype.clone()),
            Value::Number(_) => Some(self.number_prototype.clone()),
            Value::String(_) => Some(self.string_prototype.clone()),
            Value::Symbol(_) => Some(self.symbol_prototype.clone()),
            Value::Undefined | Value::Null | Value::Object(_) => None,
        }
    }

    /// Default prototype for a new object of class `kind`
    pub fn prototype_for_kind(&self, kind: &ObjectKind) -> Arc<JsObject> {
        match kind {
            ObjectKind::Ordinary => self.object_prototype.clone(),
            ObjectKind::Array => self.array_prototype.clone(),
            ObjectKind::Function(_) => self.function_prototype.clone(),
            ObjectKind::Symbol(_) => self.symbol_prototype.clone(),
            ObjectKind::Boolean(_) => self.boolean_prototype.clone(),
            ObjectKind::Number(_) => self.number_prototype.clone(),
            ObjectKind::String(_) => self.string_prototype.clone(),
        }
    }
}
