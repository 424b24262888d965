//! JavaScript values
//!
//! `Value` is the tagged union every builtin, coercion and property operation
//! passes around. Primitives are stored inline; strings, symbols and objects are
//! reference counted and cheap to clone.

use std::sync::Arc;

use crate::coercion::{Coercion, CoercionGuard, Verdict};
use crate::context::NativeContext;
use crate::error::VmResult;
use crate::object::{JsObject, ObjectKind};
use crate::string::JsString;
use crate::symbol::Symbol;

/// Native function signature
///
/// Receives `this`, the argument list and the calling context.
pub type NativeFn =
    Arc<dyn Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync>;

/// A JavaScript value
#[derive(Clone, Default)]
pub enum Value {
    /// `undefined`
    #[default]
    Undefined,
    /// `null`
    Null,
    /// Boolean primitive
    Boolean(bool),
    /// Number primitive
    Number(f64),
    /// String primitive
    String(Arc<JsString>),
    /// Symbol primitive
    Symbol(Symbol),
    /// Any object, including functions and primitive wrappers
    Object(Arc<JsObject>),
}

impl Value {
    /// `undefined`
    #[inline]
    pub const fn undefined() -> Self {
        Self::Undefined
    }

    /// `null`
    #[inline]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Boolean value
    #[inline]
    pub const fn boolean(b: bool) -> Self {
        Self::Boolean(b)
    }

    /// Number value
    #[inline]
    pub const fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// String value
    #[inline]
    pub fn string(s: Arc<JsString>) -> Self {
        Self::String(s)
    }

    /// Symbol value
    #[inline]
    pub fn symbol(sym: Symbol) -> Self {
        Self::Symbol(sym)
    }

    /// Object value
    #[inline]
    pub fn object(obj: Arc<JsObject>) -> Self {
        Self::Object(obj)
    }

    /// Is `undefined`
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Is `null`
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Is `null` or `undefined`
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Is a plain symbol (wrappers are objects)
    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Is a string primitive
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Is an object
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Is a callable object
    pub fn is_callable(&self) -> bool {
        self.as_object().is_some_and(|obj| obj.is_callable())
    }

    /// Is a Symbol wrapper object
    pub fn is_symbol_wrapper(&self) -> bool {
        self.as_object()
            .is_some_and(|obj| matches!(obj.kind(), ObjectKind::Symbol(_)))
    }

    /// Get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string
    pub fn as_string(&self) -> Option<&Arc<JsString>> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as plain symbol
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// Get as object
    pub fn as_object(&self) -> Option<&Arc<JsObject>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// ToBoolean
    pub fn to_boolean(&self) -> bool {
        if let Some(Verdict::Truthy) = CoercionGuard::check(self, Coercion::ToBoolean) {
            return true;
        }
        match self {
            Self::Undefined | Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => !(*n == 0.0 || n.is_nan()),
            Self::String(s) => !s.is_empty(),
            Self::Symbol(_) | Self::Object(_) => true,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(JsString::new_arc(s))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Self::Symbol(sym)
    }
}

impl From<Arc<JsString>> for Value {
    fn from(s: Arc<JsString>) -> Self {
        Self::String(s)
    }
}

impl From<Arc<JsObject>> for Value {
    fn from(obj: Arc<JsObject>) -> Self {
        Self::Object(obj)
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", crate::number::to_js_string(*n)),
            Self::String(s) => write!(f, "{:?}", s),
            Self::Symbol(sym) => write!(f, "{:?}", sym),
            Self::Object(obj) => write!(f, "{:?}", obj),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_always_truthy() {
        assert!(Value::symbol(Symbol::new(None)).to_boolean());
        assert!(Value::symbol(Symbol::new(Some(JsString::intern("")))).to_boolean());
    }

    #[test]
    fn test_primitive_truthiness() {
        assert!(!Value::undefined().to_boolean());
        assert!(!Value::number(f64::NAN).to_boolean());
        assert!(!Value::from("").to_boolean());
        assert!(Value::from("0").to_boolean());
    }

    #[test]
    fn test_wrapper_is_object_not_symbol() {
        let wrapper = Value::object(Arc::new(JsObject::with_kind(
            ObjectKind::Symbol(Symbol::new(None)),
            None,
        )));
        assert!(wrapper.is_symbol_wrapper());
        assert!(!wrapper.is_symbol());
        assert!(wrapper.to_boolean());
    }
}
