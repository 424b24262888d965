//! Symbol creation: the constructor, `Symbol.for` and `Symbol.keyFor`.

mod common;

use common::{Harness, js, text};
use otter_vm_symbols::operations::{loose_equals, strict_equals};
use otter_vm_symbols::symbol::SymbolKind;
use otter_vm_symbols::{Value, VmError};

fn equality(h: &Harness, a: &Value, b: &Value) -> (bool, bool) {
    let mut ncx = h.realm.context();
    (loose_equals(&mut ncx, a, b).unwrap(), strict_equals(a, b))
}

#[test]
fn test_new_symbol_is_type_error() {
    let h = Harness::new();
    for args in [vec![], vec![js("123")]] {
        let err = h.construct_global("Symbol", &args).unwrap_err();
        assert!(matches!(err, VmError::ConstructionMisuse { .. }));
        assert_eq!(err.error_name(), "TypeError");
        assert_eq!(err.to_string(), "TypeError: Symbol is not a constructor");
    }
}

#[test]
fn test_anonymous_symbols_are_distinct() {
    let h = Harness::new();
    let s1 = h.symbol(None);
    let s2 = h.symbol(None);
    assert_eq!(h.string_of(&s1).unwrap(), "Symbol()");
    assert_eq!(text(&h.call_method(&s1, "toString", &[]).unwrap()), "Symbol()");
    assert_eq!(h.string_of(&s2).unwrap(), "Symbol()");
    assert_eq!(equality(&h, &s1, &s2), (false, false));
}

#[test]
fn test_same_description_never_aliases() {
    let h = Harness::new();
    let s1 = h.symbol(Some("123"));
    let s2 = h.symbol(Some("123"));
    assert_eq!(h.string_of(&s1).unwrap(), "Symbol(123)");
    assert_eq!(text(&h.call_method(&s2, "toString", &[]).unwrap()), "Symbol(123)");
    assert_eq!(equality(&h, &s1, &s2), (false, false));
}

#[test]
fn test_registry_and_constructor_never_alias() {
    let h = Harness::new();
    let s1 = h.symbol(Some("creation.123"));
    let s2 = h.symbol_for("creation.123");
    let s3 = h.symbol_for("creation.123");
    assert_eq!(h.string_of(&s2).unwrap(), "Symbol(creation.123)");
    assert_eq!(equality(&h, &s1, &s2), (false, false));
    assert_eq!(equality(&h, &s1, &s3), (false, false));
    assert_eq!(equality(&h, &s2, &s3), (true, true));
    assert_eq!(s2.as_symbol().unwrap().kind(), SymbolKind::Registered);
    assert_eq!(s1.as_symbol().unwrap().kind(), SymbolKind::Local);
}

#[test]
fn test_constructor_argument_is_string_coerced() {
    let h = Harness::new();
    let n = h.call_global("Symbol", &[Value::number(123.0)]).unwrap();
    let b = h.call_global("Symbol", &[Value::boolean(true)]).unwrap();
    let null = h.call_global("Symbol", &[Value::null()]).unwrap();
    let obj = h.call_global("Symbol", &[h.new_object()]).unwrap();
    assert_eq!(h.string_of(&n).unwrap(), "Symbol(123)");
    assert_eq!(h.string_of(&b).unwrap(), "Symbol(true)");
    assert_eq!(h.string_of(&null).unwrap(), "Symbol(null)");
    assert_eq!(h.string_of(&obj).unwrap(), "Symbol([object Object])");
}

#[test]
fn test_missing_and_undefined_argument_have_no_description() {
    let h = Harness::new();
    let missing = h.call_global("Symbol", &[]).unwrap();
    let undefined = h.call_global("Symbol", &[Value::undefined()]).unwrap();
    let empty = h.call_global("Symbol", &[js("")]).unwrap();
    assert!(missing.as_symbol().unwrap().description().is_none());
    assert!(undefined.as_symbol().unwrap().description().is_none());
    assert_eq!(h.string_of(&undefined).unwrap(), "Symbol()");
    // Not observably different from an empty description
    assert_eq!(h.string_of(&empty).unwrap(), "Symbol()");
}

#[test]
fn test_symbol_for_coerces_undefined_to_text() {
    let h = Harness::new();
    let missing = h.call_static("Symbol", "for", &[]).unwrap();
    let undefined = h.call_static("Symbol", "for", &[Value::undefined()]).unwrap();
    let null = h.call_static("Symbol", "for", &[Value::null()]).unwrap();
    assert_eq!(h.string_of(&missing).unwrap(), "Symbol(undefined)");
    assert_eq!(h.string_of(&undefined).unwrap(), "Symbol(undefined)");
    assert_eq!(h.string_of(&null).unwrap(), "Symbol(null)");
    assert!(strict_equals(&missing, &undefined));
}

#[test]
fn test_key_for() {
    let h = Harness::new();
    let registered = h.symbol_for("creation.keyFor");
    let local = h.symbol(Some("creation.keyFor"));

    let key = h.call_static("Symbol", "keyFor", &[registered]).unwrap();
    assert_eq!(text(&key), "creation.keyFor");
    assert!(h.call_static("Symbol", "keyFor", &[local.clone()]).unwrap().is_undefined());

    for bad in [js("creation.keyFor"), h.object(&local), Value::undefined()] {
        let err = h.call_static("Symbol", "keyFor", &[bad]).unwrap_err();
        assert_eq!(err.error_name(), "TypeError");
    }
}

#[test]
fn test_symbol_argument_to_constructor_is_rejected() {
    let h = Harness::new();
    let inner = h.symbol(Some("foo"));
    let err = h.call_global("Symbol", &[inner.clone()]).unwrap_err();
    assert!(matches!(err, VmError::Coercion(_)));

    // Explicit .toString() output is just a string
    let described = h.call_method(&inner, "toString", &[]).unwrap();
    let odd = h.call_global("Symbol", &[described]).unwrap();
    assert_eq!(h.string_of(&odd).unwrap(), "Symbol(Symbol(foo))");
}

#[test]
fn test_constructor_shape() {
    let h = Harness::new();
    let ctor = h.global("Symbol");
    assert_eq!(h.get(&ctor, "length").unwrap().as_number(), Some(0.0));
    assert_eq!(text(&h.get(&ctor, "name").unwrap()), "Symbol");
    let proto = h.get(&ctor, "prototype").unwrap();
    let back = h.get(&proto, "constructor").unwrap();
    assert!(strict_equals(&back, &ctor));
}
