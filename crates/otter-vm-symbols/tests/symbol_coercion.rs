//! Coercion of plain and wrapped symbols.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{Harness, is_symbol_object, js, text};
use otter_vm_symbols::operations::{loose_equals, strict_equals};
use otter_vm_symbols::well_known::to_primitive_symbol;
use otter_vm_symbols::{CoercionError, CoercionTarget, PropertyKey, Value, VmError};

fn equality(h: &Harness, a: &Value, b: &Value) -> (bool, bool) {
    let mut ncx = h.realm.context();
    (loose_equals(&mut ncx, a, b).unwrap(), strict_equals(a, b))
}

#[test]
fn test_object_coercion_wraps_and_is_idempotent() {
    let h = Harness::new();
    let s1 = h.symbol(Some("123"));
    let o1 = h.object(&s1);
    assert!(is_symbol_object(&o1));
    assert_eq!(equality(&h, &s1, &o1), (true, false));

    let tag = h.call_proto("Object", "toString", o1.clone(), &[]).unwrap();
    assert_eq!(text(&tag), "[object Symbol]");

    let o2 = h.object(&o1);
    let tag = h.call_proto("Object", "toString", o2.clone(), &[]).unwrap();
    assert_eq!(text(&tag), "[object Symbol]");
    assert_eq!(equality(&h, &s1, &o2), (true, false));
    assert_eq!(equality(&h, &o1, &o1), (true, true));
    assert_eq!(equality(&h, &o1, &o2), (true, true));
}

#[test]
fn test_wrappers_loosely_equal_by_symbol_identity() {
    let h = Harness::new();
    let s1 = h.symbol(Some("foo"));
    let s2 = h.symbol(Some("foo"));
    let o1 = h.object(&s1);
    let o2 = h.object(&s2);
    let o1_again = h.object(&s1);
    assert_eq!(equality(&h, &s1, &s2), (false, false));
    assert_eq!(equality(&h, &o1, &s2), (false, false));
    assert_eq!(equality(&h, &o1, &o2), (false, false));
    assert_eq!(equality(&h, &o1, &o1_again), (true, false));
}

#[test]
fn test_implicit_to_string_is_rejected() {
    let h = Harness::new();
    let s1 = h.symbol(Some("123"));
    let err = h.call_global("parseFloat", &[s1.clone()]).unwrap_err();
    assert_eq!(err.error_name(), "TypeError");
    assert!(matches!(
        err,
        VmError::Coercion(CoercionError {
            target: CoercionTarget::String,
            via_wrapper: false
        })
    ));
    assert!(err.is_symbol_misuse());

    let err = h.call_global("parseInt", &[s1]).unwrap_err();
    assert_eq!(err.error_name(), "TypeError");
}

#[test]
fn test_string_call_describes_plain_symbols_only() {
    let h = Harness::new();
    let s1 = h.symbol(Some("123"));
    assert_eq!(h.string_of(&s1).unwrap(), "Symbol(123)");

    let o1 = h.object(&h.symbol(Some("foo")));
    let err = h.string_of(&o1).unwrap_err();
    assert!(matches!(
        err,
        VmError::Coercion(CoercionError {
            target: CoercionTarget::String,
            via_wrapper: true
        })
    ));

    // new String(sym) uses plain ToString
    let err = h.construct_global("String", &[s1]).unwrap_err();
    assert_eq!(err.error_name(), "TypeError");
}

#[test]
fn test_string_call_has_no_side_effects() {
    let h = Harness::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let proto = h.get(&h.global("Symbol"), "prototype").unwrap();

    let counter = calls.clone();
    let replacement = h.function("replacementToString", 0, move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(js("replaced"))
    });
    h.set_by(&proto, &js("toString"), replacement.clone()).unwrap();
    h.set_by(&proto, &js("valueOf"), replacement.clone()).unwrap();

    // @@toPrimitive is non-writable; make it writable first
    let to_primitive = Value::symbol(to_primitive_symbol());
    h.call_static(
        "Object",
        "defineProperty",
        &[
            proto.clone(),
            to_primitive.clone(),
            h.descriptor(&[("writable", Value::boolean(true))]),
        ],
    )
    .unwrap();
    h.set_by(&proto, &to_primitive, replacement).unwrap();

    let s1 = h.symbol(Some("noSideEffects"));
    assert_eq!(h.string_of(&s1).unwrap(), "Symbol(noSideEffects)");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // The wrapper goes through ToPrimitive and reaches the replacement
    let o1 = h.object(&s1);
    assert_eq!(h.string_of(&o1).unwrap(), "replaced");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_to_boolean_is_always_true() {
    let h = Harness::new();
    let values = [
        h.symbol(Some("123")),
        h.symbol(None),
        h.symbol_for(""),
        h.object(&h.symbol(None)),
    ];
    for value in values {
        let b = h.call_global("Boolean", &[value]).unwrap();
        assert_eq!(b.as_boolean(), Some(true));
    }
}

#[test]
fn test_to_number_is_rejected() {
    let h = Harness::new();
    let s1 = h.symbol(Some("123"));
    let err = h.call_global("Number", &[s1.clone()]).unwrap_err();
    assert!(matches!(
        err,
        VmError::Coercion(CoercionError {
            target: CoercionTarget::Number,
            ..
        })
    ));
    let err = h.call_global("Number", &[h.object(&s1)]).unwrap_err();
    assert_eq!(err.error_name(), "TypeError");
}

#[test]
fn test_wrapper_and_plain_share_a_property_slot() {
    let h = Harness::new();
    let s1 = h.symbol(Some("foo"));
    let o1 = h.object(&s1);
    let s2 = h.symbol(Some("foo"));
    let o2 = h.object(&s2);

    let obj = h.new_object();
    h.set_by(&obj, &s1, js("val")).unwrap();
    assert_eq!(text(&h.get_by(&obj, &o1).unwrap()), "val");
    assert!(h.get_by(&obj, &o2).unwrap().is_undefined());

    assert_eq!(h.string_of(&s1).unwrap(), "Symbol(foo)");
    assert_eq!(text(&h.call_method(&o1, "toString", &[]).unwrap()), "Symbol(foo)");
    assert_eq!(text(&h.call_method(&o2, "toString", &[]).unwrap()), "Symbol(foo)");
}

#[test]
fn test_to_primitive_plain_is_identity() {
    let h = Harness::new();
    let s1 = h.symbol(Some("foo"));
    let mut ncx = h.realm.context();
    for hint in [
        otter_vm_symbols::PreferredType::Default,
        otter_vm_symbols::PreferredType::Number,
        otter_vm_symbols::PreferredType::String,
    ] {
        let prim = ncx.to_primitive(&s1, hint).unwrap();
        assert!(strict_equals(&prim, &s1));
    }
    let o1 = h.object(&s1);
    let prim = ncx.to_primitive(&o1, otter_vm_symbols::PreferredType::Default).unwrap();
    assert!(strict_equals(&prim, &s1));
}

#[test]
fn test_value_of_and_description() {
    let h = Harness::new();
    let s1 = h.symbol(Some("desc"));
    let o1 = h.object(&s1);
    let unwrapped = h.call_method(&o1, "valueOf", &[]).unwrap();
    assert!(strict_equals(&unwrapped, &s1));
    assert_eq!(text(&h.get(&s1, "description").unwrap()), "desc");
    assert_eq!(text(&h.get(&o1, "description").unwrap()), "desc");
    assert!(h.get(&h.symbol(None), "description").unwrap().is_undefined());

    let err = h
        .call_proto("Symbol", "toString", js("not a symbol"), &[])
        .unwrap_err();
    assert_eq!(err.error_name(), "TypeError");
}

#[test]
fn test_to_object_via_context() {
    let h = Harness::new();
    let s1 = h.symbol(Some("ctx"));
    let mut ncx = h.realm.context();
    let wrapper = ncx.to_object(&s1).unwrap();
    assert_eq!(wrapper.symbol_data(), s1.as_symbol());
    assert!(wrapper.get_own_property(&PropertyKey::string("length")).is_none());
}
