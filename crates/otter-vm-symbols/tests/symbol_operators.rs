//! Arithmetic and relational operators with symbol operands.

mod common;

use common::{Harness, js};
use otter_vm_symbols::Value;
use otter_vm_symbols::operations::{
    BinaryOp, RelationalOp, UnaryOp, binary, relational, type_of, unary,
};

fn assert_type_error<T: std::fmt::Debug>(result: otter_vm_symbols::VmResult<T>) {
    let err = result.unwrap_err();
    assert_eq!(err.error_name(), "TypeError", "unexpected error: {err}");
    assert!(err.is_symbol_misuse(), "not a symbol misuse: {err}");
}

#[test]
fn test_arithmetic_between_symbols() {
    let h = Harness::new();
    let s1 = h.symbol(Some("foo"));
    let s2 = h.symbol(Some("foo"));
    let mut ncx = h.realm.context();
    for op in [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Rem,
    ] {
        assert_type_error(binary(&mut ncx, op, &s1, &s2));
    }
    assert_type_error(unary(&mut ncx, UnaryOp::Plus, &s2));
    assert_type_error(unary(&mut ncx, UnaryOp::Minus, &s2));
}

#[test]
fn test_addition_with_mixed_types() {
    let h = Harness::new();
    let s1 = h.symbol(Some("foo"));
    let mut ncx = h.realm.context();
    let others = [js("foo"), Value::number(123.0)];
    for other in &others {
        assert_type_error(binary(&mut ncx, BinaryOp::Add, other, &s1));
        assert_type_error(binary(&mut ncx, BinaryOp::Add, &s1, other));
    }
}

#[test]
fn test_relational_with_every_mix() {
    let h = Harness::new();
    let s1 = h.symbol(Some("foo"));
    let s2 = h.symbol(Some("foo"));
    let ops = [
        RelationalOp::Lt,
        RelationalOp::Le,
        RelationalOp::Gt,
        RelationalOp::Ge,
    ];
    let pairs = [
        (s1.clone(), s2.clone()),
        (js("foo"), s1.clone()),
        (s1.clone(), js("foo")),
        (Value::number(123.0), s1.clone()),
        (s1.clone(), Value::number(123.0)),
    ];
    let mut ncx = h.realm.context();
    for (lhs, rhs) in &pairs {
        for op in ops {
            assert_type_error(relational(&mut ncx, op, lhs, rhs));
        }
    }
}

#[test]
fn test_wrapped_operands_fail_after_unwrapping() {
    let h = Harness::new();
    let o1 = h.object(&h.symbol(Some("foo")));
    let mut ncx = h.realm.context();
    assert_type_error(binary(&mut ncx, BinaryOp::Add, &o1, &js("x")));
    assert_type_error(binary(&mut ncx, BinaryOp::Mul, &o1, &Value::number(2.0)));
    assert_type_error(unary(&mut ncx, UnaryOp::Minus, &o1));
    assert_type_error(relational(&mut ncx, RelationalOp::Lt, &o1, &Value::number(1.0)));
    assert_type_error(relational(&mut ncx, RelationalOp::Ge, &js("a"), &o1));
}

#[test]
fn test_non_symbol_operators_still_work() {
    let h = Harness::new();
    let mut ncx = h.realm.context();
    let r = binary(&mut ncx, BinaryOp::Sub, &js("5"), &Value::number(2.0)).unwrap();
    assert_eq!(r.as_number(), Some(3.0));
    assert!(relational(&mut ncx, RelationalOp::Le, &Value::number(1.0), &js("1")).unwrap());
}

#[test]
fn test_typeof() {
    let h = Harness::new();
    let s1 = h.symbol(Some("123"));
    assert_eq!(type_of(&s1), "symbol");
    assert_eq!(type_of(&h.symbol(None)), "symbol");
    assert_eq!(type_of(&h.symbol_for("ops.typeof")), "symbol");
    assert_eq!(type_of(&h.object(&s1)), "object");
    assert_eq!(type_of(&h.global("Symbol")), "function");
}
