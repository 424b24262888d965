//! Operator semantics over [`Value`]s.
//!
//! Operands are coerced through the context, so any symbol operand (plain or
//! wrapped) reaching a numeric or string step raises a coercion error without
//! a fallback.

use std::sync::Arc;

use crate::coercion::PreferredType;
use crate::context::NativeContext;
use crate::error::VmResult;
use crate::string::JsString;
use crate::value::Value;

/// Binary arithmetic operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
}

/// Unary numeric operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Minus,
}

/// Relational operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationalOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

/// Evaluate `lhs op rhs`
pub fn binary(
    ncx: &mut NativeContext<'_>,
    op: BinaryOp,
    lhs: &Value,
    rhs: &Value,
) -> VmResult<Value> {
    if op == BinaryOp::Add {
        let lprim = ncx.to_primitive(lhs, PreferredType::Default)?;
        let rprim = ncx.to_primitive(rhs, PreferredType::Default)?;
        if lprim.is_string() || rprim.is_string() {
            let l = ncx.to_string_value(&lprim)?;
            let r = ncx.to_string_value(&rprim)?;
            let mut out = String::with_capacity(l.as_str().len() + r.as_str().len());
            out.push_str(l.as_str());
            out.push_str(r.as_str());
            return Ok(Value::string(JsString::new_arc(out)));
        }
        let l = ncx.to_number(&lprim)?;
        let r = ncx.to_number(&rprim)?;
        return Ok(Value::number(l + r));
    }

    let l = ncx.to_number(lhs)?;
    let r = ncx.to_number(rhs)?;
    let result = match op {
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => l / r,
        BinaryOp::Rem => l % r,
        BinaryOp::Add => l + r,
    };
    Ok(Value::number(result))
}

/// Evaluate `op operand`
pub fn unary(ncx: &mut NativeContext<'_>, op: UnaryOp, operand: &Value) -> VmResult<Value> {
    let n = ncx.to_number(operand)?;
    Ok(Value::number(match op {
        UnaryOp::Plus => n,
        UnaryOp::Minus => -n,
    }))
}

/// Evaluate `lhs op rhs` for `<`, `<=`, `>`, `>=`
pub fn relational(
    ncx: &mut NativeContext<'_>,
    op: RelationalOp,
    lhs: &Value,
    rhs: &Value,
) -> VmResult<bool> {
    let lprim = ncx.to_primitive(lhs, PreferredType::Number)?;
    let rprim = ncx.to_primitive(rhs, PreferredType::Number)?;

    if let (Some(l), Some(r)) = (lprim.as_string(), rprim.as_string()) {
        let ordering = l.as_str().encode_utf16().cmp(r.as_str().encode_utf16());
        return Ok(match op {
            RelationalOp::Lt => ordering.is_lt(),
            RelationalOp::Le => ordering.is_le(),
            RelationalOp::Gt => ordering.is_gt(),
            RelationalOp::Ge => ordering.is_ge(),
        });
    }

    let l = ncx.to_number(&lprim)?;
    let r = ncx.to_number(&rprim)?;
    // NaN compares false under every operator
    Ok(match op {
        RelationalOp::Lt => l < r,
        RelationalOp::Le => l <= r,
        RelationalOp::Gt => l > r,
        RelationalOp::Ge => l >= r,
    })
}

/// `a === b`
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x.as_str() == y.as_str(),
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Object(x), Value::Object(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

/// `a == b`
///
/// An object compared with a primitive is first reduced with ToPrimitive, so
/// a Symbol wrapper loosely equals its own plain symbol. Two Symbol wrappers
/// are loosely equal when they hold the same symbol.
pub fn loose_equals(ncx: &mut NativeContext<'_>, a: &Value, b: &Value) -> VmResult<bool> {
    match (a, b) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => Ok(true),
        (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => Ok(false),
        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            Ok(ncx.to_number(a)? == ncx.to_number(b)?)
        }
        (Value::Boolean(x), _) => {
            let n = Value::number(if *x { 1.0 } else { 0.0 });
            loose_equals(ncx, &n, b)
        }
        (_, Value::Boolean(y)) => {
            let n = Value::number(if *y { 1.0 } else { 0.0 });
            loose_equals(ncx, a, &n)
        }
        (Value::Object(x), Value::Object(y)) => match (x.symbol_data(), y.symbol_data()) {
            (Some(sx), Some(sy)) => Ok(sx == sy),
            _ => Ok(Arc::ptr_eq(x, y)),
        },
        (Value::Object(_), _) => {
            let prim = ncx.to_primitive(a, PreferredType::Default)?;
            loose_equals(ncx, &prim, b)
        }
        (_, Value::Object(_)) => {
            let prim = ncx.to_primitive(b, PreferredType::Default)?;
            loose_equals(ncx, a, &prim)
        }
        _ => Ok(strict_equals(a, b)),
    }
}

/// `typeof value`
pub fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Undefined => "undefined",
        Value::Null => "object",
        Value::Boolean(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Symbol(_) => "symbol",
        Value::Object(obj) if obj.is_callable() => "function",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realm::Realm;
    use crate::symbol::Symbol;

    #[test]
    fn test_number_arithmetic() {
        let realm = Realm::new();
        let mut ncx = realm.context();
        let r = binary(&mut ncx, BinaryOp::Add, &Value::number(1.0), &Value::number(2.0)).unwrap();
        assert_eq!(r.as_number(), Some(3.0));
        let r = binary(&mut ncx, BinaryOp::Add, &Value::from("a"), &Value::number(1.0)).unwrap();
        assert_eq!(r.as_string().unwrap().as_str(), "a1");
    }

    #[test]
    fn test_symbol_operand_rejected() {
        let realm = Realm::new();
        let mut ncx = realm.context();
        let sym = Value::symbol(Symbol::new(None));
        let err = binary(&mut ncx, BinaryOp::Mul, &sym, &Value::number(2.0)).unwrap_err();
        assert_eq!(err.error_name(), "TypeError");
        assert!(unary(&mut ncx, UnaryOp::Minus, &sym).is_err());
        assert!(relational(&mut ncx, RelationalOp::Lt, &sym, &sym).is_err());
    }

    #[test]
    fn test_string_relational_uses_code_units() {
        let realm = Realm::new();
        let mut ncx = realm.context();
        assert!(relational(&mut ncx, RelationalOp::Lt, &Value::from("a"), &Value::from("b")).unwrap());
        assert!(!relational(&mut ncx, RelationalOp::Gt, &Value::from("a"), &Value::from("b")).unwrap());
    }

    #[test]
    fn test_equality() {
        let realm = Realm::new();
        let mut ncx = realm.context();
        let sym = Value::symbol(Symbol::new(None));
        assert!(strict_equals(&sym, &sym.clone()));
        assert!(!strict_equals(&sym, &Value::symbol(Symbol::new(None))));
        assert!(loose_equals(&mut ncx, &Value::null(), &Value::undefined()).unwrap());
        assert!(loose_equals(&mut ncx, &Value::from("1"), &Value::number(1.0)).unwrap());
        assert!(!loose_equals(&mut ncx, &sym, &Value::from("Symbol()")).unwrap());
    }

    #[test]
    fn test_type_of() {
        assert_eq!(type_of(&Value::symbol(Symbol::new(None))), "symbol");
        assert_eq!(type_of(&Value::null()), "object");
    }
}
