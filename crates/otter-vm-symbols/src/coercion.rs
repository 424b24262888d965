//! Coercion guard for symbol operands.
//!
//! Every coercion entry point in [`NativeContext`](crate::NativeContext) asks the
//! guard first. For a non-symbol operand the guard has no opinion and the
//! ordinary algorithm runs. For a plain symbol or a Symbol wrapper the answer
//! comes from a fixed table, so operator and builtin code never branch on
//! symbols themselves.
//!
//! | coercion    | plain symbol       | wrapper |
//! |-------------|--------------------|---------|
//! | ToBoolean   | `true`             | ordinary (objects are truthy) |
//! | ToNumber    | reject             | ordinary (ToPrimitive unwraps, then rejects) |
//! | ToString    | reject             | ordinary (ToPrimitive unwraps, then rejects) |
//! | Describe    | `Symbol(desc)`     | ordinary (falls through to ToString, rejects) |
//! | ToPrimitive | itself, any hint   | ordinary (`@@toPrimitive`, valueOf/toString) |
//! | ToObject    | new wrapper        | the same object |

use crate::error::{CoercionError, CoercionTarget};
use crate::value::Value;

/// Hint passed to ToPrimitive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreferredType {
    /// No hint (`+`, `==`)
    Default,
    /// Number hint
    Number,
    /// String hint
    String,
}

impl PreferredType {
    /// Hint string handed to a `@@toPrimitive` method
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

/// Shape of a symbol operand
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolOperand {
    /// A symbol primitive
    Plain,
    /// A Symbol wrapper object
    Wrapped,
}

/// Conversion being attempted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coercion {
    /// ToBoolean
    ToBoolean,
    /// ToNumber, ToNumeric, ToIntegerOrInfinity and arithmetic operands
    ToNumber,
    /// Implicit ToString
    ToString,
    /// Explicit describe-as-text (`String(v)`)
    Describe,
    /// ToPrimitive, any hint
    ToPrimitive,
    /// ToObject
    ToObject,
}

/// What the coercion engine must do with a symbol operand
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Run the ordinary algorithm
    Defer,
    /// Result is `true`
    Truthy,
    /// Result is the operand itself
    Identity,
    /// Result is `"Symbol(" + description + ")"` from the internal description
    Describe,
    /// Result is a new wrapper around the symbol
    Wrap,
    /// Raise
    Reject(CoercionError),
}

const PLAIN_ROW: [Verdict; 6] = [
    Verdict::Truthy,
    Verdict::Reject(CoercionError::plain(CoercionTarget::Number)),
    Verdict::Reject(CoercionError::plain(CoercionTarget::String)),
    Verdict::Describe,
    Verdict::Identity,
    Verdict::Wrap,
];

const WRAPPED_ROW: [Verdict; 6] = [
    Verdict::Defer,
    Verdict::Defer,
    Verdict::Defer,
    Verdict::Defer,
    Verdict::Defer,
    Verdict::Identity,
];

/// The symbol coercion decision table
pub struct CoercionGuard;

impl CoercionGuard {
    /// Classify `value` as a symbol operand
    pub fn classify(value: &Value) -> Option<SymbolOperand> {
        match value {
            Value::Symbol(_) => Some(SymbolOperand::Plain),
            Value::Object(obj) if obj.symbol_data().is_some() => Some(SymbolOperand::Wrapped),
            _ => None,
        }
    }

    /// Table lookup
    pub const fn decide(operand: SymbolOperand, coercion: Coercion) -> Verdict {
        let column = match coercion {
            Coercion::ToBoolean => 0,
            Coercion::ToNumber => 1,
            Coercion::ToString => 2,
            Coercion::Describe => 3,
            Coercion::ToPrimitive => 4,
            Coercion::ToObject => 5,
        };
        match operand {
            SymbolOperand::Plain => PLAIN_ROW[column],
            SymbolOperand::Wrapped => WRAPPED_ROW[column],
        }
    }

    /// Verdict for `value`, or `None` when it is not a symbol operand
    pub fn check(value: &Value, coercion: Coercion) -> Option<Verdict> {
        let operand = Self::classify(value)?;
        let verdict = Self::decide(operand, coercion);
        if let Verdict::Reject(err) = verdict {
            tracing::trace!(?coercion, ?operand, target = %err.target, "symbol coercion rejected");
        }
        Some(verdict)
    }
}
