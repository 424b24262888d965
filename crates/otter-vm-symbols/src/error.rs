//! VM error types

use crate::value::Value;
use thiserror::Error;

/// The conversion a [`CoercionError`] refused to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoercionTarget {
    /// ToNumber / ToNumeric / ToInteger and every arithmetic operand path
    Number,
    /// Implicit ToString (concatenation, `parseFloat`, `Symbol(sym)`, ...)
    String,
}

impl std::fmt::Display for CoercionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => f.write_str("number"),
            Self::String => f.write_str("string"),
        }
    }
}

/// A disallowed coercion of a symbol operand.
///
/// Raised by the coercion guard; there is no fallback for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot convert a Symbol value to a {target}")]
pub struct CoercionError {
    /// The conversion that was attempted
    pub target: CoercionTarget,
    /// True when the symbol was reached by unwrapping a Symbol object
    pub via_wrapper: bool,
}

impl CoercionError {
    /// Rejection for a plain symbol operand
    pub const fn plain(target: CoercionTarget) -> Self {
        Self {
            target,
            via_wrapper: false,
        }
    }
}

/// VM execution errors
#[derive(Debug, Error)]
pub enum VmError {
    /// Type error (e.g., calling non-function)
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Range error (e.g., JSON nesting too deep)
    #[error("RangeError: {0}")]
    RangeError(String),

    /// Symbol operand hit a forbidden coercion path
    #[error("TypeError: {0}")]
    Coercion(#[from] CoercionError),

    /// A call-only builtin was invoked with `new`
    #[error("TypeError: {callee} is not a constructor")]
    ConstructionMisuse {
        /// Name of the builtin that was constructed
        callee: String,
    },

    /// Internal error
    #[error("InternalError: {0}")]
    InternalError(String),

    /// Stack overflow
    #[error("RangeError: Maximum call stack size exceeded")]
    StackOverflow,

    /// Thrown JS exception
    #[error("Uncaught exception: {0}")]
    Exception(Box<ThrownValue>),
}

/// A thrown JavaScript value
#[derive(Debug)]
pub struct ThrownValue {
    /// The thrown value
    pub value: Value,
    /// The thrown value (as a string representation)
    pub message: String,
}

impl std::fmt::Display for ThrownValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl VmError {
    /// Create a type error
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a range error
    pub fn range_error(msg: impl Into<String>) -> Self {
        Self::RangeError(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Create a construction misuse error for `callee`
    pub fn construction_misuse(callee: impl Into<String>) -> Self {
        Self::ConstructionMisuse {
            callee: callee.into(),
        }
    }

    /// Create an exception from a thrown JS value
    pub fn exception(value: Value) -> Self {
        let message = match value.as_string() {
            Some(s) => s.as_str().to_string(),
            None => format!("{:?}", value),
        };
        Self::Exception(Box::new(ThrownValue { message, value }))
    }

    /// The error class a script would observe in `e.name`.
    pub fn error_name(&self) -> &'static str {
        match self {
            Self::TypeError(_) | Self::Coercion(_) | Self::ConstructionMisuse { .. } => {
                "TypeError"
            }
            Self::RangeError(_) | Self::StackOverflow => "RangeError",
            Self::InternalError(_) => "InternalError",
            Self::Exception(_) => "Error",
        }
    }

    /// True for both symbol-specific failure kinds.
    pub fn is_symbol_misuse(&self) -> bool {
        matches!(self, Self::Coercion(_) | Self::ConstructionMisuse { .. })
    }
}

/// Result type for VM operations
pub type VmResult<T> = std::result::Result<T, VmError>;
