//! Error types for value operations.
//!
//! # Structured Error Categories
//!
//! `ValueErrorKind` provides typed error categories. Factory functions
//! (e.g., `kind_mismatch()`) are the public construction API — they populate
//! both `kind` and `message`, and callers that only need the text can read
//! `error.message` directly.
//!
//! Every operation in the value system is fallible: failure conditions
//! surface as typed `ValueError` values and never terminate the host
//! process.

use crate::ops::{BinaryOp, UnaryOp};
use crate::value::Value;
use std::fmt;

/// Result of a value operation.
pub type ValueResult = Result<Value, ValueError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// A conversion with no coercion rule (e.g., map to number).
    KindMismatch { expected: String, got: String },
    /// No dispatch rule for an operator/kind pair.
    UnsupportedOperation {
        left: String,
        right: String,
        op: BinaryOp,
    },
    /// No dispatch rule for a unary operator on this kind.
    UnsupportedUnaryOp { type_name: String, op: UnaryOp },
    /// Integer division by zero.
    DivisionByZero,
    /// Integer modulo by zero.
    ModuloByZero,
    /// List access outside `0..len`.
    IndexOutOfRange { index: i64, len: usize },
    /// Map access with an absent key.
    KeyNotFound { key: String },
    /// Destructive read from an empty collection (shift on empty list).
    EmptyCollection { operation: String },
    /// An extension operation the extension does not override.
    Unimplemented { operation: String, kind: String },
    /// Calling a value that is not a function.
    NotCallable { type_name: String },
    /// Catch-all for errors not categorized into structured kinds.
    Custom { message: String },
}

impl fmt::Display for ValueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KindMismatch { expected, got } => {
                write!(f, "kind mismatch: no rule to convert {got} to {expected}")
            }
            Self::UnsupportedOperation { left, right, op } => {
                if left == right {
                    write!(f, "operator `{}` cannot be applied to {left}", op.as_symbol())
                } else {
                    write!(
                        f,
                        "operator `{}` not supported between {left} and {right}",
                        op.as_symbol()
                    )
                }
            }
            Self::UnsupportedUnaryOp { type_name, op } => {
                write!(
                    f,
                    "unary `{}` cannot be applied to {type_name}",
                    op.as_symbol()
                )
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of size {len}")
            }
            Self::KeyNotFound { key } => write!(f, "key not found: {key}"),
            Self::EmptyCollection { operation } => {
                write!(f, "{operation} on empty collection")
            }
            Self::Unimplemented { operation, kind } => {
                write!(f, "operation {operation} not implemented by {kind}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Value operation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueError {
    /// Structured error category.
    pub kind: ValueErrorKind,
    /// Human-readable error message.
    ///
    /// For factory-created errors, this equals `kind.to_string()`.
    pub message: String,
}

impl ValueError {
    /// Create an error with just a message.
    ///
    /// Uses `Custom` kind. Prefer specific factory functions (e.g.,
    /// `kind_mismatch()`) when a structured kind is available.
    pub fn new(message: impl Into<String>) -> Self {
        let msg = message.into();
        Self {
            kind: ValueErrorKind::Custom {
                message: msg.clone(),
            },
            message: msg,
        }
    }

    /// Create an error from a structured kind.
    ///
    /// The message is computed from the kind's `Display` impl.
    fn from_kind(kind: ValueErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValueError {}

// Conversion Errors

/// No coercion rule from `got` to `expected`.
#[cold]
pub fn kind_mismatch(expected: &str, got: &str) -> ValueError {
    ValueError::from_kind(ValueErrorKind::KindMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

// Operator Errors

/// No dispatch rule for this operator/kind pair.
#[cold]
pub fn unsupported_operation(left: &str, right: &str, op: BinaryOp) -> ValueError {
    ValueError::from_kind(ValueErrorKind::UnsupportedOperation {
        left: left.to_string(),
        right: right.to_string(),
        op,
    })
}

/// No dispatch rule for this unary operator on this kind.
#[cold]
pub fn unsupported_unary_op(type_name: &str, op: UnaryOp) -> ValueError {
    ValueError::from_kind(ValueErrorKind::UnsupportedUnaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

/// Integer division by zero.
#[cold]
pub fn division_by_zero() -> ValueError {
    ValueError::from_kind(ValueErrorKind::DivisionByZero)
}

/// Integer modulo by zero.
#[cold]
pub fn modulo_by_zero() -> ValueError {
    ValueError::from_kind(ValueErrorKind::ModuloByZero)
}

// Collection Errors

/// List index outside `0..len`.
#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> ValueError {
    ValueError::from_kind(ValueErrorKind::IndexOutOfRange { index, len })
}

/// Key absent from a map.
#[cold]
pub fn key_not_found(key: &str) -> ValueError {
    ValueError::from_kind(ValueErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

/// Destructive read from an empty collection.
#[cold]
pub fn empty_collection(operation: &str) -> ValueError {
    ValueError::from_kind(ValueErrorKind::EmptyCollection {
        operation: operation.to_string(),
    })
}

// Extension Errors

/// Extension operation without an override.
#[cold]
pub fn unimplemented_operation(operation: &str, kind: &str) -> ValueError {
    ValueError::from_kind(ValueErrorKind::Unimplemented {
        operation: operation.to_string(),
        kind: kind.to_string(),
    })
}

// Call Errors

/// Value is not callable.
#[cold]
pub fn not_callable(type_name: &str) -> ValueError {
    ValueError::from_kind(ValueErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}
