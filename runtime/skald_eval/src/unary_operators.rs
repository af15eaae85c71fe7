//! Unary operator dispatch.

use skald_value::{unsupported_unary_op, UnaryOp, Value, ValueResult};

/// Apply a unary operator to a value.
///
/// Custom operands delegate to the extension. Negation covers int (wrapping)
/// and float, bitwise complement covers int, and logical not covers every
/// kind with a bool coercion rule.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> ValueResult {
    if let Value::Custom(ext) = value {
        return ext.unary(op);
    }
    match (op, value) {
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::BitNot, Value::Int(n)) => Ok(Value::Int(!n)),
        (UnaryOp::Not, Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_)) => {
            Ok(Value::Bool(!value.to_bool()?))
        }
        (op, other) => Err(unsupported_unary_op(&other.type_name(), op)),
    }
}
