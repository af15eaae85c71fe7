//! Binary operator dispatch.
//!
//! Dispatch order, first match wins:
//!
//! 1. Extension delegation: a custom operand sees the operator first, and
//!    the left operand wins when both sides are custom.
//! 2. Logical `and`/`or`: both operands coerce to bool; a pair outside the
//!    bool coercion table is an unsupported operation.
//! 3. Same-kind rules: int arithmetic wraps, float follows IEEE 754 with
//!    remainder rounding half to even, strings concatenate for `+`/`<<`.
//! 4. Int/Float promotion: the int side widens to float.
//! 5. String on the left with `+`/`<<` stringifies the right operand.
//! 6. List on the left with `+`/`<<` appends the right operand as a single
//!    trailing element and returns an alias of the same list.
//! 7. Equality between any remaining kind pair is structural.
//! 8. Everything else is an unsupported operation.

use skald_value::{
    division_by_zero, modulo_by_zero, unsupported_operation, BinaryOp, Side, Value, ValueError,
    ValueResult,
};

/// Apply a binary operator to two values.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> ValueResult {
    if let Value::Custom(ext) = &left {
        return ext.binary(op, &right, Side::Left);
    }
    if let Value::Custom(ext) = &right {
        return ext.binary(op, &left, Side::Right);
    }

    // Both operands are already evaluated, so logical operators do not
    // short-circuit here. Callers that need short-circuiting decide before
    // evaluating the right operand. Operand pairs outside the bool coercion
    // table are an unsupported operation, not a coercion failure.
    if matches!(op, BinaryOp::And | BinaryOp::Or) {
        if !has_bool_rule(&left) || !has_bool_rule(&right) {
            return Err(unsupported_operation(
                &left.type_name(),
                &right.type_name(),
                op,
            ));
        }
        let a = left.to_bool()?;
        let b = right.to_bool()?;
        let out = if matches!(op, BinaryOp::And) {
            a && b
        } else {
            a || b
        };
        return Ok(Value::Bool(out));
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(a, b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(a, b, op),
        (Value::Int(a), Value::Float(b)) => eval_float_binary(a as f64, b, op),
        (Value::Float(a), Value::Int(b)) => eval_float_binary(a, b as f64, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(a, b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(&a, &b, op),
        (Value::Str(a), rhs) if matches!(op, BinaryOp::Add | BinaryOp::Shl) => {
            let mut out = (*a).clone();
            out.push_str(&rhs.to_text()?);
            Ok(Value::string(out))
        }
        (list @ Value::List(_), rhs) if matches!(op, BinaryOp::Add | BinaryOp::Shl) => {
            // The right operand goes in whole, even when it is itself a
            // list. The result aliases the receiver, so `(a + x) + y` and
            // `a + x; a + y` leave `a` in the same state.
            list.push(rhs)?;
            Ok(list)
        }
        (lhs, rhs) if matches!(op, BinaryOp::Eq | BinaryOp::NotEq) => {
            Ok(Value::Bool((lhs == rhs) == matches!(op, BinaryOp::Eq)))
        }
        (lhs, rhs) => Err(unsupported_operation(
            &lhs.type_name(),
            &rhs.type_name(),
            op,
        )),
    }
}

/// Apply a compound assignment operator (`+=` and friends) in place.
///
/// A list receiver with `+=`/`<<=` appends through the shared payload, so
/// every alias of the list observes the new element. All other receivers
/// are rebound to the result of the corresponding binary operator.
pub fn evaluate_compound(target: &mut Value, rhs: Value, op: BinaryOp) -> Result<(), ValueError> {
    if op.is_comparison() || matches!(op, BinaryOp::And | BinaryOp::Or) {
        return Err(ValueError::new(format!(
            "operator `{}` has no compound assignment form",
            op.as_symbol()
        )));
    }
    if matches!(target, Value::List(_)) && matches!(op, BinaryOp::Add | BinaryOp::Shl) {
        return target.push(rhs);
    }
    *target = evaluate_binary(target.clone(), rhs, op)?;
    Ok(())
}

/// The kinds `to_bool` has a rule for. Custom operands never reach the
/// logical branch; delegation handles them first.
fn has_bool_rule(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_)
    )
}

/// Integer rules: wrapping arithmetic, trapped division, masked shifts.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> ValueResult {
    let out = match op {
        BinaryOp::Add => Value::Int(a.wrapping_add(b)),
        BinaryOp::Sub => Value::Int(a.wrapping_sub(b)),
        BinaryOp::Mul => Value::Int(a.wrapping_mul(b)),
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            Value::Int(a.wrapping_div(b))
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(modulo_by_zero());
            }
            Value::Int(a.wrapping_rem(b))
        }
        BinaryOp::BitAnd => Value::Int(a & b),
        BinaryOp::BitOr => Value::Int(a | b),
        BinaryOp::BitXor => Value::Int(a ^ b),
        // shift counts are masked to the width of the operand
        BinaryOp::Shl => Value::Int(a.wrapping_shl(b as u32)),
        BinaryOp::Shr => Value::Int(a.wrapping_shr(b as u32)),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::NotEq => Value::Bool(a != b),
        BinaryOp::And | BinaryOp::Or => return Err(unsupported_operation("int", "int", op)),
    };
    Ok(out)
}

/// Float rules: IEEE 754 arithmetic. `%` is the IEEE remainder (the
/// quotient rounds half to even, so the result can be negative), and the
/// shifts scale by a power of two.
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> ValueResult {
    let out = match op {
        BinaryOp::Add => Value::Float(a + b),
        BinaryOp::Sub => Value::Float(a - b),
        BinaryOp::Mul => Value::Float(a * b),
        BinaryOp::Div => Value::Float(a / b),
        BinaryOp::Mod => Value::Float(a - b * (a / b).round_ties_even()),
        BinaryOp::Shl => Value::Float(a * b.exp2()),
        BinaryOp::Shr => Value::Float(a / b.exp2()),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::NotEq => Value::Bool(a != b),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => {
            return Err(unsupported_operation("float", "float", op))
        }
        BinaryOp::And | BinaryOp::Or => return Err(unsupported_operation("float", "float", op)),
    };
    Ok(out)
}

/// Boolean rules: equality and the bitwise connectives.
fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> ValueResult {
    let out = match op {
        BinaryOp::Eq => a == b,
        BinaryOp::NotEq => a != b,
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        _ => return Err(unsupported_operation("bool", "bool", op)),
    };
    Ok(Value::Bool(out))
}

/// String rules: `+` and `<<` both concatenate; equality only, no ordering.
fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> ValueResult {
    match op {
        BinaryOp::Add | BinaryOp::Shl => {
            let mut out = String::with_capacity(a.len() + b.len());
            out.push_str(a);
            out.push_str(b);
            Ok(Value::string(out))
        }
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(unsupported_operation("str", "str", op)),
    }
}
