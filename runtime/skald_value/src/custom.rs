//! Extension point for host-defined value kinds.
//!
//! A flat capability interface: one method per coercion-engine and
//! collection-protocol operation, each defaulting to an `Unimplemented`
//! failure. A concrete extension overrides only the operations it supports
//! and participates in the universal value type through `Value::custom`.
//!
//! Mutating operations take `&self` — the extension payload is shared
//! between every `Value` that aliases it, so extensions use interior
//! mutability of their own choosing.

use std::fmt;

use crate::errors::{unimplemented_operation, ValueError, ValueResult};
use crate::ops::{BinaryOp, UnaryOp};
use crate::value::Value;

/// Which operand position the extension occupies in a binary operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The extension is the left operand; `other` is the right.
    Left,
    /// The extension is the right operand; `other` is the left.
    Right,
}

/// A host-supplied value kind.
///
/// Only `kind_name` is required. The coercion engine delegates to these
/// methods whenever a custom operand is present; when both operands are
/// custom, the left operand's implementation wins.
pub trait CustomValue: fmt::Debug + Send + Sync {
    /// Self-reported kind tag, surfaced by `Value::type_name`.
    fn kind_name(&self) -> &str;

    /// Binary operator with this extension on `side` and `other` opposite.
    fn binary(&self, op: BinaryOp, other: &Value, side: Side) -> ValueResult {
        let _ = (other, side);
        Err(unimplemented_operation(op.as_symbol(), self.kind_name()))
    }

    /// Unary operator applied to this extension.
    fn unary(&self, op: UnaryOp) -> ValueResult {
        Err(unimplemented_operation(op.as_symbol(), self.kind_name()))
    }

    /// Boolean coercion.
    fn to_bool(&self) -> Result<bool, ValueError> {
        Err(unimplemented_operation("to_bool", self.kind_name()))
    }

    /// Integer coercion.
    fn to_int(&self) -> Result<i64, ValueError> {
        Err(unimplemented_operation("to_int", self.kind_name()))
    }

    /// Float coercion.
    fn to_float(&self) -> Result<f64, ValueError> {
        Err(unimplemented_operation("to_float", self.kind_name()))
    }

    /// Text coercion.
    fn to_text(&self) -> Result<String, ValueError> {
        Err(unimplemented_operation("to_text", self.kind_name()))
    }

    /// Element count.
    fn size(&self) -> Result<usize, ValueError> {
        Err(unimplemented_operation("size", self.kind_name()))
    }

    /// Key membership.
    fn exists(&self, key: &Value) -> Result<bool, ValueError> {
        let _ = key;
        Err(unimplemented_operation("exists", self.kind_name()))
    }

    /// Element read.
    fn get(&self, key: &Value) -> ValueResult {
        let _ = key;
        Err(unimplemented_operation("get", self.kind_name()))
    }

    /// Element write.
    fn set(&self, key: &Value, value: Value) -> Result<(), ValueError> {
        let _ = (key, value);
        Err(unimplemented_operation("set", self.kind_name()))
    }

    /// Tail append.
    fn push(&self, item: Value) -> Result<(), ValueError> {
        let _ = item;
        Err(unimplemented_operation("push", self.kind_name()))
    }

    /// Head removal.
    fn shift(&self) -> ValueResult {
        Err(unimplemented_operation("shift", self.kind_name()))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::errors::ValueErrorKind;

    /// Minimal extension: a counter that only supports size and push.
    #[derive(Debug)]
    struct Counter {
        count: parking_lot::Mutex<usize>,
    }

    impl Counter {
        fn new() -> Self {
            Counter {
                count: parking_lot::Mutex::new(0),
            }
        }
    }

    impl CustomValue for Counter {
        fn kind_name(&self) -> &str {
            "counter"
        }

        fn size(&self) -> Result<usize, ValueError> {
            Ok(*self.count.lock())
        }

        fn push(&self, _item: Value) -> Result<(), ValueError> {
            *self.count.lock() += 1;
            Ok(())
        }
    }

    #[test]
    fn type_name_delegates_to_extension() {
        let v = Value::custom(Counter::new());
        assert_eq!(v.type_name(), "counter");
        assert!(v.is_defined());
    }

    #[test]
    fn overridden_operations_work() {
        let v = Value::custom(Counter::new());
        assert_eq!(v.size().unwrap(), 0);
        v.push(Value::int(1)).unwrap();
        v.push(Value::int(2)).unwrap();
        assert_eq!(v.size().unwrap(), 2);
    }

    #[test]
    fn unoverridden_operations_fail_unimplemented() {
        let v = Value::custom(Counter::new());
        let err = v.shift().unwrap_err();
        assert_eq!(
            err.kind,
            ValueErrorKind::Unimplemented {
                operation: "shift".to_string(),
                kind: "counter".to_string(),
            }
        );
        assert!(v.to_bool().is_err());
        assert!(v.to_text().is_err());
    }

    #[test]
    fn aliases_share_the_extension_payload() {
        let a = Value::custom(Counter::new());
        let b = a.clone();
        b.push(Value::int(1)).unwrap();
        assert_eq!(a.size().unwrap(), 1);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_extensions_are_not_equal() {
        let a = Value::custom(Counter::new());
        let b = Value::custom(Counter::new());
        assert_ne!(a, b);
    }
}
