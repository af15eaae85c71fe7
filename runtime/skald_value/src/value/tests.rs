#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use super::*;
use crate::errors::ValueErrorKind;
use pretty_assertions::assert_eq;

// === Construction ===

#[test]
fn scalar_factories() {
    assert_eq!(Value::int(42), Value::Int(42));
    assert_eq!(Value::float(1.5), Value::Float(1.5));
    assert_eq!(Value::bool(true), Value::Bool(true));
}

#[test]
fn from_impls_cover_scalar_literals() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(3i64), Value::Int(3));
    assert_eq!(Value::from(2.5f64), Value::Float(2.5));
    assert_eq!(Value::from("hi"), Value::string("hi"));
    assert_eq!(Value::from(String::from("hi")), Value::string("hi"));
}

#[test]
fn from_args_builds_a_string_list() {
    let v = Value::from_args(["prog", "-x", "input"]);
    assert_eq!(v.size().unwrap(), 3);
    assert_eq!(v.get(&Value::int(0)).unwrap(), Value::string("prog"));
    assert_eq!(v.get(&Value::int(2)).unwrap(), Value::string("input"));
}

// === Introspection ===

#[test]
fn undefined_is_a_payload_free_sentinel() {
    let v = Value::Undefined;
    assert!(!v.is_defined());
    assert_eq!(v.type_name(), "undefined");
    assert!(Value::int(0).is_defined());
}

#[test]
fn type_names() {
    assert_eq!(Value::Bool(true).type_name(), "bool");
    assert_eq!(Value::int(1).type_name(), "int");
    assert_eq!(Value::float(1.0).type_name(), "float");
    assert_eq!(Value::string("s").type_name(), "str");
    assert_eq!(Value::empty_list().type_name(), "list");
    assert_eq!(Value::empty_map().type_name(), "map");
    assert_eq!(
        Value::function(|_| Ok(Value::Undefined), "noop").type_name(),
        "function"
    );
}

// === Coercions ===

#[test]
fn to_bool_rules() {
    assert!(Value::Bool(true).to_bool().unwrap());
    assert!(!Value::Bool(false).to_bool().unwrap());
    assert!(Value::int(3).to_bool().unwrap());
    assert!(!Value::int(0).to_bool().unwrap());
    assert!(Value::float(0.5).to_bool().unwrap());
    assert!(!Value::float(0.0).to_bool().unwrap());
    assert!(Value::string("x").to_bool().unwrap());
    assert!(!Value::string("").to_bool().unwrap());
    assert!(Value::empty_list().to_bool().is_err());
    assert!(Value::Undefined.to_bool().is_err());
}

#[test]
fn to_int_rules() {
    assert_eq!(Value::int(7).to_int().unwrap(), 7);
    assert_eq!(Value::Bool(true).to_int().unwrap(), 1);
    assert_eq!(Value::Bool(false).to_int().unwrap(), 0);
    // float truncates toward zero
    assert_eq!(Value::float(2.9).to_int().unwrap(), 2);
    assert_eq!(Value::float(-2.9).to_int().unwrap(), -2);
    assert_eq!(Value::string(" 42 ").to_int().unwrap(), 42);
    assert!(Value::string("forty-two").to_int().is_err());
    assert!(Value::empty_map().to_int().is_err());
}

#[test]
fn to_float_rules() {
    assert_eq!(Value::float(1.25).to_float().unwrap(), 1.25);
    assert_eq!(Value::int(3).to_float().unwrap(), 3.0);
    assert_eq!(Value::Bool(true).to_float().unwrap(), 1.0);
    assert_eq!(Value::string("2.5").to_float().unwrap(), 2.5);
    assert!(Value::string("not a number").to_float().is_err());
    assert!(Value::Undefined.to_float().is_err());
}

#[test]
fn to_text_rules() {
    assert_eq!(Value::string("hi").to_text().unwrap(), "hi");
    assert_eq!(Value::Bool(true).to_text().unwrap(), "true");
    assert_eq!(Value::int(-4).to_text().unwrap(), "-4");
    assert_eq!(Value::float(1.5).to_text().unwrap(), "1.5");
}

#[test]
fn list_to_text_joins_with_single_space() {
    let list = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
    assert_eq!(list.to_text().unwrap(), "1 2 3");
}

#[test]
fn map_to_text_is_a_kind_mismatch() {
    let err = Value::empty_map().to_text().unwrap_err();
    assert_eq!(
        err.kind,
        ValueErrorKind::KindMismatch {
            expected: "str".to_string(),
            got: "map".to_string(),
        }
    );
}

// === Aliasing and reference counts ===

#[test]
fn clone_aliases_composite_payloads() {
    let a = Value::string("shared");
    let b = a.clone();
    let (Value::Str(ha), Value::Str(hb)) = (&a, &b) else {
        panic!("expected strings");
    };
    assert!(Heap::ptr_eq(ha, hb));
    assert_eq!(Heap::ref_count(ha), 2);
}

#[test]
fn dropping_an_alias_decrements_the_count() {
    let a = Value::empty_list();
    {
        let _b = a.clone();
        let Value::List(h) = &a else { unreachable!() };
        assert_eq!(Heap::ref_count(h), 2);
    }
    let Value::List(h) = &a else { unreachable!() };
    assert_eq!(Heap::ref_count(h), 1);
}

#[test]
fn kind_changing_assignment_releases_the_old_payload() {
    let shared = Value::string("payload");
    let Value::Str(h) = &shared else {
        unreachable!()
    };
    let mut other = shared.clone();
    assert_eq!(other, shared);
    assert_eq!(Heap::ref_count(h), 2);
    other = Value::int(1); // releases the string payload exactly once
    assert_eq!(Heap::ref_count(h), 1);
    assert_eq!(other, Value::int(1));
}

// === Equality ===

#[test]
fn same_kind_equality() {
    assert_eq!(Value::int(2), Value::int(2));
    assert_ne!(Value::int(2), Value::int(3));
    assert_eq!(Value::string("a"), Value::string("a"));
    assert_eq!(Value::Undefined, Value::Undefined);
    assert_eq!(
        Value::list(vec![Value::int(1), Value::int(2)]),
        Value::list(vec![Value::int(1), Value::int(2)])
    );
}

#[test]
fn int_float_equality_promotes() {
    assert_eq!(Value::int(2), Value::float(2.0));
    assert_eq!(Value::float(2.0), Value::int(2));
    assert_ne!(Value::int(2), Value::float(2.5));
}

#[test]
fn cross_kind_equality_is_false() {
    assert_ne!(Value::string("1"), Value::int(1));
    assert_ne!(Value::Bool(true), Value::int(1));
    assert_ne!(Value::Undefined, Value::int(0));
}

#[test]
fn map_equality_is_key_value_structural() {
    let a = Value::empty_map();
    a.set(&Value::string("x"), Value::int(1)).unwrap();
    let b = Value::empty_map();
    b.set(&Value::string("x"), Value::int(1)).unwrap();
    assert_eq!(a, b);
    b.set(&Value::string("y"), Value::int(2)).unwrap();
    assert_ne!(a, b);
}

// === Calls ===

#[test]
fn function_values_are_callable() {
    fn sum(args: &[Value]) -> crate::errors::ValueResult {
        let mut total = 0;
        for a in args {
            total += a.to_int()?;
        }
        Ok(Value::int(total))
    }
    let f = Value::function(sum, "sum");
    assert_eq!(
        f.call(&[Value::int(1), Value::int(2)]).unwrap(),
        Value::int(3)
    );
}

#[test]
fn calling_a_non_function_fails() {
    let err = Value::int(1).call(&[]).unwrap_err();
    assert_eq!(
        err.kind,
        ValueErrorKind::NotCallable {
            type_name: "int".to_string()
        }
    );
}

// === Display ===

#[test]
fn display_formats() {
    assert_eq!(Value::Undefined.to_string(), "undefined");
    assert_eq!(Value::int(5).to_string(), "5");
    assert_eq!(Value::string("s").to_string(), "\"s\"");
    assert_eq!(
        Value::list(vec![Value::int(1), Value::int(2)]).to_string(),
        "[1, 2]"
    );
}
