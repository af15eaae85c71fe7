#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{decode, decode_with, DecodeOptions};
use skald_value::Value;

fn key(k: &str) -> Value {
    Value::string(k)
}

#[test]
fn scalar_documents() {
    assert_eq!(decode(b"42").unwrap(), Value::int(42));
    assert_eq!(decode(b"-7").unwrap(), Value::int(-7));
    assert_eq!(decode(b"1.5").unwrap(), Value::float(1.5));
    assert_eq!(decode(b"2e3").unwrap(), Value::float(2000.0));
    assert_eq!(decode(b"-1.5e-1").unwrap(), Value::float(-0.15));
    assert_eq!(decode(b"\"hi\"").unwrap(), Value::string("hi"));
    assert_eq!(decode(b"True").unwrap(), Value::Bool(true));
    assert_eq!(decode(b"False").unwrap(), Value::Bool(false));
    assert_eq!(decode(b"Null").unwrap(), Value::Undefined);
}

#[test]
fn nan_decodes_to_zero() {
    assert_eq!(decode(b"NaN").unwrap(), Value::float(0.0));
    assert_eq!(decode(b"nan").unwrap(), Value::float(0.0));
    let doc = decode(br#"{"x": NaN}"#).unwrap();
    assert_eq!(doc.get(&key("x")).unwrap(), Value::float(0.0));
}

#[test]
fn nested_document() {
    let doc = decode(br#"{"a": 1, "b": [1, 2, 3]}"#).unwrap();
    assert_eq!(doc.size().unwrap(), 2);
    assert_eq!(doc.get(&key("a")).unwrap(), Value::int(1));
    let b = doc.get(&key("b")).unwrap();
    assert_eq!(b.size().unwrap(), 3);
    assert_eq!(b.get(&Value::int(2)).unwrap(), Value::int(3));
}

#[test]
fn empty_containers() {
    assert_eq!(decode(b"[]").unwrap(), Value::empty_list());
    assert_eq!(decode(b"{}").unwrap(), Value::empty_map());
    assert_eq!(decode(b" [ ] ").unwrap(), Value::empty_list());
}

#[test]
fn duplicate_map_keys_keep_the_last_value() {
    let doc = decode(br#"{"k": 1, "k": 2}"#).unwrap();
    assert_eq!(doc.size().unwrap(), 1);
    assert_eq!(doc.get(&key("k")).unwrap(), Value::int(2));
}

#[test]
fn string_escapes() {
    assert_eq!(
        decode(br#""a\tb\nc\"d\\e\/f""#).unwrap(),
        Value::string("a\tb\nc\"d\\e/f")
    );
    assert_eq!(decode(br#""A""#).unwrap(), Value::string("A"));
    assert_eq!(decode(b"\"\\u00E9\"").unwrap(), Value::string("é"));
}

#[test]
fn latin1_bytes_decode_one_to_one() {
    // 0xE9 is é in Latin-1
    let doc = [b'"', 0xE9, b'"'];
    assert_eq!(decode(&doc).unwrap(), Value::string("é"));
}

#[test]
fn unicode_escape_above_0xff_is_rejected() {
    let err = decode(b"\"\\u0100\"").unwrap_err();
    assert!(err.message.contains("\\u0100"));
}

#[test]
fn integer_overflow_falls_back_to_float() {
    // one past i64::MAX
    assert_eq!(
        decode(b"9223372036854775808").unwrap(),
        Value::float(9223372036854775808.0)
    );
    assert_eq!(
        decode(b"9223372036854775807").unwrap(),
        Value::int(i64::MAX)
    );
}

#[test]
fn comments_require_opt_in() {
    let doc = b"[1, # trailing comment\n 2]";
    assert!(decode(doc).is_err());
    let relaxed = DecodeOptions {
        allow_comments: true,
    };
    assert_eq!(
        decode_with(doc, relaxed).unwrap(),
        Value::list(vec![Value::int(1), Value::int(2)])
    );
}

#[test]
fn comment_only_lines_are_skipped() {
    let doc = b"# header\n# more\n{\"a\": 1}\n# footer\n";
    let relaxed = DecodeOptions {
        allow_comments: true,
    };
    let out = decode_with(doc, relaxed).unwrap();
    assert_eq!(out.get(&key("a")).unwrap(), Value::int(1));
}

mod errors {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unterminated_string_reports_the_right_line() {
        let err = decode(b"[\n1,\n\"oops").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn missing_comma_between_entries() {
        let err = decode(br#"{"a": 1 "b": 2}"#).unwrap_err();
        assert!(err.message.contains("expected `,` or `}`"));
        assert!(err.to_string().contains("near"));
    }

    #[test]
    fn non_string_map_key() {
        let err = decode(b"{1: 2}").unwrap_err();
        assert!(err.message.contains("string map key"));
    }

    #[test]
    fn missing_colon() {
        let err = decode(br#"{"a" 1}"#).unwrap_err();
        assert!(err.message.contains("expected `:`"));
    }

    #[test]
    fn trailing_garbage() {
        let err = decode(b"1 2").unwrap_err();
        assert!(err.message.contains("trailing"));
    }

    #[test]
    fn unknown_identifier() {
        let err = decode(b"true").unwrap_err();
        assert!(err.message.contains("unknown identifier `true`"));
    }

    #[test]
    fn empty_input() {
        let err = decode(b"").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("end of input"));
    }

    #[test]
    fn malformed_numbers() {
        assert!(decode(b"-").is_err());
        assert!(decode(b"1.").is_err());
        assert!(decode(b"1e").is_err());
        assert!(decode(b"1e+").is_err());
    }

    #[test]
    fn bad_escape() {
        assert!(decode(br#""\q""#).is_err());
        assert!(decode(br#""\u12""#).is_err());
    }
}

proptest! {
    #[test]
    fn decode_never_panics(input in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&input);
    }

    #[test]
    fn round_trips_integers(n in any::<i64>()) {
        let doc = n.to_string();
        prop_assert_eq!(decode(doc.as_bytes()).unwrap(), Value::int(n));
    }
}
