use std::fmt;

use foundation_json::{from_str, to_string, Deserializer, ErrorKind};
use serde::de::{self, Visitor};
use serde::Deserialize;

#[test]
fn scalars() {
    assert!(from_str::<bool>("true").unwrap());
    assert!(!from_str::<bool>("false").unwrap());
    assert_eq!(from_str::<u32>("123").unwrap(), 123);
    assert_eq!(from_str::<i32>("-123").unwrap(), -123);
    assert_eq!(from_str::<String>(r#""hello""#).unwrap(), "hello");
    assert_eq!(to_string(&-123i32).unwrap(), "-123");
    assert_eq!(to_string("hello").unwrap(), r#""hello""#);
}

#[test]
fn trailing_whitespace_is_trailing_input() {
    let err = from_str::<i32>("5 ").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::TrailingCharacters);
}

#[test]
fn sequences_and_arrays() {
    assert_eq!(from_str::<Vec<i32>>("[69,420]").unwrap(), vec![69, 420]);
    assert_eq!(from_str::<[i32; 2]>("[69,420]").unwrap(), [69, 420]);
    assert_eq!(to_string(&[69, 420]).unwrap(), "[69,420]");
    assert_eq!(from_str::<Vec<Vec<u8>>>("[[],[1],[2,3]]").unwrap(), vec![vec![], vec![1], vec![2, 3]]);

    let err = from_str::<[i32; 2]>("[1,2,3]").unwrap_err();
    assert_eq!(err.to_string(), "invalid length 3, expected an array of length 2");
    let err = from_str::<[i32; 2]>("[1]").unwrap_err();
    assert_eq!(err.to_string(), "invalid length 1, expected an array of length 2");
}

#[test]
fn options() {
    assert_eq!(to_string(&Some(69)).unwrap(), "69");
    assert_eq!(to_string(&None::<i32>).unwrap(), "null");
    assert_eq!(from_str::<Option<i32>>("69").unwrap(), Some(69));
    assert_eq!(from_str::<Option<i32>>("null").unwrap(), None);
    assert_eq!(
        from_str::<Vec<Option<bool>>>("[true,null,false]").unwrap(),
        vec![Some(true), None, Some(false)]
    );
}

#[test]
fn integer_overflow_is_rejected() {
    let kind = |result: Result<(), foundation_json::Error>| result.unwrap_err().kind().clone();
    assert_eq!(kind(from_str::<u8>("300").map(drop)), ErrorKind::NumberOutOfRange);
    assert_eq!(kind(from_str::<i16>("-40000").map(drop)), ErrorKind::NumberOutOfRange);
    assert_eq!(
        kind(from_str::<u64>("99999999999999999999").map(drop)),
        ErrorKind::NumberOutOfRange
    );
}

#[test]
fn floats_round_trip() {
    for value in [0.1f64, -2.5, 1e-7, 6.02e23, f64::MAX, 0.0] {
        let encoded = to_string(&value).unwrap();
        assert_eq!(from_str::<f64>(&encoded).unwrap(), value, "{}", encoded);
    }
    let encoded = to_string(&0.3f32).unwrap();
    assert_eq!(encoded, "0.3");
    assert_eq!(from_str::<f32>(&encoded).unwrap(), 0.3f32);

    let err = to_string(&f64::INFINITY).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NonFiniteFloat);
}

#[test]
fn unicode_escapes() {
    assert_eq!(from_str::<String>(r#""\u0041\u00e9""#).unwrap(), "Aé");
    assert_eq!(from_str::<String>(r#""\ud83d\ude00""#).unwrap(), "😀");
    assert_eq!(from_str::<char>(r#""\n""#).unwrap(), '\n');
    let control = to_string("\u{0001}").unwrap();
    assert_eq!(control, r#""\u0001""#);
    assert_eq!(from_str::<String>(&control).unwrap(), "\u{0001}");
}

/// Accepts whatever scalar the input holds.
#[derive(Debug, PartialEq)]
enum Scalar {
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar::Bool(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar::Unsigned(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar::Signed(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar::Text(v.to_owned()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

#[test]
fn self_describing_scalars() {
    assert_eq!(from_str::<Scalar>("true").unwrap(), Scalar::Bool(true));
    assert_eq!(from_str::<Scalar>("42").unwrap(), Scalar::Unsigned(42));
    assert_eq!(from_str::<Scalar>("-42").unwrap(), Scalar::Signed(-42));
    assert_eq!(from_str::<Scalar>(r#""x""#).unwrap(), Scalar::Text("x".to_owned()));
    for input in ["null", "[1]", "{}", "1.5x"] {
        let err = from_str::<Scalar>(input).unwrap_err();
        let expected = if input == "1.5x" {
            ErrorKind::TrailingCharacters
        } else {
            ErrorKind::Syntax
        };
        assert_eq!(err.kind(), &expected, "{}", input);
    }
}

#[test]
fn custom_recursion_limit() {
    let mut de = Deserializer::from_str("[[1]]").with_recursion_limit(1);
    let err = Vec::<Vec<u8>>::deserialize(&mut de).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::RecursionLimitExceeded);
    assert_eq!(de.remaining(), "1]]");
}
