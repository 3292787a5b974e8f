use foundation_json::{from_str, to_string, ErrorKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "serde")]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "serde")]
struct ColoredText {
    color: Rgb,
    text: String,
}

fn message_of<'de, T>(input: &'de str) -> String
where
    T: Deserialize<'de> + std::fmt::Debug,
{
    let err = from_str::<T>(input).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Message(_)), "{:?}", err);
    err.to_string()
}

#[test]
fn struct_serializes_fields_in_declaration_order() {
    let color = Rgb {
        r: 0xFF,
        g: 0,
        b: 0xAC,
    };
    assert_eq!(to_string(&color).unwrap(), r#"{"r":255,"g":0,"b":172}"#);
}

#[test]
fn struct_deserializes_in_any_field_order() {
    let expected = Rgb { r: 0, g: 255, b: 123 };
    assert_eq!(from_str::<Rgb>(r#"{"r":0,"g":255,"b":123}"#).unwrap(), expected);
    assert_eq!(from_str::<Rgb>(r#"{"b":123,"r":0,"g":255}"#).unwrap(), expected);
}

#[test]
fn nested_structs_round_trip() {
    let text = ColoredText {
        color: Rgb { r: 5, g: 25, b: 30 },
        text: "baz".to_owned(),
    };
    let encoded = to_string(&text).unwrap();
    assert_eq!(encoded, r#"{"color":{"r":5,"g":25,"b":30},"text":"baz"}"#);
    assert_eq!(from_str::<ColoredText>(&encoded).unwrap(), text);
}

#[test]
fn special_characters_round_trip() {
    let text = ColoredText {
        color: Rgb { r: 1, g: 2, b: 3 },
        text: "quote \" slash \\ tab \t newline \n snow ☃".to_owned(),
    };
    let encoded = to_string(&text).unwrap();
    assert_eq!(from_str::<ColoredText>(&encoded).unwrap(), text);
}

#[test]
fn duplicate_field_is_rejected() {
    assert_eq!(
        message_of::<Rgb>(r#"{"r":1,"g":2,"r":3,"b":4}"#),
        "duplicate field `r`"
    );
}

#[test]
fn missing_field_is_rejected() {
    assert_eq!(message_of::<Rgb>(r#"{"r":1,"g":2}"#), "missing field `b`");
}

#[test]
fn unknown_field_lists_expected_fields() {
    assert_eq!(
        message_of::<Rgb>(r#"{"r":1,"x":2,"g":3,"b":4}"#),
        "unknown field `x`, expected one of: r, g, b"
    );
}

#[test]
fn structural_errors_carry_their_kind() {
    let kind = |input: &str| from_str::<Rgb>(input).unwrap_err().kind().clone();
    assert_eq!(kind("[1,2,3]"), ErrorKind::ExpectedMap);
    assert_eq!(kind(r#"{"r":"red","g":0,"b":0}"#), ErrorKind::ExpectedInteger);
    assert_eq!(kind(r#"{"r":256,"g":0,"b":0}"#), ErrorKind::NumberOutOfRange);
    assert_eq!(kind(r#"{"r":1,"g":2,"b":3"#), ErrorKind::Eof);
    assert_eq!(kind(r#"{"r":1,"g":2,"b":3}}"#), ErrorKind::TrailingCharacters);
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(crate = "serde")]
struct Borrowed<'a> {
    name: &'a str,
}

#[test]
fn borrowed_fields_point_into_the_input() {
    let input = String::from(r#"{"name":"plain"}"#);
    let parsed: Borrowed<'_> = from_str(&input).unwrap();
    assert_eq!(parsed.name, "plain");
    assert!(input.as_ptr() <= parsed.name.as_ptr());
}

#[test]
fn escaped_strings_cannot_be_borrowed() {
    assert_eq!(
        message_of::<Borrowed<'_>>(r#"{"name":"a\tb"}"#),
        "invalid type: string \"a\\tb\", expected a borrowed string"
    );
}
