#![forbid(unsafe_code)]

//! Compact JSON for `foundation_serde`.
//!
//! The writer emits no insignificant whitespace and the reader accepts none,
//! so output of [`to_string`] always reads back with [`from_str`]:
//!
//! ```
//! let encoded = foundation_json::to_string(&vec![Some(69), None]).unwrap();
//! assert_eq!(encoded, "[69,null]");
//! let decoded: Vec<Option<i32>> = foundation_json::from_str(&encoded).unwrap();
//! assert_eq!(decoded, vec![Some(69), None]);
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

mod comma_separated;
mod de;
mod error;
mod ser;

pub use comma_separated::CommaSeparated;
pub use de::{Deserializer, DEFAULT_RECURSION_LIMIT};
pub use error::{Error, ErrorKind, Result};
pub use ser::{Compound, Serializer};

/// Serialize `value` into any [`fmt::Write`] sink.
pub fn to_writer<W, T>(writer: &mut W, value: &T) -> Result<()>
where
    W: fmt::Write,
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(writer);
    value.serialize(&mut serializer)
}

/// Serialize a value into a compact JSON string.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut rendered = String::new();
    to_writer(&mut rendered, value)?;
    trace!(bytes = rendered.len(), "encoded json");
    Ok(rendered)
}

/// Deserialize a value from a JSON string slice. Strings without escapes
/// may be borrowed from `input`.
pub fn from_str<'a, T: Deserialize<'a>>(input: &'a str) -> Result<T> {
    trace!(bytes = input.len(), "decoding json");
    let mut deserializer = Deserializer::from_str(input);
    let result = T::deserialize(&mut deserializer).and_then(|value| {
        deserializer.end()?;
        Ok(value)
    });
    if let Err(err) = &result {
        debug!(
            kind = ?err.kind(),
            remaining = deserializer.remaining().len(),
            "json decode failed"
        );
    }
    result
}

/// Deserialize a value from a byte slice containing JSON.
pub fn from_slice<'a, T: Deserialize<'a>>(input: &'a [u8]) -> Result<T> {
    let text = std::str::from_utf8(input).map_err(|_| Error::new(ErrorKind::Syntax))?;
    from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_input_is_rejected() {
        let err = from_str::<i32>("5 ").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TrailingCharacters);
        assert_eq!(from_str::<i32>("5"), Ok(5));
    }

    #[test]
    fn slices_must_be_utf8() {
        assert_eq!(from_slice::<u32>(b"123"), Ok(123));
        let err = from_slice::<String>(b"\"\xff\"").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Syntax);
    }

    #[test]
    fn writer_appends_to_existing_output() {
        let mut out = String::from("value=");
        to_writer(&mut out, &[true, false]).expect("write");
        assert_eq!(out, "value=[true,false]");
    }
}
