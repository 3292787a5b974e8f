//! Compact JSON reader.
//!
//! The reader walks an immutable `&str`, keeping only the unread remainder.
//! Whitespace between tokens is not accepted.

use std::str::FromStr;

use serde::de::{self, Visitor};

use crate::comma_separated::CommaSeparated;
use crate::error::{Error, ErrorKind, Result};

/// Maximum nesting of arrays and objects unless configured otherwise.
pub const DEFAULT_RECURSION_LIMIT: usize = 128;

pub struct Deserializer<'de> {
    input: &'de str,
    depth: usize,
    recursion_limit: Option<usize>,
}

/// A decoded string, borrowed from the input when it contained no escapes.
enum Reference<'de> {
    Borrowed(&'de str),
    Owned(String),
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self {
            input,
            depth: 0,
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
        }
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Allow unbounded nesting. Deeply nested input can then exhaust the
    /// stack.
    pub fn disable_recursion_limit(mut self) -> Self {
        self.recursion_limit = None;
        self
    }

    /// Input not consumed yet.
    pub fn remaining(&self) -> &'de str {
        self.input
    }

    /// Fails with [`ErrorKind::TrailingCharacters`] unless all input was
    /// consumed.
    pub fn end(&self) -> Result<()> {
        if self.input.is_empty() {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::TrailingCharacters))
        }
    }

    pub(crate) fn peek_char(&self) -> Result<char> {
        self.input
            .chars()
            .next()
            .ok_or_else(|| Error::new(ErrorKind::Eof))
    }

    fn next_char(&mut self) -> Result<char> {
        let ch = self.peek_char()?;
        self.input = &self.input[ch.len_utf8()..];
        Ok(ch)
    }

    /// Consumes `expected`, failing with `kind` if something else is next.
    pub(crate) fn expect_char(&mut self, expected: char, kind: ErrorKind) -> Result<()> {
        if self.peek_char()? == expected {
            self.input = &self.input[expected.len_utf8()..];
            Ok(())
        } else {
            Err(Error::new(kind))
        }
    }

    fn consume_literal(&mut self, literal: &str) -> bool {
        match self.input.strip_prefix(literal) {
            Some(rest) => {
                self.input = rest;
                true
            }
            None => false,
        }
    }

    /// `Eof` on empty input, `kind` otherwise.
    fn unexpected(&self, kind: ErrorKind) -> Error {
        if self.input.is_empty() {
            Error::new(ErrorKind::Eof)
        } else {
            Error::new(kind)
        }
    }

    fn parse_bool(&mut self) -> Result<bool> {
        if self.consume_literal("true") {
            Ok(true)
        } else if self.consume_literal("false") {
            Ok(false)
        } else {
            Err(self.unexpected(ErrorKind::ExpectedBoolean))
        }
    }

    fn parse_null(&mut self) -> Result<()> {
        if self.consume_literal("null") {
            Ok(())
        } else {
            Err(self.unexpected(ErrorKind::ExpectedNull))
        }
    }

    /// Reads a run of ASCII digits into a `u64`.
    fn parse_digits(&mut self) -> Result<u64> {
        let len = self
            .input
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if len == 0 {
            return Err(self.unexpected(ErrorKind::ExpectedInteger));
        }
        let mut value: u64 = 0;
        for digit in self.input[..len].bytes() {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(digit - b'0')))
                .ok_or_else(|| Error::new(ErrorKind::NumberOutOfRange))?;
        }
        self.input = &self.input[len..];
        Ok(value)
    }

    fn parse_unsigned<T: TryFrom<u64>>(&mut self) -> Result<T> {
        let value = self.parse_digits()?;
        T::try_from(value).map_err(|_| Error::new(ErrorKind::NumberOutOfRange))
    }

    fn parse_signed<T: TryFrom<i128>>(&mut self) -> Result<T> {
        let negative = self.consume_literal("-");
        let magnitude = i128::from(self.parse_digits()?);
        let value = if negative { -magnitude } else { magnitude };
        T::try_from(value).map_err(|_| Error::new(ErrorKind::NumberOutOfRange))
    }

    /// Values that overflow `F` to infinity fail with
    /// [`ErrorKind::NumberOutOfRange`].
    fn parse_float<F>(&mut self) -> Result<F>
    where
        F: FromStr + Copy + Into<f64>,
    {
        let bytes = self.input.as_bytes();
        let digits_from = |start: usize| {
            bytes[start..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
        };

        let mut len = usize::from(bytes.first() == Some(&b'-'));
        let integral = digits_from(len);
        if integral == 0 {
            return Err(self.unexpected(ErrorKind::ExpectedFloat));
        }
        len += integral;
        if bytes.get(len) == Some(&b'.') {
            let fraction = digits_from(len + 1);
            if fraction == 0 {
                return Err(Error::new(ErrorKind::ExpectedFloat));
            }
            len += 1 + fraction;
        }
        if matches!(bytes.get(len), Some(b'e') | Some(b'E')) {
            len += 1;
            if matches!(bytes.get(len), Some(b'+') | Some(b'-')) {
                len += 1;
            }
            let exponent = digits_from(len);
            if exponent == 0 {
                return Err(Error::new(ErrorKind::ExpectedFloat));
            }
            len += exponent;
        }

        let value: F = self.input[..len]
            .parse()
            .map_err(|_| Error::new(ErrorKind::ExpectedFloat))?;
        if !value.into().is_finite() {
            return Err(Error::new(ErrorKind::NumberOutOfRange));
        }
        self.input = &self.input[len..];
        Ok(value)
    }

    fn parse_string(&mut self) -> Result<Reference<'de>> {
        self.expect_char('"', ErrorKind::ExpectedString)?;
        let input = self.input;
        let stop = input
            .find(|c: char| c == '"' || c == '\\')
            .ok_or_else(|| Error::new(ErrorKind::Eof))?;
        if input.as_bytes()[stop] == b'"' {
            self.input = &input[stop + 1..];
            return Ok(Reference::Borrowed(&input[..stop]));
        }

        let mut owned = String::from(&input[..stop]);
        self.input = &input[stop..];
        loop {
            match self.next_char()? {
                '"' => return Ok(Reference::Owned(owned)),
                '\\' => owned.push(self.parse_escape()?),
                ch => owned.push(ch),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char> {
        let ch = match self.next_char()? {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => return self.parse_unicode_escape(),
            _ => return Err(Error::new(ErrorKind::InvalidEscape)),
        };
        Ok(ch)
    }

    fn parse_hex4(&mut self) -> Result<u16> {
        let hex = self
            .input
            .get(..4)
            .ok_or_else(|| self.unexpected_short_escape())?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::new(ErrorKind::InvalidEscape));
        }
        let value =
            u16::from_str_radix(hex, 16).map_err(|_| Error::new(ErrorKind::InvalidEscape))?;
        self.input = &self.input[4..];
        Ok(value)
    }

    fn unexpected_short_escape(&self) -> Error {
        if self.input.len() < 4 {
            Error::new(ErrorKind::Eof)
        } else {
            Error::new(ErrorKind::InvalidEscape)
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        let high = self.parse_hex4()?;
        if (0xD800..=0xDBFF).contains(&high) {
            if !self.consume_literal("\\u") {
                return Err(self.unexpected(ErrorKind::InvalidEscape));
            }
            let low = self.parse_hex4()?;
            decode_surrogate_pair(high, low).ok_or_else(|| Error::new(ErrorKind::InvalidEscape))
        } else {
            char::from_u32(u32::from(high)).ok_or_else(|| Error::new(ErrorKind::InvalidEscape))
        }
    }

    fn enter_nested(&mut self) -> Result<()> {
        if let Some(limit) = self.recursion_limit {
            if self.depth >= limit {
                return Err(Error::new(ErrorKind::RecursionLimitExceeded));
            }
        }
        self.depth += 1;
        Ok(())
    }

    fn leave_nested(&mut self) {
        self.depth -= 1;
    }
}

fn decode_surrogate_pair(high: u16, low: u16) -> Option<char> {
    if (0xDC00..=0xDFFF).contains(&low) {
        let high_ten = u32::from(high) - 0xD800;
        let low_ten = u32::from(low) - 0xDC00;
        char::from_u32(0x10000 + ((high_ten << 10) | low_ten))
    } else {
        None
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    /// Only scalars are self-describing here: booleans, strings and
    /// integers. Anything else is a syntax error.
    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.peek_char()? {
            't' | 'f' => self.deserialize_bool(visitor),
            '"' => self.deserialize_str(visitor),
            '0'..='9' => self.deserialize_u64(visitor),
            '-' => self.deserialize_i64(visitor),
            _ => Err(Error::new(ErrorKind::Syntax)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_bool(self.parse_bool()?)
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i8(self.parse_signed()?)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i16(self.parse_signed()?)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i32(self.parse_signed()?)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.parse_signed()?)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u8(self.parse_unsigned()?)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u16(self.parse_unsigned()?)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u32(self.parse_unsigned()?)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u64(self.parse_unsigned()?)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f32(self.parse_float()?)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f64(self.parse_float()?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_string()? {
            Reference::Borrowed(s) => visitor.visit_borrowed_str(s),
            Reference::Owned(s) => visitor.visit_string(s),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.peek_char()? == 'n' {
            self.parse_null()?;
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.parse_null()?;
        visitor.visit_unit()
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.expect_char('[', ErrorKind::ExpectedArray)?;
        self.enter_nested()?;
        let value = visitor.visit_seq(CommaSeparated::new(&mut *self));
        self.leave_nested();
        let value = value?;
        self.expect_char(']', ErrorKind::ExpectedArrayEnd)?;
        Ok(value)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.expect_char('{', ErrorKind::ExpectedMap)?;
        self.enter_nested()?;
        let value = visitor.visit_map(CommaSeparated::new(&mut *self));
        self.leave_nested();
        let value = value?;
        self.expect_char('}', ErrorKind::ExpectedMapEnd)?;
        Ok(value)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }
}
