//! Element cursor for arrays and objects.

use serde::de::{DeserializeSeed, MapAccess, SeqAccess};

use crate::de::Deserializer;
use crate::error::{Error, ErrorKind, Result};

/// Walks the elements of one array or object. The caller has consumed the
/// opening bracket and consumes the closing one after the visitor returns.
pub struct CommaSeparated<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
    first: bool,
}

impl<'a, 'de> CommaSeparated<'a, 'de> {
    pub(crate) fn new(de: &'a mut Deserializer<'de>) -> Self {
        CommaSeparated { de, first: true }
    }

    /// `false` at the closing bracket; otherwise consumes the separator that
    /// must precede every element after the first.
    fn has_next(&mut self, close: char, comma: ErrorKind) -> Result<bool> {
        if self.de.peek_char()? == close {
            return Ok(false);
        }
        if !self.first {
            self.de.expect_char(',', comma)?;
        }
        self.first = false;
        Ok(true)
    }
}

impl<'de, 'a> SeqAccess<'de> for CommaSeparated<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        if !self.has_next(']', ErrorKind::ExpectedArrayComma)? {
            return Ok(None);
        }
        seed.deserialize(&mut *self.de).map(Some)
    }
}

impl<'de, 'a> MapAccess<'de> for CommaSeparated<'a, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        if !self.has_next('}', ErrorKind::ExpectedMapComma)? {
            return Ok(None);
        }
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        self.de.expect_char(':', ErrorKind::ExpectedMapColon)?;
        seed.deserialize(&mut *self.de)
    }
}
