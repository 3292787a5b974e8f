//! Compact JSON writer.

use core::fmt;

use serde::ser::{self, Serialize, SerializeSeq, SerializeStruct};

use crate::error::{Error, ErrorKind, Result};

/// Writes JSON into any [`fmt::Write`] sink without insignificant
/// whitespace.
pub struct Serializer<W> {
    writer: W,
}

impl<W: fmt::Write> Serializer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_float<F: fmt::Debug>(&mut self, value: F, finite: bool) -> Result<()> {
        if !finite {
            return Err(Error::new(ErrorKind::NonFiniteFloat));
        }
        write!(self.writer, "{:?}", value)?;
        Ok(())
    }
}

pub(crate) fn write_escaped_string<W: fmt::Write>(out: &mut W, value: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in value.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{0008}' => out.write_str("\\b")?,
            '\u{000C}' => out.write_str("\\f")?,
            c if c.is_control() => write!(out, "\\u{:04X}", u32::from(c))?,
            other => out.write_char(other)?,
        }
    }
    out.write_char('"')
}

impl<'a, W: fmt::Write> ser::Serializer for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = Compound<'a, W>;
    type SerializeStruct = Compound<'a, W>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.writer.write_str(if v { "true" } else { "false" })?;
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        write!(self.writer, "{}", v)?;
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        write!(self.writer, "{}", v)?;
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.write_float(v, v.is_finite())
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.write_float(v, v.is_finite())
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.serialize_str(v.encode_utf8(&mut [0u8; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        write_escaped_string(&mut self.writer, v)?;
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.writer.write_str("null")?;
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound<'a, W>> {
        self.writer.write_char('[')?;
        Ok(Compound::new(self))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Compound<'a, W>> {
        self.writer.write_char('{')?;
        Ok(Compound::new(self))
    }
}

/// Open array or object. The separator goes before every element but the
/// first.
pub struct Compound<'a, W> {
    ser: &'a mut Serializer<W>,
    first: bool,
}

impl<'a, W: fmt::Write> Compound<'a, W> {
    fn new(ser: &'a mut Serializer<W>) -> Self {
        Self { ser, first: true }
    }

    fn separate(&mut self) -> Result<()> {
        if !self.first {
            self.ser.writer.write_char(',')?;
        }
        self.first = false;
        Ok(())
    }
}

impl<'a, W: fmt::Write> SerializeSeq for Compound<'a, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.separate()?;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.ser.writer.write_char(']')?;
        Ok(())
    }
}

impl<'a, W: fmt::Write> SerializeStruct for Compound<'a, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.separate()?;
        write_escaped_string(&mut self.ser.writer, key)?;
        self.ser.writer.write_char(':')?;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.ser.writer.write_char('}')?;
        Ok(())
    }
}
