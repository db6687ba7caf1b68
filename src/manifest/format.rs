//! Nested pretty-printing for manifest field values
//!
//! Values spliced into the manifest template sit below a top-level key, so
//! every line after the first has to carry the enclosing indentation. The
//! formatter starts at a base level instead of patching newlines afterwards.

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io;

const INDENT: &[u8] = b"  ";

/// Pretty formatter with two-space indentation starting at `base` levels deep
#[derive(Debug, Clone)]
pub struct NestedFormatter {
    base: usize,
    depth: usize,
    has_value: bool,
}

impl NestedFormatter {
    pub fn new(base: usize) -> Self {
        Self {
            base,
            depth: 0,
            has_value: false,
        }
    }

    fn write_indent<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for _ in 0..self.base + self.depth {
            writer.write_all(INDENT)?;
        }
        Ok(())
    }

    fn begin_nested<W>(&mut self, writer: &mut W, open: &[u8]) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(open)
    }

    fn end_nested<W>(&mut self, writer: &mut W, close: &[u8]) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            self.write_indent(writer)?;
        }
        writer.write_all(close)
    }

    fn begin_entry<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let separator: &[u8] = if first { b"\n" } else { b",\n" };
        writer.write_all(separator)?;
        self.write_indent(writer)
    }
}

impl Formatter for NestedFormatter {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.begin_nested(writer, b"[")
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.end_nested(writer, b"]")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.begin_entry(writer, first)
    }

    fn end_array_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.begin_nested(writer, b"{")
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.end_nested(writer, b"}")
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.begin_entry(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn end_object_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.has_value = true;
        Ok(())
    }
}

/// Serialize `value` as pretty JSON nested `level` indentation levels deep
pub fn to_nested_string<T>(value: &T, level: usize) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, NestedFormatter::new(level));
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}
