use super::tree::JsonTree;
use minijinja::{Error, ErrorKind, Value};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// Single-line JSON with a space after every `,` and `:`.
///
/// `{"a":1,"b":[1,2]}` is written as `{"a": 1, "b": [1, 2]}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize any value to spaced single-line JSON. Non-ASCII text is kept as is.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// The `tojson` template filter. Parsed documents are written from their source JSON.
pub fn tojson(value: Value) -> Result<String, Error> {
    let result = match value.downcast_object_ref::<JsonTree>() {
        Some(tree) => to_json_string(tree.json()),
        None => to_json_string(&value),
    };
    result.map_err(|e| {
        Error::new(ErrorKind::InvalidOperation, "cannot serialize value to JSON").with_source(e)
    })
}
