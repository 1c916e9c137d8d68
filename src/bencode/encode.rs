use super::error::BencodeError;
use super::value::{Dict, Value};
use num_bigint::BigInt;
use std::io::Write;
use tracing::trace;

/// Writes the bencoding of `value` to `writer`.
///
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e`, entries in the dictionary's own order
///
/// Keys are not sorted here. Call [`Value::canonicalize`] first when canonical
/// output matters.
///
/// # Errors
///
/// Returns an error if the writer fails.
///
/// # Examples
///
/// ```
/// use bcoding::bencode::{encode, Dict, Value};
/// use bytes::Bytes;
///
/// let mut dict = Dict::new();
/// dict.insert(Bytes::from_static(b"a"), Value::from(0));
///
/// let mut out = Vec::new();
/// encode(&Value::Dict(dict), &mut out).unwrap();
/// assert_eq!(out, b"d1:ai0ee");
/// ```
pub fn encode<W: Write>(value: &Value, writer: &mut W) -> Result<(), BencodeError> {
    match value {
        Value::Integer(i) => encode_integer(i, writer),
        Value::Bytes(b) => encode_bytes(b, writer),
        Value::List(l) => encode_list(l, writer),
        Value::Dict(d) => encode_dict(d, writer),
    }
}

/// Encodes a value into a fresh byte vector.
///
/// # Examples
///
/// ```
/// use bcoding::bencode::{encode_buffer, Value};
///
/// let list = Value::List(vec![Value::string("a"), Value::from(0)]);
/// assert_eq!(encode_buffer(&list).unwrap(), b"l1:ai0ee");
/// ```
pub fn encode_buffer(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::with_capacity(value.encoded_len());
    encode(value, &mut buf)?;
    trace!(len = buf.len(), "encoded bencode value");
    Ok(buf)
}

fn encode_integer<W: Write>(i: &BigInt, writer: &mut W) -> Result<(), BencodeError> {
    write!(writer, "i{}e", i)?;
    Ok(())
}

fn encode_bytes<W: Write>(b: &[u8], writer: &mut W) -> Result<(), BencodeError> {
    write!(writer, "{}:", b.len())?;
    writer.write_all(b)?;
    Ok(())
}

fn encode_list<W: Write>(list: &[Value], writer: &mut W) -> Result<(), BencodeError> {
    writer.write_all(b"l")?;
    for item in list {
        encode(item, writer)?;
    }
    writer.write_all(b"e")?;
    Ok(())
}

fn encode_dict<W: Write>(dict: &Dict, writer: &mut W) -> Result<(), BencodeError> {
    writer.write_all(b"d")?;
    for (key, val) in dict {
        encode_bytes(key, writer)?;
        encode(val, writer)?;
    }
    writer.write_all(b"e")?;
    Ok(())
}
