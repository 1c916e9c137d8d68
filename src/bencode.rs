//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Integers are arbitrary precision. Dictionaries keep the order their entries
//! were decoded or inserted in, and encode in that same order.
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use bcoding::bencode::{decode_buffer, Value};
//!
//! // Decode an integer
//! let value = decode_buffer(b"i42e").unwrap();
//! assert_eq!(value.as_i64(), Some(42));
//!
//! // Decode a string
//! let value = decode_buffer(b"4:spam").unwrap();
//! assert_eq!(value.as_str(), Some("spam"));
//!
//! // Decode a list
//! let value = decode_buffer(b"l4:spami42ee").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list.len(), 2);
//!
//! // Decode a dictionary
//! let value = decode_buffer(b"d3:foo3:bare").unwrap();
//! let foo = value.get(b"foo").unwrap();
//! assert_eq!(foo.as_str(), Some("bar"));
//! ```
//!
//! ## Encoding bencode data
//!
//! ```
//! use bcoding::bencode::{encode_buffer, Dict, Value};
//! use bytes::Bytes;
//!
//! let encoded = encode_buffer(&Value::from(42)).unwrap();
//! assert_eq!(encoded, b"i42e");
//!
//! let encoded = encode_buffer(&Value::string("hello")).unwrap();
//! assert_eq!(encoded, b"5:hello");
//!
//! // Dictionaries encode in insertion order
//! let mut dict = Dict::new();
//! dict.insert(Bytes::from_static(b"name"), Value::string("example.txt"));
//! dict.insert(Bytes::from_static(b"length"), Value::from(1024));
//! let encoded = encode_buffer(&Value::Dict(dict)).unwrap();
//! assert_eq!(encoded, b"d4:name11:example.txt6:lengthi1024ee");
//! ```
//!
//! # Error Handling
//!
//! Decoding can fail for various reasons:
//!
//! - [`BencodeError::MalformedInput`] - Input does not follow the grammar
//! - [`BencodeError::TruncatedInput`] - Input ended inside a value
//! - [`BencodeError::TypeMismatch`] - A dictionary key is not a byte string
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded (64 levels by default)
//! - [`BencodeError::StringTooLong`] / [`BencodeError::IntegerTooLong`] - Size limits exceeded
//!
//! Limits and strictness are set through [`DecodeOptions`].
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod display;
mod encode;
mod error;
mod options;
mod value;

pub use decode::{decode, decode_buffer, decode_buffer_with, Decoder};
pub use encode::{encode, encode_buffer};
pub use error::BencodeError;
pub use options::{
    DecodeOptions, DuplicateKeys, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INTEGER_LEN,
    DEFAULT_MAX_STRING_LEN,
};
pub use value::{Dict, Value};

#[cfg(test)]
mod tests;
