//! bcoding - Bencode encoding and decoding
//!
//! Bencode is the self-delimiting serialization format BitTorrent uses for
//! `.torrent` metainfo, tracker responses, and DHT messages.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode value model, stream and buffer codecs
//!
//! # Examples
//!
//! ```
//! use bcoding::{decode_buffer, encode_buffer, Value};
//!
//! let value = decode_buffer(b"d2:hii1ee").unwrap();
//! assert_eq!(value.get(b"hi"), Some(&Value::from(1)));
//! assert_eq!(encode_buffer(&value).unwrap(), b"d2:hii1ee");
//! ```

pub mod bencode;

pub use bencode::{
    decode, decode_buffer, decode_buffer_with, encode, encode_buffer, BencodeError,
    DecodeOptions, Decoder, Dict, DuplicateKeys, Value,
};
