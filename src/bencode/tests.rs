use std::io::{self, BufReader, Cursor, ErrorKind, Read};

use bytes::Bytes;
use num_bigint::BigInt;

use super::*;

fn dict(entries: &[(&str, Value)]) -> Value {
    let mut d = Dict::new();
    for (k, v) in entries {
        d.insert(Bytes::copy_from_slice(k.as_bytes()), v.clone());
    }
    Value::Dict(d)
}

#[test]
fn test_decode_integer() {
    assert_eq!(decode_buffer(b"i42e").unwrap(), Value::from(42));
    assert_eq!(decode_buffer(b"i-42e").unwrap(), Value::from(-42));
    assert_eq!(decode_buffer(b"i0e").unwrap(), Value::from(0));
}

#[test]
fn test_decode_large_integer() {
    let value = decode_buffer("i123456789012345678901234567890e").unwrap();
    let expected: BigInt = "123456789012345678901234567890".parse().unwrap();
    assert_eq!(value, Value::Integer(expected));

    let value = decode_buffer("i-98765432109876543210e").unwrap();
    let expected: BigInt = "-98765432109876543210".parse().unwrap();
    assert_eq!(value.as_integer(), Some(&expected));
}

#[test]
fn test_decode_integer_invalid() {
    assert!(matches!(
        decode_buffer(b"ie"),
        Err(BencodeError::MalformedInput(_))
    ));
    assert!(matches!(
        decode_buffer(b"i-e"),
        Err(BencodeError::MalformedInput(_))
    ));
    assert!(matches!(
        decode_buffer(b"i1-2e"),
        Err(BencodeError::MalformedInput(_))
    ));
    assert!(matches!(
        decode_buffer(b"i+5e"),
        Err(BencodeError::MalformedInput(_))
    ));
    assert!(matches!(
        decode_buffer(b"i4.5e"),
        Err(BencodeError::MalformedInput(_))
    ));
}

#[test]
fn test_decode_integer_leading_zeros() {
    assert_eq!(decode_buffer(b"i03e").unwrap(), Value::from(3));
    assert_eq!(decode_buffer(b"i-0e").unwrap(), Value::from(0));

    let opts = DecodeOptions::default().strict_integers(true);
    assert!(decode_buffer_with(b"i03e", &opts).is_err());
    assert!(decode_buffer_with(b"i-0e", &opts).is_err());
    assert!(decode_buffer_with(b"03:abc", &opts).is_err());
    assert_eq!(decode_buffer_with(b"i0e", &opts).unwrap(), Value::from(0));
    assert_eq!(decode_buffer_with(b"i-10e", &opts).unwrap(), Value::from(-10));
}

#[test]
fn test_decode_bytes() {
    assert_eq!(decode_buffer(b"4:spam").unwrap(), Value::string("spam"));
    assert_eq!(decode_buffer(b"3:one").unwrap().as_str(), Some("one"));
    assert_eq!(decode_buffer("3:two").unwrap().as_str(), Some("two"));
}

#[test]
fn test_decode_empty_values() {
    assert_eq!(decode_buffer(b"0:").unwrap(), Value::Bytes(Bytes::new()));
    assert_eq!(decode_buffer(b"le").unwrap(), Value::List(vec![]));
    assert_eq!(decode_buffer(b"de").unwrap(), Value::Dict(Dict::new()));
}

#[test]
fn test_decode_binary_string() {
    let value = decode_buffer(b"3:\xff\x00\xfe").unwrap();
    assert!(!value.is_text());
    assert_eq!(value.as_str(), None);
    assert_eq!(value.as_bytes().map(|b| b.as_ref()), Some(&b"\xff\x00\xfe"[..]));

    assert!(decode_buffer(b"2:hi").unwrap().is_text());
}

#[test]
fn test_decode_list() {
    let result = decode_buffer(b"l4:spami42ee").unwrap();
    match result {
        Value::List(l) => {
            assert_eq!(l.len(), 2);
            assert_eq!(l[0], Value::string("spam"));
            assert_eq!(l[1], Value::from(42));
        }
        _ => panic!("expected list"),
    }
}

#[test]
fn test_decode_dict() {
    let result = decode_buffer(b"d2:hii1ee").unwrap();
    assert_eq!(result, dict(&[("hi", Value::from(1))]));
    assert_eq!(result.get(b"hi").and_then(Value::as_i64), Some(1));
}

#[test]
fn test_decode_dict_keeps_order() {
    let result = decode_buffer(b"d4:spam4:eggs3:cow3:mooe").unwrap();
    let keys: Vec<&[u8]> = result.as_dict().unwrap().keys().map(|k| k.as_ref()).collect();
    assert_eq!(keys, vec![&b"spam"[..], &b"cow"[..]]);
}

#[test]
fn test_decode_dict_duplicate_keys() {
    let result = decode_buffer(b"d1:ai1e1:bi2e1:ai3ee").unwrap();
    let d = result.as_dict().unwrap();
    assert_eq!(d.len(), 2);
    assert_eq!(d.get_index(0), Some((&Bytes::from_static(b"a"), &Value::from(3))));

    let opts = DecodeOptions::default().duplicate_keys(DuplicateKeys::Reject);
    match decode_buffer_with(b"d1:ai1e1:ai3ee", &opts) {
        Err(BencodeError::DuplicateKey(key)) => assert_eq!(key, "a"),
        other => panic!("expected duplicate key error, got {:?}", other),
    }
}

#[test]
fn test_decode_dict_non_string_key() {
    assert!(matches!(
        decode_buffer(b"di1ei2ee"),
        Err(BencodeError::TypeMismatch)
    ));
    assert!(matches!(
        decode_buffer(b"dlei2ee"),
        Err(BencodeError::TypeMismatch)
    ));
}

#[test]
fn test_decode_dict_missing_value() {
    assert!(matches!(
        decode_buffer(b"d1:ke"),
        Err(BencodeError::MalformedInput(_))
    ));
}

#[test]
fn test_decode_truncated() {
    assert!(matches!(decode_buffer(b"i1"), Err(BencodeError::TruncatedInput)));
    assert!(matches!(decode_buffer(b"l"), Err(BencodeError::TruncatedInput)));
    assert!(matches!(decode_buffer(b"d1:k"), Err(BencodeError::TruncatedInput)));
    assert!(matches!(decode_buffer(b"1:"), Err(BencodeError::TruncatedInput)));
    assert!(matches!(decode_buffer(b"5:abc"), Err(BencodeError::TruncatedInput)));
    assert!(matches!(decode_buffer(b"12"), Err(BencodeError::TruncatedInput)));
    assert!(matches!(decode_buffer(b"li1e"), Err(BencodeError::TruncatedInput)));
    assert!(matches!(decode_buffer(b"d"), Err(BencodeError::TruncatedInput)));
}

#[test]
fn test_decode_malformed() {
    assert!(matches!(decode_buffer(b""), Err(BencodeError::MalformedInput(_))));
    assert!(matches!(decode_buffer(b"x"), Err(BencodeError::MalformedInput(_))));
    assert!(matches!(decode_buffer(b"e"), Err(BencodeError::MalformedInput(_))));
    assert!(matches!(decode_buffer(b"3x:abc"), Err(BencodeError::MalformedInput(_))));
    assert!(matches!(decode_buffer(b"l?e"), Err(BencodeError::MalformedInput(_))));
    assert!(matches!(
        decode_buffer(b"99999999999999999999999:a"),
        Err(BencodeError::MalformedInput(_))
    ));
}

#[test]
fn test_nesting_limit() {
    let mut data = vec![b'l'; 64];
    data.extend(vec![b'e'; 64]);
    assert!(decode_buffer(&data).is_ok());

    let mut data = vec![b'l'; 200];
    data.extend(vec![b'e'; 200]);
    assert!(matches!(decode_buffer(&data), Err(BencodeError::NestingTooDeep)));

    let opts = DecodeOptions::default().max_depth(2);
    assert!(decode_buffer_with(b"llee", &opts).is_ok());
    assert!(matches!(
        decode_buffer_with(b"llleee", &opts),
        Err(BencodeError::NestingTooDeep)
    ));
}

#[test]
fn test_size_limits() {
    let opts = DecodeOptions::default().max_string_len(4);
    assert!(decode_buffer_with(b"4:spam", &opts).is_ok());
    assert!(matches!(
        decode_buffer_with(b"5:spams", &opts),
        Err(BencodeError::StringTooLong { len: 5, max: 4 })
    ));

    // A huge prefix must fail on the limit, not on allocation.
    assert!(matches!(
        decode_buffer(b"18446744073709551615:x"),
        Err(BencodeError::StringTooLong { .. })
    ));

    let opts = DecodeOptions::default().max_integer_len(3);
    assert!(decode_buffer_with(b"i999e", &opts).is_ok());
    assert!(matches!(
        decode_buffer_with(b"i1000e", &opts),
        Err(BencodeError::IntegerTooLong)
    ));
}

#[test]
fn test_trailing_data() {
    assert_eq!(decode_buffer(b"i42eextra").unwrap(), Value::from(42));

    let opts = DecodeOptions::default().reject_trailing(true);
    assert!(matches!(
        decode_buffer_with(b"i42eextra", &opts),
        Err(BencodeError::TrailingData)
    ));
    assert!(decode_buffer_with(b"i42e", &DecodeOptions::strict()).is_ok());
}

#[test]
fn test_stream_leaves_position_after_value() {
    let mut stream = Cursor::new(b"d2:hii1ee4:spam".to_vec());
    let first = decode(&mut stream).unwrap();
    assert_eq!(first, dict(&[("hi", Value::from(1))]));
    assert_eq!(stream.position(), 9);

    let second = decode(&mut stream).unwrap();
    assert_eq!(second, Value::string("spam"));
    assert_eq!(stream.position(), 15);
}

#[test]
fn test_concatenated_values_match_separate_decoding() {
    let parts: [&[u8]; 4] = [b"i-7e", b"l1:ai0ee", b"d1:xle1:yi2ee", b"0:"];
    let joined = parts.concat();

    let mut decoder = Decoder::new(&joined[..]);
    for part in parts {
        let value = decoder.next_value().unwrap().unwrap();
        assert_eq!(value, decode_buffer(part).unwrap());
    }
    assert_eq!(decoder.next_value().unwrap(), None);
    assert!(decoder.into_inner().is_empty());
}

#[test]
fn test_stream_through_small_buffer() {
    let data = b"d4:listl4:spami-3ee5:bytes3:\x01\x02\x03e".to_vec();
    let reader = BufReader::with_capacity(2, &data[..]);
    let value = decode(reader).unwrap();
    assert_eq!(value, decode_buffer(&data).unwrap());
}

/// Serves `data`, then fails every read with `kind`.
struct FailingReader {
    data: &'static [u8],
    kind: ErrorKind,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(self.kind, "source failed"));
        }
        self.data.read(buf)
    }
}

#[test]
fn test_source_errors_mid_payload() {
    let reader = BufReader::new(FailingReader {
        data: b"5:ab",
        kind: ErrorKind::UnexpectedEof,
    });
    assert!(matches!(decode(reader), Err(BencodeError::TruncatedInput)));

    let reader = BufReader::new(FailingReader {
        data: b"5:ab",
        kind: ErrorKind::Other,
    });
    match decode(reader) {
        Err(BencodeError::Io(e)) => assert_eq!(e.kind(), ErrorKind::Other),
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode_buffer(&Value::from(42)).unwrap(), b"i42e");
    assert_eq!(encode_buffer(&Value::from(-42)).unwrap(), b"i-42e");
    assert_eq!(encode_buffer(&Value::from(0)).unwrap(), b"i0e");

    let big: BigInt = "-123456789012345678901234567890".parse().unwrap();
    assert_eq!(
        encode_buffer(&Value::Integer(big)).unwrap(),
        b"i-123456789012345678901234567890e"
    );
}

#[test]
fn test_encode_bytes() {
    assert_eq!(encode_buffer(&Value::string("spam")).unwrap(), b"4:spam");
    assert_eq!(encode_buffer(&Value::string("")).unwrap(), b"0:");
    assert_eq!(encode_buffer(&Value::bytes(b"a:e")).unwrap(), b"3:a:e");
    assert_eq!(
        encode_buffer(&Value::from(vec![0xffu8, 0x00])).unwrap(),
        b"2:\xff\x00"
    );
    // Length counts bytes, not characters.
    assert_eq!(encode_buffer(&Value::from("é")).unwrap(), "2:é".as_bytes());
}

#[test]
fn test_encode_list() {
    let list = Value::List(vec![Value::string("a"), Value::from(0)]);
    assert_eq!(encode_buffer(&list).unwrap(), b"l1:ai0ee");
    assert_eq!(encode_buffer(&Value::List(vec![])).unwrap(), b"le");
}

#[test]
fn test_encode_dict() {
    assert_eq!(
        encode_buffer(&dict(&[("a", Value::from(0))])).unwrap(),
        b"d1:ai0ee"
    );
    assert_eq!(encode_buffer(&Value::Dict(Dict::new())).unwrap(), b"de");
}

#[test]
fn test_encode_dict_uses_insertion_order() {
    let value = dict(&[("zeta", Value::from(1)), ("alpha", Value::from(2))]);
    assert_eq!(
        encode_buffer(&value).unwrap(),
        b"d4:zetai1e5:alphai2ee"
    );
}

#[test]
fn test_encode_to_stream() {
    let mut out = Cursor::new(Vec::new());
    encode(&dict(&[("a", Value::from(0))]), &mut out).unwrap();
    assert_eq!(out.into_inner(), b"d1:ai0ee");
}

#[test]
fn test_encode_is_deterministic() {
    let value = dict(&[
        ("b", Value::List(vec![Value::from(1), Value::string("x")])),
        ("a", dict(&[("nested", Value::from(-5))])),
    ]);
    assert_eq!(encode_buffer(&value).unwrap(), encode_buffer(&value).unwrap());
}

#[test]
fn test_encoded_len() {
    let value = dict(&[
        ("announce", Value::string("http://test.com")),
        ("list", Value::List(vec![Value::from(-12), Value::bytes(&[0; 12])])),
        ("empty", Value::Dict(Dict::new())),
    ]);
    assert_eq!(value.encoded_len(), encode_buffer(&value).unwrap().len());
}

#[test]
fn test_roundtrip() {
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode_buffer(original).unwrap();
    let encoded = encode_buffer(&decoded).unwrap();
    assert_eq!(encoded, original);
}

#[test]
fn test_roundtrip_unsorted_keys() {
    let original = b"d1:zi1e1:al1:xi-2ee1:md0:0:ee";
    let decoded = decode_buffer(original).unwrap();
    assert_eq!(encode_buffer(&decoded).unwrap(), original);
}

#[test]
fn test_roundtrip_values() {
    let big: BigInt = "340282366920938463463374607431768211456".parse().unwrap();
    let value = dict(&[
        ("int", Value::Integer(big)),
        ("text", Value::string("hello")),
        ("raw", Value::bytes(b"\x00\xff\x10")),
        (
            "list",
            Value::List(vec![
                Value::List(vec![]),
                Value::Dict(Dict::new()),
                Value::from(-1),
            ]),
        ),
    ]);
    let decoded = decode_buffer(encode_buffer(&value).unwrap()).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn test_canonicalize() {
    let mut value = dict(&[
        ("b", dict(&[("y", Value::from(1)), ("x", Value::from(2))])),
        ("a", Value::List(vec![dict(&[("d", Value::from(3)), ("c", Value::from(4))])])),
    ]);
    value.canonicalize();
    assert_eq!(
        encode_buffer(&value).unwrap(),
        b"d1:ald1:ci4e1:di3eee1:bd1:xi2e1:yi1eee".as_slice()
    );
}

#[test]
fn test_value_accessors() {
    let value = Value::from(42);
    assert_eq!(value.as_i64(), Some(42));
    assert!(value.as_bytes().is_none());

    let value = Value::string("test");
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());

    let value = dict(&[("k", Value::from(1))]);
    assert_eq!(value.get(b"k"), Some(&Value::from(1)));
    assert_eq!(value.clone().into_dict().map(|d| d.len()), Some(1));
    assert_eq!(Value::from(1).get(b"k"), None);
}

#[test]
fn test_display() {
    let value = decode_buffer(b"d2:hii1e4:listli1e3:\xff\x00ae1:ed0:deee").unwrap();
    assert_eq!(
        value.to_string(),
        r#"{"hi": 1, "list": [1, b"\xff\x00a"], "e": {"": {}}}"#
    );
    assert_eq!(
        format!("{:#}", value),
        "{\n    \"hi\": 1,\n    \"list\": [\n        1,\n        b\"\\xff\\x00a\",\n    ],\n    \"e\": {\n        \"\": {},\n    },\n}"
    );
    assert_eq!(format!("{:#}", Value::List(vec![])), "[]");
    assert_eq!(Value::string("a\"b").to_string(), r#""a\"b""#);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        BencodeError::TruncatedInput.to_string(),
        "truncated input: unexpected end of input"
    );
    let err = decode_buffer(b"x").unwrap_err();
    assert!(err.to_string().starts_with("malformed input:"));
}
