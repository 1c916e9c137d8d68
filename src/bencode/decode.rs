use super::error::BencodeError;
use super::options::{DecodeOptions, DuplicateKeys};
use super::value::{Dict, Value};
use bytes::Bytes;
use num_bigint::BigInt;
use std::io::{BufRead, ErrorKind, Read};
use tracing::{debug, trace};

/// What the dispatcher found at a position inside a container.
enum Item {
    Value(Value),
    End,
}

/// Reads bencode values from a buffered byte source.
///
/// The decoder only consumes the bytes belonging to each value, so several
/// concatenated values can be read one after another from the same source.
///
/// # Examples
///
/// ```
/// use bcoding::bencode::{Decoder, Value};
///
/// let mut decoder = Decoder::new(&b"i1e4:spamle"[..]);
/// assert_eq!(decoder.next_value().unwrap(), Some(Value::from(1)));
/// assert_eq!(decoder.next_value().unwrap(), Some(Value::string("spam")));
/// assert_eq!(decoder.next_value().unwrap(), Some(Value::List(vec![])));
/// assert_eq!(decoder.next_value().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct Decoder<R> {
    reader: R,
    opts: DecodeOptions,
}

impl<R: BufRead> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, opts: DecodeOptions) -> Self {
        Self { reader, opts }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decodes exactly one value.
    ///
    /// An empty source is malformed here, since a value was expected.
    pub fn decode_value(&mut self) -> Result<Value, BencodeError> {
        if self.peek()?.is_none() {
            return Err(BencodeError::malformed("expected a value, found end of input"));
        }
        self.decode_at(0)
    }

    /// Decodes the next value, or returns `None` if the source is exhausted.
    pub fn next_value(&mut self) -> Result<Option<Value>, BencodeError> {
        if self.peek()?.is_none() {
            return Ok(None);
        }
        self.decode_at(0).map(Some)
    }

    fn decode_at(&mut self, depth: usize) -> Result<Value, BencodeError> {
        match self.decode_item(depth)? {
            Item::Value(v) => Ok(v),
            Item::End => Err(BencodeError::malformed("unexpected end marker")),
        }
    }

    fn decode_item(&mut self, depth: usize) -> Result<Item, BencodeError> {
        if depth > self.opts.max_depth {
            debug!(max_depth = self.opts.max_depth, "bencode nesting limit exceeded");
            return Err(BencodeError::NestingTooDeep);
        }

        let tag = self.peek()?.ok_or(BencodeError::TruncatedInput)?;
        match tag {
            b'i' => self.decode_integer().map(Item::Value),
            b'l' => self.decode_list(depth).map(Item::Value),
            b'd' => self.decode_dict(depth).map(Item::Value),
            b'0'..=b'9' => self.decode_bytes().map(Item::Value),
            b'e' => {
                self.reader.consume(1);
                Ok(Item::End)
            }
            c => Err(BencodeError::malformed(format!(
                "unexpected byte {:?} where a value was expected",
                c as char
            ))),
        }
    }

    fn decode_integer(&mut self) -> Result<Value, BencodeError> {
        self.expect(b'i')?;

        let mut literal = Vec::new();
        loop {
            match self.next_byte()?.ok_or(BencodeError::TruncatedInput)? {
                b'e' => break,
                b'-' if literal.is_empty() => literal.push(b'-'),
                c @ b'0'..=b'9' => {
                    let digits = literal.len() - usize::from(literal.first() == Some(&b'-'));
                    if digits >= self.opts.max_integer_len {
                        debug!(max = self.opts.max_integer_len, "integer literal too long");
                        return Err(BencodeError::IntegerTooLong);
                    }
                    literal.push(c);
                }
                c => {
                    return Err(BencodeError::malformed(format!(
                        "invalid byte {:?} in integer",
                        c as char
                    )))
                }
            }
        }

        parse_integer(&literal, self.opts.strict_integers).map(Value::Integer)
    }

    fn decode_bytes(&mut self) -> Result<Value, BencodeError> {
        let mut len: u64 = 0;
        let mut digits = 0usize;
        let mut leading_zero = false;
        loop {
            match self.next_byte()?.ok_or(BencodeError::TruncatedInput)? {
                b':' if digits > 0 => break,
                c @ b'0'..=b'9' => {
                    if digits == 0 && c == b'0' {
                        leading_zero = true;
                    }
                    digits += 1;
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(u64::from(c - b'0')))
                        .ok_or_else(|| BencodeError::malformed("string length overflows"))?;
                }
                c => {
                    return Err(BencodeError::malformed(format!(
                        "invalid byte {:?} in string length",
                        c as char
                    )))
                }
            }
        }

        if self.opts.strict_integers && leading_zero && digits > 1 {
            return Err(BencodeError::malformed("string length has leading zeros"));
        }

        let max = self.opts.max_string_len;
        if len > max as u64 {
            debug!(len, max, "byte string exceeds length limit");
            return Err(BencodeError::StringTooLong { len, max });
        }

        // Never trust the prefix for the allocation size.
        let mut buf = Vec::with_capacity((len as usize).min(8 * 1024));
        let read = (&mut self.reader).take(len).read_to_end(&mut buf)?;
        if (read as u64) < len {
            return Err(BencodeError::TruncatedInput);
        }

        Ok(Value::Bytes(Bytes::from(buf)))
    }

    fn decode_list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.expect(b'l')?;

        let mut list = Vec::new();
        while let Item::Value(v) = self.decode_item(depth + 1)? {
            list.push(v);
        }

        Ok(Value::List(list))
    }

    fn decode_dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.expect(b'd')?;

        let mut dict = Dict::new();
        loop {
            let key = match self.decode_item(depth + 1)? {
                Item::End => break,
                Item::Value(Value::Bytes(b)) => b,
                Item::Value(_) => return Err(BencodeError::TypeMismatch),
            };

            let value = match self.decode_item(depth + 1)? {
                Item::Value(v) => v,
                Item::End => {
                    return Err(BencodeError::malformed(format!(
                        "missing value for key {:?}",
                        String::from_utf8_lossy(&key)
                    )))
                }
            };

            if dict.contains_key(&key) {
                let name = String::from_utf8_lossy(&key).into_owned();
                match self.opts.duplicate_keys {
                    DuplicateKeys::Reject => return Err(BencodeError::DuplicateKey(name)),
                    DuplicateKeys::LastWins => {
                        debug!(key = %name, "duplicate dictionary key, keeping last value")
                    }
                }
            }
            dict.insert(key, value);
        }

        Ok(Value::Dict(dict))
    }

    fn peek(&mut self) -> Result<Option<u8>, BencodeError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, BencodeError> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    fn expect(&mut self, tag: u8) -> Result<(), BencodeError> {
        match self.next_byte()? {
            Some(b) if b == tag => Ok(()),
            Some(b) => Err(BencodeError::malformed(format!(
                "expected {:?}, found {:?}",
                tag as char, b as char
            ))),
            None => Err(BencodeError::TruncatedInput),
        }
    }
}

fn parse_integer(literal: &[u8], strict: bool) -> Result<BigInt, BencodeError> {
    let magnitude = literal.strip_prefix(b"-").unwrap_or(literal);
    if magnitude.is_empty() {
        return Err(BencodeError::malformed("integer has no digits"));
    }

    if strict && (literal == b"-0" || (magnitude[0] == b'0' && magnitude.len() > 1)) {
        return Err(BencodeError::malformed(format!(
            "non-canonical integer {}",
            String::from_utf8_lossy(literal)
        )));
    }

    BigInt::parse_bytes(literal, 10).ok_or_else(|| {
        BencodeError::malformed(format!(
            "invalid integer {}",
            String::from_utf8_lossy(literal)
        ))
    })
}

/// Decodes one value from a buffered reader.
///
/// The reader is left positioned right after the value; pass `&mut reader` to
/// keep using it afterwards.
///
/// # Examples
///
/// ```
/// use bcoding::bencode::{decode, Value};
/// use std::io::Cursor;
///
/// let mut stream = Cursor::new(b"d2:hii1ee".to_vec());
/// let value = decode(&mut stream).unwrap();
/// assert_eq!(value.get(b"hi"), Some(&Value::from(1)));
/// assert_eq!(stream.position(), 9);
/// ```
pub fn decode<R: BufRead>(reader: R) -> Result<Value, BencodeError> {
    Decoder::new(reader).decode_value()
}

/// Decodes one value from an in-memory buffer, text or bytes.
///
/// Bytes after the value are ignored; use [`DecodeOptions::reject_trailing`]
/// with [`decode_buffer_with`] to refuse them.
///
/// # Examples
///
/// ```
/// use bcoding::bencode::decode_buffer;
///
/// assert_eq!(decode_buffer(b"3:one").unwrap().as_str(), Some("one"));
/// assert_eq!(decode_buffer("3:two").unwrap().as_str(), Some("two"));
/// assert_eq!(decode_buffer("i-42e").unwrap().as_i64(), Some(-42));
/// ```
pub fn decode_buffer(data: impl AsRef<[u8]>) -> Result<Value, BencodeError> {
    decode_buffer_with(data, &DecodeOptions::default())
}

/// Like [`decode_buffer`], with explicit limits and strictness.
pub fn decode_buffer_with(
    data: impl AsRef<[u8]>,
    opts: &DecodeOptions,
) -> Result<Value, BencodeError> {
    let data = data.as_ref();
    let mut decoder = Decoder::with_options(data, opts.clone());
    let value = decoder.decode_value()?;

    let rest = decoder.into_inner();
    if opts.reject_trailing && !rest.is_empty() {
        return Err(BencodeError::TrailingData);
    }

    trace!(consumed = data.len() - rest.len(), "decoded bencode value");
    Ok(value)
}
