use bytes::Bytes;
use indexmap::IndexMap;
use num_bigint::BigInt;

/// A bencode dictionary.
///
/// Entries keep insertion order, which is also the order they are encoded in.
/// Keys are unique; see [`DuplicateKeys`](super::DuplicateKeys) for how decoding
/// treats repeated keys.
pub type Dict = IndexMap<Bytes, Value>;

/// A bencode value.
///
/// Bencode has four data types: integers, byte strings, lists, and dictionaries.
/// This enum represents any bencode value and provides methods for type-safe access.
///
/// Byte strings are stored raw. Whether a payload is text is a question asked of
/// the value ([`as_str`](Value::as_str), [`is_text`](Value::is_text)), not a
/// separate variant.
///
/// # Examples
///
/// ```
/// use bcoding::bencode::Value;
///
/// // Creating values directly
/// let int = Value::from(42);
/// let string = Value::string("hello");
/// let list = Value::List(vec![Value::from(1), Value::from(2)]);
///
/// // Using From implementations
/// let int: Value = 42i64.into();
/// let string: Value = "hello".into();
///
/// // Accessing values
/// assert_eq!(int.as_i64(), Some(42));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert_eq!(list.as_list().map(|l| l.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An arbitrary-precision signed integer.
    Integer(BigInt),
    /// A byte string (may or may not be valid UTF-8).
    Bytes(Bytes),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary with byte string keys, in insertion order.
    Dict(Dict),
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    ///
    /// # Examples
    ///
    /// ```
    /// use bcoding::bencode::Value;
    ///
    /// let value = Value::string("hello");
    /// assert_eq!(value.as_str(), Some("hello"));
    /// ```
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Creates a byte string value from raw bytes.
    pub fn bytes(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }

    /// Returns the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the value as an `i64`, if it is an integer that fits.
    ///
    /// # Examples
    ///
    /// ```
    /// use bcoding::bencode::{decode_buffer, Value};
    ///
    /// assert_eq!(Value::from(42).as_i64(), Some(42));
    ///
    /// let huge = decode_buffer("i123456789012345678901234567890e").unwrap();
    /// assert!(huge.as_integer().is_some());
    /// assert_eq!(huge.as_i64(), None);
    /// ```
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(|i| i64::try_from(i).ok())
    }

    /// Returns the value as a byte string, if it is one.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is a valid UTF-8 byte string.
    ///
    /// Returns `None` if the value is not a byte string or if the bytes are not valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use bcoding::bencode::Value;
    ///
    /// assert_eq!(Value::string("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::bytes(&[0xff, 0xfe]).as_str(), None);
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Whether this is a byte string whose payload is valid UTF-8.
    pub fn is_text(&self) -> bool {
        self.as_str().is_some()
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    pub fn into_dict(self) -> Option<Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key in this value if it is a dictionary.
    ///
    /// # Examples
    ///
    /// ```
    /// use bcoding::bencode::decode_buffer;
    ///
    /// let value = decode_buffer(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }

    /// Sorts dictionary keys bytewise, recursively.
    ///
    /// The encoder writes entries in iteration order, so calling this first is how
    /// to get canonical output.
    ///
    /// # Examples
    ///
    /// ```
    /// use bcoding::bencode::{encode_buffer, Dict, Value};
    /// use bytes::Bytes;
    ///
    /// let mut dict = Dict::new();
    /// dict.insert(Bytes::from_static(b"b"), Value::from(2));
    /// dict.insert(Bytes::from_static(b"a"), Value::from(1));
    /// let mut value = Value::Dict(dict);
    /// assert_eq!(encode_buffer(&value).unwrap(), b"d1:bi2e1:ai1ee");
    ///
    /// value.canonicalize();
    /// assert_eq!(encode_buffer(&value).unwrap(), b"d1:ai1e1:bi2ee");
    /// ```
    pub fn canonicalize(&mut self) {
        match self {
            Value::Integer(_) | Value::Bytes(_) => {}
            Value::List(l) => l.iter_mut().for_each(Value::canonicalize),
            Value::Dict(d) => {
                d.sort_keys();
                d.values_mut().for_each(Value::canonicalize);
            }
        }
    }

    /// Number of bytes [`encode`](super::encode) will write for this value.
    pub fn encoded_len(&self) -> usize {
        match self {
            Value::Integer(i) => 2 + i.to_str_radix(10).len(),
            Value::Bytes(b) => prefixed_len(b.len()),
            Value::List(l) => 2 + l.iter().map(Value::encoded_len).sum::<usize>(),
            Value::Dict(d) => {
                2 + d
                    .iter()
                    .map(|(k, v)| prefixed_len(k.len()) + v.encoded_len())
                    .sum::<usize>()
            }
        }
    }
}

fn prefixed_len(len: usize) -> usize {
    let mut digits = 1;
    let mut n = len / 10;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits + 1 + len
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(BigInt::from(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(BigInt::from(i))
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Value::Integer(BigInt::from(i))
    }
}

impl From<BigInt> for Value {
    fn from(i: BigInt) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(Bytes::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::bytes(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Value::Dict(d)
    }
}
