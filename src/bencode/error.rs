use thiserror::Error;

/// Errors produced while decoding or encoding bencode.
#[derive(Debug, Error)]
pub enum BencodeError {
    /// A tag byte, length prefix, or integer literal does not fit the grammar.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The source ended before the current value was complete.
    #[error("truncated input: unexpected end of input")]
    TruncatedInput,

    /// A dictionary key decoded to something other than a byte string.
    #[error("type mismatch: dictionary key is not a byte string")]
    TypeMismatch,

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("string length {len} exceeds limit of {max} bytes")]
    StringTooLong { len: u64, max: usize },

    #[error("integer literal exceeds digit limit")]
    IntegerTooLong,

    /// Only raised when [`DuplicateKeys::Reject`](super::DuplicateKeys::Reject) is set.
    #[error("duplicate dictionary key: {0}")]
    DuplicateKey(String),

    #[error("trailing data after value")]
    TrailingData,

    #[error("io error: {0}")]
    Io(std::io::Error),
}

impl BencodeError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        BencodeError::MalformedInput(msg.into())
    }
}

impl From<std::io::Error> for BencodeError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => BencodeError::TruncatedInput,
            _ => BencodeError::Io(e),
        }
    }
}
