/// Default recursion limit for nested lists and dictionaries.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default upper bound for a single byte string payload (64 MiB).
pub const DEFAULT_MAX_STRING_LEN: usize = 64 * 1024 * 1024;

/// Default upper bound for the digits of one integer literal.
pub const DEFAULT_MAX_INTEGER_LEN: usize = 1024;

/// What to do when a dictionary repeats a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// The later value replaces the earlier one, keeping the key's first position.
    #[default]
    LastWins,
    /// Fail with [`BencodeError::DuplicateKey`](super::BencodeError::DuplicateKey).
    Reject,
}

/// Limits and strictness knobs for decoding.
///
/// The defaults accept everything the format grammar allows while bounding
/// memory and recursion on hostile input.
///
/// # Examples
///
/// ```
/// use bcoding::bencode::{decode_buffer_with, DecodeOptions, DuplicateKeys};
///
/// let opts = DecodeOptions::default()
///     .max_depth(8)
///     .duplicate_keys(DuplicateKeys::Reject);
///
/// assert!(decode_buffer_with(b"d1:ai1e1:ai2ee", &opts).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub max_depth: usize,
    pub max_string_len: usize,
    pub max_integer_len: usize,
    pub duplicate_keys: DuplicateKeys,
    /// Reject `i-0e`, and leading zeros in integers and string length prefixes.
    pub strict_integers: bool,
    /// Make the buffer adapter fail if bytes remain after the value.
    pub reject_trailing: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_integer_len: DEFAULT_MAX_INTEGER_LEN,
            duplicate_keys: DuplicateKeys::LastWins,
            strict_integers: false,
            reject_trailing: false,
        }
    }
}

impl DecodeOptions {
    /// Canonical-only decoding: strict integers, unique keys, no trailing bytes.
    pub fn strict() -> Self {
        Self {
            duplicate_keys: DuplicateKeys::Reject,
            strict_integers: true,
            reject_trailing: true,
            ..Self::default()
        }
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = len;
        self
    }

    pub fn max_integer_len(mut self, len: usize) -> Self {
        self.max_integer_len = len;
        self
    }

    pub fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    pub fn strict_integers(mut self, strict: bool) -> Self {
        self.strict_integers = strict;
        self
    }

    pub fn reject_trailing(mut self, reject: bool) -> Self {
        self.reject_trailing = reject;
        self
    }
}
