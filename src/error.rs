//! Error type shared by the generator, the codec, and the store boundary.

use thiserror::Error;

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by UUID generation and decoding.
///
/// Generation errors come from the injected random source. Decode errors carry the offending
/// input so that the message alone is enough to locate the bad value.
#[derive(Error, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The random source failed while producing bytes for `context`.
    #[error("failed to read random data for {context}: {reason}")]
    RandomSource {
        /// The generation step that requested the bytes.
        context: &'static str,
        /// Message reported by the random source.
        reason: String,
    },

    /// No network interface with a hardware address could be found.
    ///
    /// The generator recovers from this by substituting a random node id, so callers of the
    /// generation methods never see it.
    #[error("hardware address unavailable: {0}")]
    HardwareAddressUnavailable(String),

    /// The input length is not one of the accepted lengths.
    #[error("incorrect UUID length {len}: {input:?}")]
    InvalidLength {
        /// The rejected input.
        input: String,
        /// Length of the rejected input in bytes.
        len: usize,
    },

    /// A dash, brace, or URN prefix is missing or misplaced.
    #[error("incorrect UUID format: {input:?}")]
    MalformedSeparator {
        /// The rejected input.
        input: String,
    },

    /// A non-hexadecimal character appears where a hex digit is expected.
    #[error("invalid hex digit in UUID: {input:?}")]
    InvalidHexDigit {
        /// The rejected input.
        input: String,
    },

    /// A store value has a type that cannot be read as a UUID.
    #[error("cannot convert {type_name} to UUID")]
    UnsupportedScanType {
        /// Name of the store value type.
        type_name: &'static str,
    },
}

impl Error {
    pub(crate) fn random_source(context: &'static str, err: rand::Error) -> Self {
        Self::RandomSource {
            context,
            reason: err.to_string(),
        }
    }

    pub(crate) fn invalid_length(input: &[u8]) -> Self {
        Self::InvalidLength {
            input: String::from_utf8_lossy(input).into_owned(),
            len: input.len(),
        }
    }

    pub(crate) fn malformed_separator(input: &[u8]) -> Self {
        Self::MalformedSeparator {
            input: String::from_utf8_lossy(input).into_owned(),
        }
    }

    pub(crate) fn invalid_hex_digit(input: &[u8]) -> Self {
        Self::InvalidHexDigit {
            input: String::from_utf8_lossy(input).into_owned(),
        }
    }
}
