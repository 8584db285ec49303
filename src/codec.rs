//! Binary and text decoding.
//!
//! The accepted text grammar is:
//!
//! ```text
//! uuid      := canonical | hashlike | braced | urn
//! plain     := canonical | hashlike
//! canonical := 8hexdig '-' 4hexdig '-' 4hexdig '-' 4hexdig '-' 12hexdig
//! hashlike  := 32hexdig
//! braced    := '{' canonical '}'
//! urn       := "urn:uuid:" plain
//! ```
//!
//! Hex digits are case-insensitive. Nothing else is accepted: no surrounding whitespace, no
//! partial input, no trailing characters.

use crate::{Error, Uuid};

const URN_PREFIX: &[u8; 9] = b"urn:uuid:";

/// Lengths in hex digits of the canonical groups: time-low, time-mid, time-high-and-version,
/// clock-seq, node.
const BYTE_GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

impl Uuid {
    /// Parses a UUID from any of the four accepted text forms.
    ///
    /// ```rust
    /// use uuidkit::Uuid;
    ///
    /// let expected = Uuid::NAMESPACE_DNS;
    /// for text in [
    ///     "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
    ///     "{6ba7b810-9dad-11d1-80b4-00c04fd430c8}",
    ///     "urn:uuid:6ba7b810-9dad-11d1-80b4-00c04fd430c8",
    ///     "6ba7b8109dad11d180b400c04fd430c8",
    /// ] {
    ///     assert_eq!(Uuid::parse_bytes(text.as_bytes())?, expected);
    /// }
    /// # Ok::<(), uuidkit::Error>(())
    /// ```
    pub fn parse_bytes(text: &[u8]) -> Result<Self, Error> {
        match text.len() {
            32 => decode_hash_like(text),
            36 => decode_canonical(text),
            38 => decode_braced(text),
            41 | 45 => decode_urn(text),
            _ => Err(Error::invalid_length(text)),
        }
    }

    /// Parses a UUID from text, returning [`Uuid::NIL`] on any error.
    pub fn parse_str_or_nil(text: &str) -> Self {
        Self::parse_bytes(text.as_bytes()).unwrap_or(Self::NIL)
    }

    /// Creates a UUID from its binary representation, which must be exactly 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        <[u8; 16]>::try_from(bytes)
            .map(Self::from)
            .map_err(|_| Error::InvalidLength {
                input: hex::encode(bytes),
                len: bytes.len(),
            })
    }

    /// Creates a UUID from its binary representation, returning [`Uuid::NIL`] on any error.
    pub fn from_slice_or_nil(bytes: &[u8]) -> Self {
        Self::from_slice(bytes).unwrap_or(Self::NIL)
    }
}

/// Decodes `6ba7b810-9dad-11d1-80b4-00c04fd430c8`.
fn decode_canonical(text: &[u8]) -> Result<Uuid, Error> {
    if text[8] != b'-' || text[13] != b'-' || text[18] != b'-' || text[23] != b'-' {
        return Err(Error::malformed_separator(text));
    }

    let mut dst = [0u8; 16];
    let mut src_pos = 0;
    let mut dst_pos = 0;
    for (i, group) in BYTE_GROUPS.into_iter().enumerate() {
        if i > 0 {
            src_pos += 1; // dash
        }
        hex::decode_to_slice(
            &text[src_pos..src_pos + group],
            &mut dst[dst_pos..dst_pos + group / 2],
        )
        .map_err(|_| Error::invalid_hex_digit(text))?;
        src_pos += group;
        dst_pos += group / 2;
    }
    Ok(Uuid::from(dst))
}

/// Decodes `6ba7b8109dad11d180b400c04fd430c8`.
fn decode_hash_like(text: &[u8]) -> Result<Uuid, Error> {
    let mut dst = [0u8; 16];
    hex::decode_to_slice(text, &mut dst).map_err(|_| Error::invalid_hex_digit(text))?;
    Ok(Uuid::from(dst))
}

/// Decodes `{6ba7b810-9dad-11d1-80b4-00c04fd430c8}`.
fn decode_braced(text: &[u8]) -> Result<Uuid, Error> {
    match text {
        [b'{', inner @ .., b'}'] => decode_plain(inner).map_err(|err| with_input(err, text)),
        _ => Err(Error::malformed_separator(text)),
    }
}

/// Decodes `urn:uuid:6ba7b810-9dad-11d1-80b4-00c04fd430c8` or
/// `urn:uuid:6ba7b8109dad11d180b400c04fd430c8`.
fn decode_urn(text: &[u8]) -> Result<Uuid, Error> {
    match text.strip_prefix(URN_PREFIX) {
        Some(inner) => decode_plain(inner).map_err(|err| with_input(err, text)),
        None => Err(Error::malformed_separator(text)),
    }
}

/// Decodes the canonical or hash-like form found inside a brace or URN wrapper.
fn decode_plain(text: &[u8]) -> Result<Uuid, Error> {
    match text.len() {
        32 => decode_hash_like(text),
        36 => decode_canonical(text),
        _ => Err(Error::invalid_length(text)),
    }
}

/// Replaces the echoed input of a nested decode error with the full wrapped input.
fn with_input(err: Error, text: &[u8]) -> Error {
    match err {
        Error::InvalidLength { .. } => Error::invalid_length(text),
        Error::MalformedSeparator { .. } => Error::malformed_separator(text),
        Error::InvalidHexDigit { .. } => Error::invalid_hex_digit(text),
        other => other,
    }
}
