use std::{fmt, str};

use fstr::FStr;

/// Represents a Universally Unique IDentifier.
///
/// A `Uuid` is a transparent 16-byte value. Its version and variant fields are positional and can
/// be read and rewritten in place through [`Uuid::version`], [`Uuid::variant`],
/// [`Uuid::set_version`], and [`Uuid::set_variant`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

/// The interpretation family encoded in the leading bits of byte 8.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0xxx`: reserved for NCS backward compatibility.
    Ncs,

    /// `10xx`: the layout specified by RFC 4122.
    Rfc4122,

    /// `110x`: reserved for Microsoft GUID backward compatibility.
    Microsoft,

    /// `111x`: reserved for future definition.
    Future,
}

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Namespace for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_DNS: Self = Self([
        0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_URL: Self = Self([
        0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_OID: Self = Self([
        0x6b, 0xa7, 0xb8, 0x12, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace for X.500 DNs (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_X500: Self = Self([
        0x6b, 0xa7, 0xb8, 0x14, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Creates a UUID from a 16-byte array without touching any bits.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the 16-byte binary representation.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Returns `true` if every byte is zero.
    pub const fn is_nil(&self) -> bool {
        u128::from_be_bytes(self.0) == 0
    }

    /// Returns the version number stored in the high nibble of byte 6.
    ///
    /// The value is returned as is; generated UUIDs carry 1 through 7.
    pub const fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Overwrites the version nibble, leaving the low nibble of byte 6 untouched.
    pub fn set_version(&mut self, version: u8) {
        self.0[6] = (self.0[6] & 0x0f) | (version << 4);
    }

    /// Returns the variant encoded in the leading bits of byte 8.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 5 {
            0b111 => Variant::Future,
            0b110 => Variant::Microsoft,
            0b100 | 0b101 => Variant::Rfc4122,
            _ => Variant::Ncs,
        }
    }

    /// Overwrites the leading bits of byte 8 with the pattern of `variant`.
    pub fn set_variant(&mut self, variant: Variant) {
        self.0[8] = match variant {
            Variant::Ncs => self.0[8] & 0x7f,
            Variant::Rfc4122 => (self.0[8] & 0x3f) | 0x80,
            Variant::Microsoft => (self.0[8] & 0x1f) | 0xc0,
            Variant::Future => self.0[8] | 0xe0,
        };
    }

    /// Stamps `version` and the RFC 4122 variant.
    pub(crate) fn finalize(mut self, version: u8) -> Self {
        self.set_version(version);
        self.set_variant(Variant::Rfc4122);
        self
    }

    /// Returns the 8-4-4-4-12 lower-case hexadecimal string representation stored in a
    /// stack-allocated string.
    ///
    /// Encoding always produces the canonical form regardless of version; braced, URN, and
    /// hash-like forms are only accepted on input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidkit::Uuid;
    ///
    /// let x = "{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}".parse::<Uuid>()?;
    /// assert_eq!(x.encode().as_str(), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// # Ok::<(), uuidkit::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [b'-'; 36];
        let mut pos = 0;
        for (i, e) in self.0.iter().enumerate() {
            buffer[pos] = DIGITS[(e >> 4) as usize];
            buffer[pos + 1] = DIGITS[(e & 15) as usize];
            pos += if matches!(i, 3 | 5 | 7 | 9) { 3 } else { 2 };
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer holds ASCII hex digits and dashes only
        unsafe { FStr::from_inner_unchecked(buffer) }
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = crate::Error;

    /// Parses any of the canonical, braced, URN, or hash-like text forms.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse_bytes(src.as_bytes())
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = crate::Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.encode().as_str().to_owned()
    }
}

impl TryFrom<String> for Uuid {
    type Error = crate::Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Uuid::parse_bytes(value.as_bytes()).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Uuid::from_slice(value).map_err(de::Error::custom)
        }
    }

}
