//! Conversions between [`Uuid`] and the values a generic record store reads and writes.
//!
//! [`StoreValue`] mirrors the storage classes of SQLite-like stores. A `Uuid` is written as its
//! canonical text; an absent `Option<Uuid>` is written as [`StoreValue::Null`]. On the way back,
//! a 16-byte blob is taken as the binary representation and any other blob or text is parsed as
//! one of the accepted text forms.

use crate::{Error, Uuid};

/// A dynamically typed value handed to or received from a store.
#[derive(Clone, PartialEq, Debug)]
pub enum StoreValue {
    /// The absence of a value.
    Null,

    /// A signed 64-bit integer.
    Integer(i64),

    /// A 64-bit floating point number.
    Real(f64),

    /// A UTF-8 string.
    Text(String),

    /// An opaque byte sequence.
    Blob(Vec<u8>),
}

impl StoreValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }
}

/// Produces a [`StoreValue`] to persist.
pub trait ToStoreValue {
    /// Returns the value to write.
    fn to_store_value(&self) -> StoreValue;
}

/// Reconstructs a value from what a store handed back.
pub trait FromStoreValue: Sized {
    /// Converts a value read from a store, failing with [`Error::UnsupportedScanType`] for value
    /// types that cannot hold this type.
    fn from_store_value(value: &StoreValue) -> Result<Self, Error>;
}

impl ToStoreValue for Uuid {
    fn to_store_value(&self) -> StoreValue {
        StoreValue::Text(self.to_string())
    }
}

impl ToStoreValue for Option<Uuid> {
    fn to_store_value(&self) -> StoreValue {
        match self {
            Some(uuid) => uuid.to_store_value(),
            None => StoreValue::Null,
        }
    }
}

impl FromStoreValue for Uuid {
    fn from_store_value(value: &StoreValue) -> Result<Self, Error> {
        match value {
            StoreValue::Blob(bytes) if bytes.len() == 16 => Self::from_slice(bytes),
            StoreValue::Blob(bytes) => Self::parse_bytes(bytes),
            StoreValue::Text(text) => text.parse(),
            other => Err(Error::UnsupportedScanType {
                type_name: other.type_name(),
            }),
        }
    }
}

impl FromStoreValue for Option<Uuid> {
    fn from_store_value(value: &StoreValue) -> Result<Self, Error> {
        match value {
            StoreValue::Null => Ok(None),
            other => Uuid::from_store_value(other).map(Some),
        }
    }
}
