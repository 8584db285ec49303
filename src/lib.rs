//! Generation and strict parsing of RFC 4122 / RFC 9562 UUIDs
//!
//! ```rust
//! use uuidkit::{uuid4, uuid7, Uuid};
//!
//! let uuid = uuid7()?;
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let parsed: Uuid = "urn:uuid:2ca4b2ce-6c13-40d4-bccf-37d222820f6f".parse()?;
//! assert_eq!(parsed.version(), 4);
//! assert_eq!(uuid4()?.version(), 4);
//! # Ok::<(), uuidkit::Error>(())
//! ```
//!
//! # Versions
//!
//! | Version | Source of the bits                                           |
//! | ------- | ------------------------------------------------------------ |
//! | 1       | 60-bit Gregorian timestamp, clock sequence, node identifier |
//! | 2       | UUIDv1 with a POSIX uid/gid and a DCE Security domain       |
//! | 3       | MD5 digest of a namespace UUID and a name                   |
//! | 4       | 122 random bits                                             |
//! | 5       | SHA-1 digest of a namespace UUID and a name                 |
//! | 6       | UUIDv1 fields reordered so that byte order follows time     |
//! | 7       | 48-bit Unix timestamp in milliseconds and 74 random bits    |
//!
//! The time-based versions draw on a [`Generator`], which owns the clock sequence, the node
//! identifier, and the random source. The `uuid1()` .. `uuid7()` functions share one
//! process-wide generator.
//!
//! # Field and bit layout
//!
//! UUIDv6 places the 64-bit timestamp word most significant bits first, and the version nibble
//! takes the place of timestamp bits 12-15:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_high           |           time_mid            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_low        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                              node                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! UUIDv7 carries the Unix timestamp in the first 48 bits followed by random bits:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |         rand_a        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The generator does not hand out a smaller `unix_ts_ms` than before while the system clock
//! moves back by ten seconds or less; a larger rollback resets it to the clock. UUIDs generated
//! within the same millisecond are ordered randomly.
//!
//! # Text forms
//!
//! [`Uuid::parse_bytes`] and [`FromStr`](std::str::FromStr) accept exactly these forms, in any
//! mix of hex digit case:
//!
//! - `6ba7b810-9dad-11d1-80b4-00c04fd430c8`
//! - `{6ba7b810-9dad-11d1-80b4-00c04fd430c8}`
//! - `urn:uuid:6ba7b810-9dad-11d1-80b4-00c04fd430c8`
//! - `6ba7b8109dad11d180b400c04fd430c8`
//!
//! Formatting always produces the first form in lowercase.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_gen`: enables the process-wide default generator and the `uuid1()` .. `uuid7()`
//!   functions.
//!
//! Optional features:
//!
//! - `serde`: enables serialization and deserialization of [`Uuid`] objects.
//! - `uuid`: enables conversion from/to [`uuid::Uuid`].

#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
mod error;
mod hash;
mod id;

pub use error::{Error, Result};
pub use id::{Uuid, Variant};

pub mod generator;
pub use generator::{
    Domain, Generator, HardwareAddrSource, RandSource, StdSystemTime, SystemHardwareAddr,
    TimeSource,
};

pub mod store;

#[cfg(feature = "global_gen")]
mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid1, uuid2, uuid3, uuid4, uuid5, uuid6, uuid7};
