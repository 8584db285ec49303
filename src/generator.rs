//! Stateful UUID generator and the sources it draws from.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::{Error, Uuid};

mod hardware;
pub use hardware::SystemHardwareAddr;

pub mod with_rand08;


/// Difference in 100-nanosecond intervals between the UUID epoch (1582-10-15) and the Unix epoch
/// (1970-01-01).
const EPOCH_START: u64 = 122_192_928_000_000_000;

/// Amount of Unix time rollback in milliseconds that UUIDv7 generation rides out before it resets
/// its high-water mark to the clock.
const V7_ROLLBACK_ALLOWANCE: u64 = 10_000;

/// Number of clock sequence bumps allowed within one 65536-tick block of timestamps before the
/// timestamp moves on to the next block, so that the 14 bits of the clock sequence written to a
/// UUID never wrap within a block.
const MAX_BUMPS_PER_BLOCK: u16 = (1 << 14) - 1;

/// A trait that defines the random number generator interface for [`Generator`].
///
/// Implementations must be cryptographically secure. A call either fills the whole of `dest` or
/// fails; partial fills are not representable.
pub trait RandSource {
    /// Fills `dest` with random data.
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error>;
}

/// A trait that defines the system clock interface for [`Generator`].
pub trait TimeSource {
    /// Returns the current time as the duration elapsed since the Unix epoch.
    fn unix_time(&self) -> Duration;
}

/// A trait that looks up the hardware address used as the node identifier.
pub trait HardwareAddrSource {
    /// Returns a 6-byte network interface address, or
    /// [`Error::HardwareAddressUnavailable`] if none exists.
    fn hardware_addr(&self) -> Result<[u8; 6], Error>;
}

/// The default [`TimeSource`] that reads [`SystemTime::now`].
///
/// A system clock set before the Unix epoch reads as the epoch itself.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_time(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

/// DCE Security domain of a UUIDv2.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Domain {
    /// POSIX user id domain (0); the uid replaces the low time field.
    Person,

    /// POSIX group id domain (1); the gid replaces the low time field.
    Group,

    /// Organization domain (2); only the domain byte is written.
    Org,

    /// Any other domain byte; only the domain byte is written.
    Other(u8),
}

impl From<u8> for Domain {
    fn from(src: u8) -> Self {
        match src {
            0 => Self::Person,
            1 => Self::Group,
            2 => Self::Org,
            other => Self::Other(other),
        }
    }
}

impl From<Domain> for u8 {
    fn from(src: Domain) -> Self {
        match src {
            Domain::Person => 0,
            Domain::Group => 1,
            Domain::Org => 2,
            Domain::Other(other) => other,
        }
    }
}

/// State shared by the time-based versions, always updated as a whole under one lock.
#[derive(Debug, Default)]
struct ClockState {
    /// Latest 100-nanosecond tick count since the UUID epoch handed out for v1, v2, and v6.
    last_timestamp: u64,

    /// `None` until first seeded from the clock sequence latch.
    clock_sequence: Option<u16>,

    /// Clock sequence bumps since the first timestamp issued in the block of `last_timestamp`.
    block_bumps: u16,

    /// Latest Unix timestamp in milliseconds handed out for v7.
    last_unix_ts_ms: u64,
}

/// Represents a UUID generator that owns the clock sequence, the node identifier, and the random
/// source for all versions.
///
/// A generator is `Sync` and meant to be shared: every method takes `&self` and serializes access
/// to the state it mutates. The clock sequence seed and the node identifier are each computed at
/// most once per generator; a failed attempt is not cached and the next call tries again.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync::Arc, thread};
/// use uuidkit::Generator;
///
/// let g = Arc::new(Generator::with_rand08(OsRng));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate_v6().unwrap(), i);
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug)]
pub struct Generator<R, T = StdSystemTime, H = SystemHardwareAddr> {
    rng: Mutex<R>,
    time_source: T,
    hardware_addr_source: H,
    clock_sequence_seed: OnceCell<u16>,
    node_id: OnceCell<[u8; 6]>,
    clock: Mutex<ClockState>,
}

impl<R: RandSource> Generator<R> {
    /// Creates a generator with the system clock and the system hardware address.
    pub fn new(rng: R) -> Self {
        Self::with_sources(rng, StdSystemTime, SystemHardwareAddr)
    }
}

impl<R: RandSource + Default> Default for Generator<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: RandSource, T: TimeSource, H: HardwareAddrSource> Generator<R, T, H> {
    /// Creates a generator with the specified random, time, and hardware address sources.
    pub fn with_sources(rng: R, time_source: T, hardware_addr_source: H) -> Self {
        Self {
            rng: Mutex::new(rng),
            time_source,
            hardware_addr_source,
            clock_sequence_seed: OnceCell::new(),
            node_id: OnceCell::new(),
            clock: Mutex::new(ClockState::default()),
        }
    }

    /// Generates a UUIDv1 from the current timestamp, the clock sequence, and the node
    /// identifier.
    pub fn generate_v1(&self) -> Result<Uuid, Error> {
        let (timestamp, clock_sequence) = self.clock_state()?;
        let node_id = self.node_id()?;

        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&(timestamp as u32).to_be_bytes());
        bytes[4..6].copy_from_slice(&((timestamp >> 32) as u16).to_be_bytes());
        bytes[6..8].copy_from_slice(&((timestamp >> 48) as u16).to_be_bytes());
        bytes[8..10].copy_from_slice(&clock_sequence.to_be_bytes());
        bytes[10..].copy_from_slice(&node_id);
        Ok(Uuid::from(bytes).finalize(1))
    }

    /// Generates a DCE Security UUIDv2.
    ///
    /// For [`Domain::Person`] and [`Domain::Group`] the first four bytes carry the POSIX uid or
    /// gid of the calling process (zero on non-Unix platforms). Byte 9 always carries the domain
    /// byte, including unrecognized ones.
    pub fn generate_v2(&self, domain: Domain) -> Result<Uuid, Error> {
        let mut bytes = self.generate_v1()?.to_bytes();
        let domain = u8::from(domain);
        match domain {
            0 => bytes[0..4].copy_from_slice(&posix_uid().to_be_bytes()),
            1 => bytes[0..4].copy_from_slice(&posix_gid().to_be_bytes()),
            _ => {}
        }
        bytes[9] = domain;
        Ok(Uuid::from(bytes).finalize(2))
    }

    /// Generates a UUIDv3. Equivalent to [`Uuid::new_v3`].
    pub fn generate_v3(&self, namespace: Uuid, name: impl AsRef<[u8]>) -> Uuid {
        Uuid::new_v3(namespace, name)
    }

    /// Generates a UUIDv4 from 16 random bytes.
    pub fn generate_v4(&self) -> Result<Uuid, Error> {
        let mut bytes = [0u8; 16];
        self.fill_random(&mut bytes, "UUIDv4")?;
        Ok(Uuid::from(bytes).finalize(4))
    }

    /// Generates a UUIDv5. Equivalent to [`Uuid::new_v5`].
    pub fn generate_v5(&self, namespace: Uuid, name: impl AsRef<[u8]>) -> Uuid {
        Uuid::new_v5(namespace, name)
    }

    /// Generates a UUIDv6, the field-compatible reordering of UUIDv1 whose byte order follows
    /// the timestamp.
    ///
    /// Bytes 0-1, 2-5, and 6-7 carry the high 16, middle 32, and low 16 bits of the timestamp
    /// word, and the version nibble then takes the place of timestamp bits 12-15.
    pub fn generate_v6(&self) -> Result<Uuid, Error> {
        let (timestamp, clock_sequence) = self.clock_state()?;
        let node_id = self.node_id()?;

        let mut bytes = [0u8; 16];
        bytes[0..2].copy_from_slice(&((timestamp >> 48) as u16).to_be_bytes());
        bytes[2..6].copy_from_slice(&((timestamp >> 16) as u32).to_be_bytes());
        bytes[6..8].copy_from_slice(&(timestamp as u16).to_be_bytes());
        bytes[8..10].copy_from_slice(&clock_sequence.to_be_bytes());
        bytes[10..].copy_from_slice(&node_id);
        Ok(Uuid::from(bytes).finalize(6))
    }

    /// Generates a UUIDv7 from the Unix timestamp in milliseconds followed by random bits.
    ///
    /// The timestamp does not decrease across calls on the same generator while the clock moves
    /// back by ten seconds or less. A larger rollback resets the timestamp to the clock. UUIDs
    /// generated within the same millisecond are ordered randomly.
    pub fn generate_v7(&self) -> Result<Uuid, Error> {
        let unix_ts_ms = {
            let mut state = self.clock.lock();
            let now = (self.time_source.unix_time().as_millis() as u64) & ((1 << 48) - 1);
            if now > state.last_unix_ts_ms {
                state.last_unix_ts_ms = now;
            } else if now + V7_ROLLBACK_ALLOWANCE < state.last_unix_ts_ms {
                tracing::debug!(now, last = state.last_unix_ts_ms, "clock rewound; resetting");
                state.last_unix_ts_ms = now;
            }
            state.last_unix_ts_ms
        };

        let mut bytes = [0u8; 16];
        bytes[0..6].copy_from_slice(&unix_ts_ms.to_be_bytes()[2..]);
        self.fill_random(&mut bytes[6..], "UUIDv7")?;
        Ok(Uuid::from(bytes).finalize(7))
    }

    /// Returns the timestamp and clock sequence for the next time-based UUID.
    ///
    /// The returned timestamp strictly increases: if the clock does not move past the previous
    /// timestamp, the previous one plus a tick is used and the clock sequence is bumped. The
    /// clock sequence is also bumped when only the timestamp bits hidden by the UUIDv6 version
    /// nibble change. After too many bumps within one 65536-tick block, the timestamp jumps to
    /// the start of the next block. Together these keep two UUIDv6 objects from sharing all of
    /// their visible fields.
    fn clock_state(&self) -> Result<(u64, u16), Error> {
        let seed = *self.clock_sequence_seed.get_or_try_init(|| {
            let mut buf = [0u8; 2];
            self.fill_random(&mut buf, "clock sequence")?;
            tracing::debug!("clock sequence seeded");
            Ok::<_, Error>(u16::from_be_bytes(buf))
        })?;

        let mut guard = self.clock.lock();
        let state = &mut *guard;
        let clock_sequence = state.clock_sequence.get_or_insert(seed);
        let now = uuid_ticks(self.time_source.unix_time());
        let last = state.last_timestamp;
        let mut next = if now > last {
            now
        } else {
            tracing::trace!(now, last, "clock did not advance");
            last + 1
        };
        if next >> 16 != last >> 16 {
            state.block_bumps = 0;
        }
        if next != now || hides_v6_change(last, next) {
            if state.block_bumps == MAX_BUMPS_PER_BLOCK {
                // increment timestamp at block overflow
                next = (next | 0xffff) + 1;
                state.block_bumps = 0;
                tracing::debug!(next, "clock sequence exhausted; moving to next block");
            } else {
                state.block_bumps += 1;
            }
            *clock_sequence = clock_sequence.wrapping_add(1);
            tracing::trace!(clock_sequence = *clock_sequence, "clock sequence bumped");
        }
        state.last_timestamp = next;
        Ok((next, *clock_sequence))
    }

    /// Returns the node identifier, looking it up on first use.
    ///
    /// Falls back to random bytes with the multicast bit set when no hardware address exists.
    fn node_id(&self) -> Result<[u8; 6], Error> {
        self.node_id
            .get_or_try_init(|| match self.hardware_addr_source.hardware_addr() {
                Ok(addr) => {
                    tracing::debug!("node identifier taken from hardware address");
                    Ok(addr)
                }
                Err(err) => {
                    tracing::debug!(error = %err, "using random node identifier");
                    let mut addr = [0u8; 6];
                    self.fill_random(&mut addr, "node identifier")?;
                    addr[0] |= 0x01;
                    Ok::<_, Error>(addr)
                }
            })
            .copied()
    }

    fn fill_random(&self, dest: &mut [u8], context: &'static str) -> Result<(), Error> {
        self.rng
            .lock()
            .try_fill_bytes(dest)
            .map_err(|err| Error::random_source(context, err))
    }
}

/// Returns `true` if two timestamps differ in bits 12-15 but not above, which makes them
/// indistinguishable in the timestamp fields of a UUIDv6.
fn hides_v6_change(last: u64, next: u64) -> bool {
    let diff = last ^ next;
    diff >> 16 == 0 && diff >> 12 != 0
}

/// Converts a Unix time into 100-nanosecond intervals since the UUID epoch.
fn uuid_ticks(unix_time: Duration) -> u64 {
    EPOCH_START + unix_time.as_secs() * 10_000_000 + u64::from(unix_time.subsec_nanos()) / 100
}

#[cfg(unix)]
fn posix_uid() -> u32 {
    // SAFETY: getuid is always successful and has no side effects
    unsafe { libc::getuid() }
}

#[cfg(unix)]
fn posix_gid() -> u32 {
    // SAFETY: getgid is always successful and has no side effects
    unsafe { libc::getgid() }
}

#[cfg(not(unix))]
fn posix_uid() -> u32 {
    0
}

#[cfg(not(unix))]
fn posix_gid() -> u32 {
    0
}
