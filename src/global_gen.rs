//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync::OnceLock;

use crate::{Domain, Error, Generator, Uuid};
use inner::GlobalGenRng;

/// Returns the process-wide global generator, creating one if none exists.
fn global_gen() -> &'static Generator<GlobalGenRng> {
    static G: OnceLock<Generator<GlobalGenRng>> = OnceLock::new();
    G.get_or_init(Default::default)
}

/// Generates a UUIDv1 object.
///
/// This function employs a global generator whose clock sequence guarantees process-wide
/// uniqueness of the timestamp and clock sequence pair.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidkit::uuid1()?;
/// println!("{}", uuid); // e.g., "c232ab00-9414-11ec-b3c8-9f6bdeced846"
/// # Ok::<(), uuidkit::Error>(())
/// ```
pub fn uuid1() -> Result<Uuid, Error> {
    global_gen().generate_v1()
}

/// Generates a DCE Security UUIDv2 object.
///
/// # Examples
///
/// ```rust
/// use uuidkit::{uuid2, Domain};
///
/// let uuid = uuid2(Domain::Person)?;
/// assert_eq!(uuid.version(), 2);
/// # Ok::<(), uuidkit::Error>(())
/// ```
pub fn uuid2(domain: Domain) -> Result<Uuid, Error> {
    global_gen().generate_v2(domain)
}

/// Generates a UUIDv3 object. Equivalent to [`Uuid::new_v3`].
pub fn uuid3(namespace: Uuid, name: impl AsRef<[u8]>) -> Uuid {
    Uuid::new_v3(namespace, name)
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidkit::uuid4()?;
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// # Ok::<(), uuidkit::Error>(())
/// ```
pub fn uuid4() -> Result<Uuid, Error> {
    global_gen().generate_v4()
}

/// Generates a UUIDv5 object. Equivalent to [`Uuid::new_v5`].
pub fn uuid5(namespace: Uuid, name: impl AsRef<[u8]>) -> Uuid {
    Uuid::new_v5(namespace, name)
}

/// Generates a UUIDv6 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidkit::uuid6()?;
/// println!("{}", uuid); // e.g., "01ec9414-c232-6b00-b3c8-9f6bdeced846"
/// # Ok::<(), uuidkit::Error>(())
/// ```
pub fn uuid6() -> Result<Uuid, Error> {
    global_gen().generate_v6()
}

/// Generates a UUIDv7 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidkit::uuid7()?;
/// println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// # Ok::<(), uuidkit::Error>(())
/// ```
pub fn uuid7() -> Result<Uuid, Error> {
    global_gen().generate_v7()
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha12Core;

    use crate::generator::RandSource;

    /// Number of bytes generated before the ChaCha12 core is reseeded from the OS.
    const RESEED_THRESHOLD: u64 = 1024 * 64;

    /// The random number generator of the global generator.
    ///
    /// It employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to emulate the strategy used by
    /// [`rand::rngs::ThreadRng`]. The core is seeded lazily so that an unavailable OS source
    /// surfaces as a generation error, and it is seeded again whenever the process ID changes
    /// (i.e., upon Unix forks) so that parent and child never share a random stream.
    #[derive(Debug, Default)]
    pub struct GlobalGenRng {
        #[cfg(unix)]
        pid: u32,
        rng: Option<ReseedingRng<ChaCha12Core, OsRng>>,
    }

    impl RandSource for GlobalGenRng {
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            #[cfg(unix)]
            if self.rng.is_some() && self.pid != std::process::id() {
                tracing::debug!(pid = std::process::id(), "reseeding after fork");
                self.rng = None;
            }

            let rng = match self.rng.take() {
                Some(rng) => rng,
                None => {
                    let core = ChaCha12Core::from_rng(OsRng)?;
                    #[cfg(unix)]
                    {
                        self.pid = std::process::id();
                    }
                    ReseedingRng::new(core, RESEED_THRESHOLD, OsRng)
                }
            };
            self.rng.insert(rng).try_fill_bytes(dest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{uuid1, uuid2, uuid4, uuid6, uuid7};
    use crate::{Domain, Error, Uuid, Variant};
    use std::collections::HashSet;

    const N_SAMPLES: usize = 50_000;

    fn collect(f: fn() -> Result<Uuid, Error>) -> Vec<Uuid> {
        (0..N_SAMPLES).map(|_| f().unwrap()).collect()
    }

    /// Generates unique canonical strings for every version
    #[test]
    fn generates_unique_canonical_strings_for_every_version() {
        let cases: [(u8, fn() -> Result<Uuid, Error>); 5] = [
            (1, uuid1),
            (2, || uuid2(Domain::Org)),
            (4, uuid4),
            (6, uuid6),
            (7, uuid7),
        ];
        for (version, f) in cases {
            let pattern = format!(
                r"^[0-9a-f]{{8}}-[0-9a-f]{{4}}-{version}[0-9a-f]{{3}}-[89ab][0-9a-f]{{3}}-[0-9a-f]{{12}}$"
            );
            let re = regex::Regex::new(&pattern).unwrap();
            let samples = collect(f);
            for e in &samples {
                assert!(re.is_match(&e.to_string()), "{e}");
                assert_eq!(e.variant(), Variant::Rfc4122);
            }

            // v2 overwrites the low time field with a constant and may repeat
            if version != 2 {
                let set: HashSet<&Uuid> = samples.iter().collect();
                assert_eq!(set.len(), N_SAMPLES, "UUIDv{version}");
            }
        }
    }

    /// Shares one node identifier across time-based versions
    #[test]
    fn shares_one_node_identifier_across_time_based_versions() {
        let node = uuid1().unwrap().as_bytes()[10..].to_vec();
        assert_eq!(uuid6().unwrap().as_bytes()[10..], node[..]);
        for domain in [Domain::Person, Domain::Group, Domain::Org, Domain::Other(9)] {
            let e = uuid2(domain).unwrap();
            assert_eq!(e.as_bytes()[9], u8::from(domain));
            assert_eq!(e.as_bytes()[10..], node[..]);
        }
    }

    /// Orders time-based UUIDs by their leading bytes
    #[test]
    fn orders_time_based_uuids_by_their_leading_bytes() {
        let v6 = collect(uuid6);
        for pair in v6.windows(2) {
            assert!(pair[0].as_bytes()[..6] <= pair[1].as_bytes()[..6]);
        }

        let v7 = collect(uuid7);
        for pair in v7.windows(2) {
            assert!(pair[0].as_bytes()[..6] <= pair[1].as_bytes()[..6]);
        }
    }

    /// Fills non-constant bits of UUIDv4 at even odds
    #[test]
    fn fills_non_constant_bits_of_uuidv4_at_even_odds() {
        let mut ones = [0u32; 128];
        for e in collect(uuid4) {
            let n = u128::from(e);
            for (i, count) in ones.iter_mut().enumerate() {
                *count += ((n >> (127 - i)) & 1) as u32;
            }
        }

        let n = N_SAMPLES as u32;
        assert_eq!(ones[48..52], [0, n, 0, 0], "version bits");
        assert_eq!(ones[64..66], [n, 0], "variant bits");

        // binomial 99.999% confidence interval
        let margin = 4.417173 * (0.25 / N_SAMPLES as f64).sqrt();
        for i in (0..48).chain(52..64).chain(66..128) {
            let p = ones[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {i}: {p}");
        }
    }

    /// Encodes up-to-date timestamp in UUIDv7
    #[test]
    fn encodes_up_to_date_timestamp_in_uuidv7() {
        use std::time::{SystemTime, UNIX_EPOCH};
        for _ in 0..1_000 {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_millis() as i64;
            let e = uuid7().unwrap();
            let ts = (u128::from(e) >> 80) as i64;
            assert!((now - ts).abs() < 16);
        }
    }

    /// Generates no duplicates across threads
    #[test]
    fn generates_no_duplicates_across_threads() {
        let samples: Vec<Uuid> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..10_000).map(|_| uuid6().unwrap()).collect::<Vec<_>>()))
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });
        let set: HashSet<&Uuid> = samples.iter().collect();
        assert_eq!(set.len(), samples.len());
    }
}
