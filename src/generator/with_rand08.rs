//! Integration with `rand` (v0.8) crate.

use super::{Generator, RandSource};
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl<T: RngCore> Generator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// The random number generator must be cryptographically secure, such as
    /// [`rand::rngs::OsRng`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidkit::Generator;
    ///
    /// let g = Generator::with_rand08(rand::rngs::OsRng);
    /// println!("{}", g.generate_v4()?);
    /// # Ok::<(), uuidkit::Error>(())
    /// ```
    pub fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
