//! Name-based UUIDs (versions 3 and 5).

use sha1::{Digest, Sha1};

use crate::Uuid;

impl Uuid {
    /// Creates a UUIDv3 from the MD5 digest of `namespace` followed by `name`.
    ///
    /// The same pair always yields the same UUID.
    ///
    /// ```rust
    /// use uuidkit::Uuid;
    ///
    /// let uuid = Uuid::new_v3(Uuid::NAMESPACE_DNS, "www.example.com");
    /// assert_eq!(uuid.to_string(), "5df41881-3aed-3515-88a7-2f4a814cf09e");
    /// ```
    pub fn new_v3(namespace: Uuid, name: impl AsRef<[u8]>) -> Self {
        let mut context = md5::Context::new();
        context.consume(namespace.as_bytes());
        context.consume(name.as_ref());
        Self::from(context.compute().0).finalize(3)
    }

    /// Creates a UUIDv5 from the first 16 bytes of the SHA-1 digest of `namespace` followed by
    /// `name`.
    ///
    /// ```rust
    /// use uuidkit::Uuid;
    ///
    /// let uuid = Uuid::new_v5(Uuid::NAMESPACE_DNS, "www.example.com");
    /// assert_eq!(uuid.to_string(), "2ed6657d-e927-568b-95e1-2665a8aea6a2");
    /// ```
    pub fn new_v5(namespace: Uuid, name: impl AsRef<[u8]>) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(namespace.as_bytes());
        hasher.update(name.as_ref());
        let digest = hasher.finalize();

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self::from(bytes).finalize(5)
    }
}
