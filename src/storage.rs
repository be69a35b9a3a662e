//! Pluggable key-value storage backends for persisting the booking
//! collection.
//!
//! The store serializes the whole collection into a single payload and
//! hands it to a [`Storage`] under a fixed key; backends only move opaque
//! strings around.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileStorage;
pub use memory::InMemoryStorage;

use crate::error::Result;

/// Blocking key-value storage backend.
///
/// All methods take `&self` — implementations should use interior
/// mutability (e.g. `Mutex`) for thread-safe mutation.
pub trait Storage: core::fmt::Debug + Send + Sync {
    /// Returns the payload stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored under the key yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn save(&self, key: &str, payload: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    #[inline]
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    #[inline]
    fn save(&self, key: &str, payload: &str) -> Result<()> {
        (**self).save(key, payload)
    }
}
