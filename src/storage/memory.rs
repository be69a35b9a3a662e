//! In-memory storage backend for testing.
//!
//! Provides [`InMemoryStorage`], a thread-safe in-memory implementation of
//! [`super::Storage`]. Ideal for unit and integration tests where file I/O
//! is undesirable.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{BookingError, Result};

/// Thread-safe in-memory key-value storage.
///
/// # Example
///
/// ```rust
/// use booking_tracker::storage::InMemoryStorage;
/// use booking_tracker::store::BookingStore;
///
/// let store = BookingStore::open(InMemoryStorage::new());
/// assert!(store.bookings().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    /// Payloads by key, behind a mutex for interior mutability.
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-seeded with `payload` under `key`.
    #[inline]
    #[must_use]
    pub fn with_entry(key: &str, payload: &str) -> Self {
        let mut entries = HashMap::new();
        let _old = entries.insert(key.to_owned(), payload.to_owned());
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> Result<R> {
        let mut entries = self.entries.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut entries))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> BookingError {
    BookingError::Storage(err.to_string().into())
}

impl super::Storage for InMemoryStorage {
    #[inline]
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.with_lock(|entries| entries.get(key).cloned())
    }

    #[inline]
    fn save(&self, key: &str, payload: &str) -> Result<()> {
        self.with_lock(|entries| {
            let _old = entries.insert(key.to_owned(), payload.to_owned());
        })
    }
}
