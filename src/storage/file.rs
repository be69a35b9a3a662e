//! JSON-file-based storage backend.
//!
//! Stores each key's payload in a separate `<key>.json` file under a
//! configurable directory (default: `$XDG_DATA_HOME/booking-tracker/`).

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::{BookingError, Result};

/// Application name used for the XDG data directory.
const APP_NAME: &str = "booking-tracker";
/// Extension appended to each key to form its file name.
const EXTENSION: &str = "json";
/// Sentinel file used for cross-process file locking.
const LOCK_FILE: &str = "storage.lock";

/// File-backed key-value storage.
///
/// # Concurrency
///
/// Every operation holds an in-process [`Mutex`] plus an advisory lock on
/// the `storage.lock` sentinel, so other processes pointed at the same
/// directory are serialized too. Loads take the lock shared and saves take
/// it exclusive. A save goes to `<key>.json.tmp` first and is renamed over
/// the target, so readers see either the old payload or the new one.
///
/// # File layout
///
/// ```text
/// <dir>/
///   storage.lock                     (cross-process lock sentinel)
///   car_booking_manager_data.json
/// ```
#[derive(Debug)]
pub struct FileStorage {
    /// Root directory containing all JSON files.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
    /// Sentinel file for cross-process advisory locking.
    lock_file: fs::File,
}

impl FileStorage {
    /// Opens the booking store directory `dir`, creating it when missing.
    ///
    /// The `storage.lock` sentinel is created alongside the payload files
    /// on first use and left in place afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`] when `dir` or the sentinel cannot
    /// be created.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(io_error)?;
        let lock_file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))
            .map_err(io_error)?;
        tracing::debug!(dir = %dir.display(), "opened file storage");
        Ok(Self {
            dir,
            lock: Mutex::new(()),
            lock_file,
        })
    }

    /// Per-user data directory for bookings, e.g.
    /// `~/.local/share/booking-tracker/` on Linux.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`] when the platform exposes no data
    /// directory (for instance, no home directory is set).
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        let Some(base) = dirs::data_dir() else {
            return Err(BookingError::Storage(
                "no platform data directory for bookings".into(),
            ));
        };
        Ok(base.join(APP_NAME))
    }

    /// Maps `key` to its payload file, refusing keys that would escape `dir`.
    fn path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(BookingError::Storage(
                format!("invalid storage key: {key:?}").into(),
            ));
        }
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }

    /// Runs `op` while holding the process mutex and the sentinel lock in
    /// the given mode.
    ///
    /// An unlock failure is reported only if `op` itself succeeded.
    fn locked<R, F: FnOnce() -> Result<R>>(&self, mode: LockMode, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| poisoned(&err))?;
        match mode {
            LockMode::Read => self.lock_file.lock_shared(),
            LockMode::Write => self.lock_file.lock(),
        }
        .map_err(io_error)?;
        let outcome = op();
        match (self.lock_file.unlock(), outcome) {
            (Err(err), Ok(_)) => Err(io_error(err)),
            (_, outcome) => outcome,
        }
    }
}

/// How the sentinel file is locked around an operation.
#[derive(Debug, Clone, Copy)]
enum LockMode {
    /// Shared lock; concurrent loads are allowed.
    Read,
    /// Exclusive lock for saves.
    Write,
}

/// Storage error from a filesystem failure.
fn io_error(err: std::io::Error) -> BookingError {
    BookingError::Storage(Box::new(err))
}

/// Storage error from a poisoned process mutex.
fn poisoned<T>(err: &std::sync::PoisonError<T>) -> BookingError {
    BookingError::Storage(err.to_string().into())
}

impl super::Storage for FileStorage {
    #[inline]
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        self.locked(LockMode::Read, || match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(err)),
        })
    }

    #[inline]
    fn save(&self, key: &str, payload: &str) -> Result<()> {
        let path = self.path(key)?;
        let tmp_path = path.with_extension(format!("{EXTENSION}.tmp"));
        self.locked(LockMode::Write, || {
            fs::write(&tmp_path, payload).map_err(io_error)?;
            fs::rename(&tmp_path, &path).map_err(io_error)
        })
    }
}
