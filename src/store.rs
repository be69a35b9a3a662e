//! Booking store: the owned booking collection and its mutations.
//!
//! [`BookingStore`] is the only way to change the collection. Every
//! successful mutation builds the next collection, flushes it to the
//! [`Storage`] backend, and only then replaces the held state, so the
//! in-memory view never runs ahead of what was persisted.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::classify::{Classification, classify};
use crate::error::{BookingError, Result};
use crate::models::{Booking, BookingDraft, BookingId, DailySummary};
use crate::storage::Storage;

/// Key under which the booking collection is persisted.
pub const STORAGE_KEY: &str = "car_booking_manager_data";

/// Owned booking collection backed by a [`Storage`].
///
/// # Example
///
/// ```
/// use booking_tracker::models::{BookingDraft, NaiveDate, Shift};
/// use booking_tracker::storage::InMemoryStorage;
/// use booking_tracker::store::BookingStore;
///
/// let mut store = BookingStore::open(InMemoryStorage::new());
/// let booking = store
///     .add(BookingDraft {
///         date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
///         shift: Shift::Day,
///         pickup_address: "Depot".to_owned(),
///         drop_address: "Airport".to_owned(),
///         total_payment: 1000.0,
///         advance_payment: 200.0,
///     })
///     .unwrap();
/// assert_eq!(booking.due_payment, 800.0);
/// ```
#[derive(Debug)]
pub struct BookingStore<S> {
    /// Persistence backend.
    storage: S,
    /// Bookings in insertion order.
    bookings: Vec<Booking>,
}

impl<S: Storage> BookingStore<S> {
    /// Loads the collection from `storage`.
    ///
    /// A missing entry yields an empty store. A read failure or a
    /// malformed payload is logged and also yields an empty store.
    #[tracing::instrument(skip_all)]
    pub fn open(storage: S) -> Self {
        let bookings = match load_bookings(&storage) {
            Ok(bookings) => {
                tracing::debug!(count = bookings.len(), "loaded bookings");
                bookings
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored bookings, starting empty");
                Vec::new()
            }
        };
        Self { storage, bookings }
    }

    /// Returns all bookings in insertion order.
    #[inline]
    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Looks up a booking by identifier.
    #[inline]
    #[must_use]
    pub fn get(&self, id: &BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|booking| booking.id == *id)
    }

    /// Records a new booking, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidAmount`] if the total or advance is
    /// NaN or infinite, [`BookingError::SlotConflict`] if a booking already
    /// occupies the draft's date and shift, or a storage/serialization
    /// error if the collection cannot be persisted. The collection is
    /// unchanged on error.
    #[inline]
    pub fn add(&mut self, draft: BookingDraft) -> Result<Booking> {
        self.add_at(draft, Utc::now())
    }

    /// Records a new booking with an explicit creation timestamp.
    ///
    /// # Errors
    ///
    /// Same as [`Self::add`].
    #[tracing::instrument(skip_all, fields(date = %draft.date, shift = %draft.shift))]
    pub fn add_at(&mut self, draft: BookingDraft, created_at: DateTime<Utc>) -> Result<Booking> {
        ensure_finite("totalPayment", draft.total_payment)?;
        ensure_finite("advancePayment", draft.advance_payment)?;

        let slot = draft.slot();
        if self.bookings.iter().any(|booking| booking.slot() == slot) {
            tracing::debug!(slot = %slot, "slot already booked");
            return Err(BookingError::SlotConflict {
                date: slot.date,
                shift: slot.shift,
            });
        }

        let booking = Booking::from_draft(draft, BookingId::generate(), created_at);
        warn_if_overpaid(&booking);

        let mut next = self.bookings.clone();
        next.push(booking.clone());
        self.commit(next)?;
        tracing::debug!(id = %booking.id, "booking added");
        Ok(booking)
    }

    /// Removes the booking with the given identifier.
    ///
    /// Returns `true` if a booking was removed. An unknown identifier is
    /// not an error; the unchanged collection is still persisted.
    ///
    /// # Errors
    ///
    /// Returns a storage/serialization error if the collection cannot be
    /// persisted.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn delete(&mut self, id: &BookingId) -> Result<bool> {
        let next: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|booking| booking.id != *id)
            .cloned()
            .collect();
        let removed = next.len() != self.bookings.len();
        self.commit(next)?;
        tracing::debug!(removed, "booking delete");
        Ok(removed)
    }

    /// Replaces the advance payment of a booking and recomputes its due
    /// payment.
    ///
    /// Returns the updated booking, or `None` if no booking has the given
    /// identifier. Amounts above the total are accepted and leave nothing
    /// due.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidAmount`] if `advance` is NaN or
    /// infinite, or a storage/serialization error if the collection cannot
    /// be persisted.
    #[tracing::instrument(skip_all, fields(id = %id, advance = advance))]
    pub fn update_advance_payment(
        &mut self,
        id: &BookingId,
        advance: f64,
    ) -> Result<Option<Booking>> {
        ensure_finite("advancePayment", advance)?;

        let mut updated = None;
        let next: Vec<Booking> = self
            .bookings
            .iter()
            .map(|booking| {
                if booking.id == *id {
                    let changed = booking.with_advance_payment(advance);
                    warn_if_overpaid(&changed);
                    updated = Some(changed.clone());
                    changed
                } else {
                    booking.clone()
                }
            })
            .collect();
        self.commit(next)?;
        tracing::debug!(found = updated.is_some(), "advance payment update");
        Ok(updated)
    }

    /// Classifies the collection against `today`.
    #[inline]
    #[must_use]
    pub fn classify(&self, today: NaiveDate) -> Classification {
        classify(&self.bookings, today)
    }

    /// Classifies the collection against the local calendar date.
    #[inline]
    #[must_use]
    pub fn classify_today(&self) -> Classification {
        self.classify(Local::now().date_naive())
    }

    /// Payment totals for the bookings scheduled on `date`.
    #[inline]
    #[must_use]
    pub fn summary_for(&self, date: NaiveDate) -> DailySummary {
        DailySummary::from_bookings(self.bookings.iter().filter(|booking| booking.date == date))
    }

    /// Flushes `next` to storage, then makes it the current collection.
    fn commit(&mut self, next: Vec<Booking>) -> Result<()> {
        let payload = serde_json::to_string(&next)?;
        self.storage.save(STORAGE_KEY, &payload)?;
        self.bookings = next;
        Ok(())
    }
}

/// Reads and decodes the stored collection.
fn load_bookings<S: Storage>(storage: &S) -> Result<Vec<Booking>> {
    match storage.load(STORAGE_KEY)? {
        Some(payload) => Ok(serde_json::from_str(&payload)?),
        None => Ok(Vec::new()),
    }
}

/// Rejects amounts that JSON cannot carry.
///
/// `serde_json` writes NaN and infinities as `null`, which would make the
/// whole stored collection unreadable on the next load.
fn ensure_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BookingError::InvalidAmount { field, value })
    }
}

/// Logs a booking whose advance exceeds its total.
///
/// Such amounts are accepted as-is; the due payment is floored at zero.
fn warn_if_overpaid(booking: &Booking) {
    if booking.is_overpaid() {
        tracing::warn!(
            id = %booking.id,
            total = booking.total_payment,
            advance = booking.advance_payment,
            "advance payment exceeds total payment"
        );
    }
}
