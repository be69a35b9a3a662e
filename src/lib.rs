//! Single-user booking tracker for day/night vehicle shifts.
//!
//! Bookings are keyed by a (date, shift) slot, carry a total and an
//! advance payment, and are classified into active, expired and
//! same-day views relative to a reference date. The collection is held
//! by a [`store::BookingStore`] and persisted as JSON through a pluggable
//! [`storage::Storage`] backend.

pub mod classify;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;
