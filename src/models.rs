//! Data models for bookings.
//!
//! This module contains the [`Booking`] record, the [`BookingDraft`] a
//! caller submits to create one, the identifier newtype and the
//! enumerations for constrained values.

mod booking;
mod enums;
mod ids;
mod summary;

pub use booking::{Booking, BookingDraft, Slot, due_payment};
pub use chrono::NaiveDate;
pub use enums::{BookingTab, ParseEnumError, Shift};
pub use ids::BookingId;
pub use summary::DailySummary;
