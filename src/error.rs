//! Error types for the booking tracker.

use chrono::NaiveDate;

use crate::models::Shift;

/// All errors that can occur when using the booking tracker.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// The requested (date, shift) slot already holds a booking.
    #[error("booking full: {date} ({shift} shift) is already booked")]
    SlotConflict {
        /// Date of the occupied slot.
        date: NaiveDate,
        /// Shift of the occupied slot.
        shift: Shift,
    },

    /// A monetary amount was NaN or infinite.
    #[error("invalid {field}: {value} is not a finite amount")]
    InvalidAmount {
        /// Wire name of the rejected field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = core::result::Result<T, BookingError>;
