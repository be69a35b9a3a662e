//! Booking model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, Shift};

/// Outstanding balance: `total - advance`, floored at zero.
#[inline]
#[must_use]
pub fn due_payment(total: f64, advance: f64) -> f64 {
    (total - advance).max(0.0_f64)
}

/// A (date, shift) pair. At most one booking may occupy a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    /// Calendar date of the slot.
    pub date: NaiveDate,
    /// Shift within the date.
    pub shift: Shift,
}

impl core::fmt::Display for Slot {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.date, self.shift)
    }
}

/// A booking as submitted by the caller, before an identifier and
/// creation timestamp are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    /// Scheduled date (yyyy-MM-dd).
    pub date: NaiveDate,
    /// Scheduled shift.
    pub shift: Shift,
    /// Pickup address.
    pub pickup_address: String,
    /// Drop-off address.
    pub drop_address: String,
    /// Agreed total price (>= 0).
    pub total_payment: f64,
    /// Amount already paid in advance (>= 0).
    pub advance_payment: f64,
}

impl BookingDraft {
    /// Returns the slot this draft would occupy.
    #[inline]
    #[must_use]
    pub const fn slot(&self) -> Slot {
        Slot {
            date: self.date,
            shift: self.shift,
        }
    }
}

/// A recorded booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier (UUID).
    pub id: BookingId,
    /// Scheduled date (yyyy-MM-dd).
    pub date: NaiveDate,
    /// Scheduled shift.
    pub shift: Shift,
    /// Pickup address.
    pub pickup_address: String,
    /// Drop-off address.
    pub drop_address: String,
    /// Agreed total price (>= 0), fixed at creation.
    pub total_payment: f64,
    /// Amount paid in advance (>= 0).
    pub advance_payment: f64,
    /// Outstanding balance, see [`due_payment`].
    pub due_payment: f64,
    /// Creation timestamp (Unix milliseconds on the wire).
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Builds a booking from a draft, deriving the due payment.
    #[inline]
    #[must_use]
    pub fn from_draft(draft: BookingDraft, id: BookingId, created_at: DateTime<Utc>) -> Self {
        let due = due_payment(draft.total_payment, draft.advance_payment);
        Self {
            id,
            date: draft.date,
            shift: draft.shift,
            pickup_address: draft.pickup_address,
            drop_address: draft.drop_address,
            total_payment: draft.total_payment,
            advance_payment: draft.advance_payment,
            due_payment: due,
            created_at,
        }
    }

    /// Returns the slot this booking occupies.
    #[inline]
    #[must_use]
    pub const fn slot(&self) -> Slot {
        Slot {
            date: self.date,
            shift: self.shift,
        }
    }

    /// Returns a copy with the advance payment replaced and the due
    /// payment recomputed.
    #[inline]
    #[must_use]
    pub fn with_advance_payment(&self, advance: f64) -> Self {
        Self {
            advance_payment: advance,
            due_payment: due_payment(self.total_payment, advance),
            ..self.clone()
        }
    }

    /// Returns `true` if more was paid in advance than the total.
    #[inline]
    #[must_use]
    pub fn is_overpaid(&self) -> bool {
        self.advance_payment > self.total_payment
    }
}
