//! Aggregate payment summary over a set of bookings.

use serde::Serialize;

use super::Booking;

/// Totals over a set of bookings, typically the bookings of one day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Number of bookings.
    pub total_bookings: usize,
    /// Sum of total payments.
    pub total_revenue: f64,
    /// Sum of outstanding due payments.
    pub total_due: f64,
}

impl DailySummary {
    /// Summarizes the given bookings.
    #[inline]
    #[must_use]
    pub fn from_bookings<'item, I>(bookings: I) -> Self
    where
        I: IntoIterator<Item = &'item Booking>,
    {
        bookings
            .into_iter()
            .fold(Self::default(), |acc, booking| Self {
                total_bookings: acc.total_bookings + 1,
                total_revenue: acc.total_revenue + booking.total_payment,
                total_due: acc.total_due + booking.due_payment,
            })
    }

    /// Sum of advance payments already collected.
    #[inline]
    #[must_use]
    pub fn total_collected(&self) -> f64 {
        self.total_revenue - self.total_due
    }
}
