//! Partitioning of bookings into active, expired and today views.
//!
//! "Expired" and "active" are not stored on a booking; they are a pure
//! function of the booking date relative to a reference calendar date,
//! recomputed on every call.

use core::cmp::Reverse;

use chrono::NaiveDate;

use crate::models::{Booking, BookingTab, DailySummary};

/// The three derived views over a booking collection.
///
/// Every booking appears in exactly one of [`Self::active`] and
/// [`Self::expired`]; [`Self::today`] is a subset of `active`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    /// Bookings on or after the reference date, soonest first, day shift
    /// before night shift within a date.
    pub active: Vec<Booking>,
    /// Bookings strictly before the reference date, most recent first,
    /// night shift before day shift within a date.
    pub expired: Vec<Booking>,
    /// Bookings on the reference date, in `active` order.
    pub today: Vec<Booking>,
}

impl Classification {
    /// Returns the view shown under the given tab.
    #[inline]
    #[must_use]
    pub fn tab(&self, tab: BookingTab) -> &[Booking] {
        match tab {
            BookingTab::Active => &self.active,
            BookingTab::Expired => &self.expired,
        }
    }

    /// Number of bookings scheduled for the reference date.
    #[inline]
    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.today.len()
    }

    /// Payment totals for the bookings scheduled on the reference date.
    #[inline]
    #[must_use]
    pub fn today_summary(&self) -> DailySummary {
        DailySummary::from_bookings(&self.today)
    }
}

/// Splits `bookings` around `today`.
///
/// Sorting is stable, so bookings sharing a slot (possible only in data
/// written by other tools) keep their insertion order.
#[must_use]
pub fn classify(bookings: &[Booking], today: NaiveDate) -> Classification {
    let (mut expired, mut active): (Vec<Booking>, Vec<Booking>) = bookings
        .iter()
        .cloned()
        .partition(|booking| booking.date < today);

    active.sort_by_key(Booking::slot);
    expired.sort_by_key(|booking| Reverse(booking.slot()));

    let today_view = active
        .iter()
        .filter(|booking| booking.date == today)
        .cloned()
        .collect();

    Classification {
        active,
        expired,
        today: today_view,
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::models::{BookingDraft, BookingId, Shift};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking(day: &str, shift: Shift) -> Booking {
        let draft = BookingDraft {
            date: date(day),
            shift,
            pickup_address: "Depot".to_owned(),
            drop_address: "Harbour".to_owned(),
            total_payment: 500.0,
            advance_payment: 0.0,
        };
        Booking::from_draft(
            draft,
            BookingId::new(format!("{day}-{shift}")),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    fn slots(bookings: &[Booking]) -> Vec<(NaiveDate, Shift)> {
        bookings.iter().map(|b| (b.date, b.shift)).collect()
    }

    #[test]
    fn same_day_scenario() {
        let bookings = [
            booking("2024-05-01", Shift::Night),
            booking("2024-05-01", Shift::Day),
            booking("2024-04-30", Shift::Day),
        ];
        let views = classify(&bookings, date("2024-05-01"));

        let expected_today = vec![
            (date("2024-05-01"), Shift::Day),
            (date("2024-05-01"), Shift::Night),
        ];
        assert_eq!(slots(&views.active), expected_today);
        assert_eq!(slots(&views.today), expected_today);
        assert_eq!(slots(&views.expired), vec![(date("2024-04-30"), Shift::Day)]);
        assert_eq!(views.notification_count(), 2);
    }

    #[test]
    fn active_is_ascending_with_day_first() {
        let bookings = [
            booking("2024-06-02", Shift::Night),
            booking("2024-06-01", Shift::Night),
            booking("2024-06-02", Shift::Day),
            booking("2024-06-01", Shift::Day),
        ];
        let views = classify(&bookings, date("2024-05-01"));
        assert_eq!(
            slots(&views.active),
            vec![
                (date("2024-06-01"), Shift::Day),
                (date("2024-06-01"), Shift::Night),
                (date("2024-06-02"), Shift::Day),
                (date("2024-06-02"), Shift::Night),
            ]
        );
        assert!(views.today.is_empty());
        assert!(views.expired.is_empty());
    }

    #[test]
    fn expired_is_descending_with_night_first() {
        let bookings = [
            booking("2024-03-01", Shift::Day),
            booking("2024-03-02", Shift::Day),
            booking("2024-03-01", Shift::Night),
            booking("2024-03-02", Shift::Night),
        ];
        let views = classify(&bookings, date("2024-05-01"));
        assert_eq!(
            slots(&views.expired),
            vec![
                (date("2024-03-02"), Shift::Night),
                (date("2024-03-02"), Shift::Day),
                (date("2024-03-01"), Shift::Night),
                (date("2024-03-01"), Shift::Day),
            ]
        );
        assert!(views.active.is_empty());
    }

    #[test]
    fn partitions_are_exhaustive_and_disjoint() {
        let days = ["2024-04-29", "2024-04-30", "2024-05-01", "2024-05-02"];
        let bookings: Vec<Booking> = days
            .iter()
            .flat_map(|day| [booking(day, Shift::Day), booking(day, Shift::Night)])
            .collect();

        for reference in days {
            let views = classify(&bookings, date(reference));
            assert_eq!(views.active.len() + views.expired.len(), bookings.len());
            for item in &views.active {
                assert!(!views.expired.iter().any(|other| other.id == item.id));
            }
            for item in &views.today {
                assert!(views.active.iter().any(|other| other.id == item.id));
                assert_eq!(item.date, date(reference));
            }
        }
    }

    #[test]
    fn empty_collection_yields_empty_views() {
        let views = classify(&[], date("2024-05-01"));
        assert_eq!(views, Classification::default());
        assert_eq!(views.notification_count(), 0);
    }

    #[test]
    fn tab_selects_view() {
        let bookings = [
            booking("2024-05-02", Shift::Day),
            booking("2024-04-01", Shift::Night),
        ];
        let views = classify(&bookings, date("2024-05-01"));
        assert_eq!(views.tab(BookingTab::Active), views.active.as_slice());
        assert_eq!(views.tab(BookingTab::Expired), views.expired.as_slice());
    }

    #[test]
    fn today_summary_covers_only_today() {
        let bookings = [
            booking("2024-05-01", Shift::Day),
            booking("2024-05-02", Shift::Day),
        ];
        let summary = classify(&bookings, date("2024-05-01")).today_summary();
        assert_eq!(summary.total_bookings, 1);
        assert!((summary.total_due - 500.0).abs() < f64::EPSILON);
    }
}
