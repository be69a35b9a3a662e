//! End-to-end tests of the booking store over the JSON file backend.

use booking_tracker::error::BookingError;
use booking_tracker::models::{Booking, BookingDraft, BookingId, BookingTab, NaiveDate, Shift};
use booking_tracker::storage::{FileStorage, Storage};
use booking_tracker::store::{BookingStore, STORAGE_KEY};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn draft(day: &str, shift: Shift, total: f64, advance: f64) -> BookingDraft {
    BookingDraft {
        date: date(day),
        shift,
        pickup_address: format!("Pickup for {day}"),
        drop_address: "Central Station".to_owned(),
        total_payment: total,
        advance_payment: advance,
    }
}

fn file_store(dir: &tempfile::TempDir) -> BookingStore<FileStorage> {
    BookingStore::open(FileStorage::new(dir.path().to_path_buf()).unwrap())
}

#[test]
fn bookings_survive_reopen_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = file_store(&dir);
    let added: Vec<Booking> = [
        draft("2024-05-03", Shift::Night, 900.0, 0.0),
        draft("2024-05-01", Shift::Day, 1000.0, 200.0),
        draft("2024-05-02", Shift::Day, 800.0, 800.0),
    ]
    .into_iter()
    .map(|item| store.add(item).unwrap())
    .collect();

    let reopened = file_store(&dir);
    assert_eq!(reopened.bookings(), added.as_slice());
}

#[test]
fn conflict_then_payment_update_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = file_store(&dir);
    let booking = store
        .add(draft("2024-05-01", Shift::Day, 1000.0, 200.0))
        .unwrap();

    let err = store
        .add(draft("2024-05-01", Shift::Day, 10.0, 0.0))
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::SlotConflict { date: d, shift: Shift::Day } if d == date("2024-05-01")
    ));
    assert_eq!(store.bookings().len(), 1);

    let _updated = store.update_advance_payment(&booking.id, 300.0).unwrap();
    let reopened = file_store(&dir);
    let stored = reopened.get(&booking.id).unwrap();
    assert!((stored.advance_payment - 300.0).abs() < f64::EPSILON);
    assert!((stored.due_payment - 700.0).abs() < f64::EPSILON);
}

#[test]
fn classification_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = file_store(&dir);
    for item in [
        draft("2024-05-01", Shift::Night, 1.0, 0.0),
        draft("2024-05-01", Shift::Day, 1.0, 0.0),
        draft("2024-04-30", Shift::Day, 1.0, 0.0),
    ] {
        let _booking = store.add(item).unwrap();
    }

    let views = file_store(&dir).classify(date("2024-05-01"));
    let active: Vec<Shift> = views.tab(BookingTab::Active).iter().map(|b| b.shift).collect();
    assert_eq!(active, vec![Shift::Day, Shift::Night]);
    assert_eq!(views.tab(BookingTab::Expired).len(), 1);
    assert_eq!(views.notification_count(), 2);
}

#[test]
fn corrupt_file_starts_empty_and_recovers_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
    storage.save(STORAGE_KEY, "definitely not json").unwrap();

    let mut store = BookingStore::open(storage);
    assert!(store.bookings().is_empty());

    let _booking = store
        .add(draft("2024-05-01", Shift::Day, 1.0, 0.0))
        .unwrap();
    assert_eq!(file_store(&dir).bookings().len(), 1);
}

#[test]
fn reads_payload_written_by_other_tools() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
    let payload = r#"[
        {"id":"a1","date":"2024-05-01","shift":"day","pickupAddress":"X","dropAddress":"Y",
         "totalPayment":1000,"advancePayment":200,"duePayment":800,"createdAt":1714550400000}
    ]"#;
    storage.save(STORAGE_KEY, payload).unwrap();

    let mut store = BookingStore::open(storage);
    let id = BookingId::from("a1");
    assert_eq!(store.get(&id).unwrap().shift, Shift::Day);
    assert!(store.delete(&id).unwrap());
    assert!(file_store(&dir).bookings().is_empty());
}
