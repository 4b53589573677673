//! Integration tests for the flat-file stores, exercising the
//! durability contract against real temp-dir files.

use std::fs;

use farelog_store::{BookingStore, CheckpointFile, FeedbackLog, LoyaltyLedger, RecordDecision};
use farelog_types::{
    BookingRecord, BookingStage, Checkpoint, FeedbackRecord, TicketCategory, TicketId,
    TransportMode, BOOKING_RECORD_SIZE,
};
use tempfile::TempDir;

fn booking(id: u32, name: &str, origin: &str, destination: &str, seats: &[u8]) -> BookingRecord {
    let mut record = BookingRecord {
        ticket_id: TicketId::new(id),
        name: name.to_owned(),
        origin: origin.to_owned(),
        destination: destination.to_owned(),
        price: 1500,
        category: TicketCategory::Standard,
        mode: TransportMode::Train,
        travelers: seats.len() as u8,
        ..BookingRecord::default()
    };
    for (slot, &seat) in record.seats.iter_mut().zip(seats) {
        *slot = seat;
    }
    record
}

#[test]
fn missing_file_scans_empty() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    assert!(store.scan().unwrap().is_empty());
}

#[test]
fn append_then_scan_round_trips_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));

    let record = booking(101, "Asha", "Mumbai", "Delhi", &[3, 7]);
    store.append(&record).unwrap();

    let scanned = store.scan().unwrap();
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0], record);
    assert_eq!(scanned[0].to_bytes(), record.to_bytes());
}

#[test]
fn scan_preserves_append_order() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    for id in [5, 1, 9, 3] {
        store.append(&booking(id, "P", "Pune", "Jaipur", &[1])).unwrap();
    }
    let ids: Vec<u32> = store.scan().unwrap().iter().map(|r| r.ticket_id.get()).collect();
    assert_eq!(ids, vec![5, 1, 9, 3]);
}

#[test]
fn truncated_trailing_bytes_are_dropped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookings.dat");
    let store = BookingStore::new(&path);
    store.append(&booking(1, "A", "Mumbai", "Delhi", &[2])).unwrap();

    // Simulate a torn final append.
    let mut bytes = fs::read(&path).unwrap();
    bytes.extend_from_slice(&[0xAB; 17]);
    fs::write(&path, &bytes).unwrap();

    let scanned = store.scan().unwrap();
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].ticket_id, TicketId::new(1));
}

#[test]
fn corrupt_full_record_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookings.dat");
    let store = BookingStore::new(&path);
    store.append(&booking(1, "A", "Mumbai", "Delhi", &[2])).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes[40] ^= 0xFF;
    fs::write(&path, &bytes).unwrap();

    assert!(store.scan().is_err());
}

#[test]
fn cancel_preserves_surviving_order() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    for id in 1..=4 {
        store
            .append(&booking(id, "P", "Chennai", "Kolkata", &[id as u8]))
            .unwrap();
    }

    assert!(store.cancel(TicketId::new(2)).unwrap());

    let ids: Vec<u32> = store.scan().unwrap().iter().map(|r| r.ticket_id.get()).collect();
    assert_eq!(ids, vec![1, 3, 4]);
}

#[test]
fn cancel_unknown_ticket_is_negative_not_error() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    store.append(&booking(1, "A", "Mumbai", "Delhi", &[2])).unwrap();
    assert!(!store.cancel(TicketId::new(999)).unwrap());
    assert_eq!(store.scan().unwrap().len(), 1);
}

#[test]
fn noop_modify_leaves_store_byte_identical() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookings.dat");
    let store = BookingStore::new(&path);
    for id in 1..=3 {
        store.append(&booking(id, "P", "Mumbai", "Pune", &[id as u8])).unwrap();
    }

    let before = fs::read(&path).unwrap();
    assert!(store.modify(TicketId::new(2), |_| {}).unwrap());
    let after = fs::read(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn modify_changes_only_the_target() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    for id in 1..=3 {
        store.append(&booking(id, "P", "Mumbai", "Pune", &[id as u8])).unwrap();
    }

    assert!(store
        .modify(TicketId::new(2), |r| r.name = "Renamed".to_owned())
        .unwrap());

    let records = store.scan().unwrap();
    assert_eq!(records[0].name, "P");
    assert_eq!(records[1].name, "Renamed");
    assert_eq!(records[2].name, "P");
    assert_eq!(records[1].ticket_id, TicketId::new(2));
}

#[test]
fn rewrite_reports_counts() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    for id in 1..=4 {
        store.append(&booking(id, "P", "Mumbai", "Pune", &[1])).unwrap();
    }

    let outcome = store
        .rewrite(|record| {
            if record.ticket_id.get() % 2 == 0 {
                RecordDecision::Drop
            } else {
                RecordDecision::Keep
            }
        })
        .unwrap();
    assert_eq!(outcome.examined, 4);
    assert_eq!(outcome.dropped, 2);
    assert_eq!(outcome.replaced, 0);
    assert_eq!(store.scan().unwrap().len(), 2);
}

#[test]
fn remove_last_rewrites_all_but_last() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    for id in 1..=3 {
        store.append(&booking(id, "P", "Mumbai", "Pune", &[1])).unwrap();
    }
    assert!(store.remove_last().unwrap());
    let ids: Vec<u32> = store.scan().unwrap().iter().map(|r| r.ticket_id.get()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn remove_last_deletes_file_for_single_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookings.dat");
    let store = BookingStore::new(&path);
    store.append(&booking(1, "A", "Mumbai", "Delhi", &[2])).unwrap();

    assert!(store.remove_last().unwrap());
    assert!(!path.exists());
    assert!(!store.remove_last().unwrap());
}

#[test]
fn booking_and_cancel_scenario() {
    // Empty store -> book Asha, Mumbai -> Delhi, seats {3, 7} ->
    // one record -> cancel it -> empty store again.
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    assert!(store.scan().unwrap().is_empty());

    let record = booking(917, "Asha", "Mumbai", "Delhi", &[3, 7]);
    store.append(&record).unwrap();

    let scanned = store.scan().unwrap();
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].seats[0], 3);
    assert_eq!(scanned[0].seats[1], 7);
    assert!(scanned[0].seats[2..].iter().all(|&s| s == 0));

    assert!(store.cancel(TicketId::new(917)).unwrap());
    assert!(store.scan().unwrap().is_empty());
}

#[test]
fn file_size_is_record_multiple() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookings.dat");
    let store = BookingStore::new(&path);
    for id in 1..=3 {
        store.append(&booking(id, "P", "Mumbai", "Pune", &[1])).unwrap();
    }
    let len = fs::metadata(&path).unwrap().len() as usize;
    assert_eq!(len, 3 * BOOKING_RECORD_SIZE);
}

// ---------------------------------------------------------------------------
// Checkpoint file
// ---------------------------------------------------------------------------

#[test]
fn checkpoint_round_trip() {
    let dir = TempDir::new().unwrap();
    let file = CheckpointFile::new(dir.path().join("partial.dat"));

    let checkpoint = Checkpoint {
        stage: BookingStage::RouteSelected,
        booking: booking(42, "Ravi", "Bangalore", "Hyderabad", &[]),
    };
    file.save(&checkpoint).unwrap();

    let loaded = file.load().unwrap().expect("checkpoint present");
    assert_eq!(loaded.stage, BookingStage::RouteSelected);
    assert_eq!(loaded.booking.origin, "Bangalore");
    assert_eq!(loaded.booking.destination, "Hyderabad");
}

#[test]
fn missing_checkpoint_is_none() {
    let dir = TempDir::new().unwrap();
    let file = CheckpointFile::new(dir.path().join("partial.dat"));
    assert!(file.load().unwrap().is_none());
}

#[test]
fn save_overwrites_previous_checkpoint() {
    let dir = TempDir::new().unwrap();
    let file = CheckpointFile::new(dir.path().join("partial.dat"));

    file.save(&Checkpoint {
        stage: BookingStage::Identified,
        booking: booking(1, "", "", "", &[]),
    })
    .unwrap();
    file.save(&Checkpoint {
        stage: BookingStage::Priced,
        booking: booking(2, "Asha", "Mumbai", "Delhi", &[4]),
    })
    .unwrap();

    let loaded = file.load().unwrap().expect("checkpoint present");
    assert_eq!(loaded.stage, BookingStage::Priced);
    assert_eq!(loaded.booking.ticket_id, TicketId::new(2));
}

#[test]
fn short_checkpoint_is_treated_as_absent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.dat");
    fs::write(&path, [1, 2, 3]).unwrap();
    let file = CheckpointFile::new(&path);
    assert!(file.load().unwrap().is_none());
}

#[test]
fn clear_deletes_and_tolerates_absence() {
    let dir = TempDir::new().unwrap();
    let file = CheckpointFile::new(dir.path().join("partial.dat"));
    file.save(&Checkpoint::default()).unwrap();
    assert!(file.clear().unwrap());
    assert!(!file.clear().unwrap());
    assert!(file.load().unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Feedback log
// ---------------------------------------------------------------------------

#[test]
fn feedback_appends_in_order() {
    let dir = TempDir::new().unwrap();
    let log = FeedbackLog::new(dir.path().join("feedbacks.dat"));
    for (id, rating) in [(1, 5), (2, 3)] {
        log.append(&FeedbackRecord {
            ticket_id: TicketId::new(id),
            name: "Asha".to_owned(),
            rating,
            comment: "ok".to_owned(),
        })
        .unwrap();
    }
    let records = log.scan().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].rating, 5);
    assert_eq!(records[1].rating, 3);
}

// ---------------------------------------------------------------------------
// Loyalty ledger
// ---------------------------------------------------------------------------

#[test]
fn ledger_credit_and_balance() {
    let dir = TempDir::new().unwrap();
    let ledger = LoyaltyLedger::new(dir.path().join("points.dat"));

    assert_eq!(ledger.points_for("Asha").unwrap(), 0);
    assert_eq!(ledger.credit("Asha", 10).unwrap(), 10);
    assert_eq!(ledger.credit("Asha", 10).unwrap(), 20);
    assert_eq!(ledger.points_for("Asha").unwrap(), 20);
    // Byte-exact keying: a different capitalization is a new account.
    assert_eq!(ledger.points_for("asha").unwrap(), 0);
}

#[test]
fn ledger_debit_enforces_balance() {
    let dir = TempDir::new().unwrap();
    let ledger = LoyaltyLedger::new(dir.path().join("points.dat"));
    ledger.credit("Ravi", 30).unwrap();

    assert_eq!(ledger.debit("Ravi", 20).unwrap(), 10);
    let err = ledger.debit("Ravi", 11).unwrap_err();
    assert!(err.is_user_error());
    assert_eq!(ledger.points_for("Ravi").unwrap(), 10);
}

#[test]
fn ledger_keeps_other_accounts_intact() {
    let dir = TempDir::new().unwrap();
    let ledger = LoyaltyLedger::new(dir.path().join("points.dat"));
    ledger.credit("Asha", 10).unwrap();
    ledger.credit("Ravi", 20).unwrap();
    ledger.debit("Ravi", 5).unwrap();

    assert_eq!(ledger.points_for("Asha").unwrap(), 10);
    assert_eq!(ledger.points_for("Ravi").unwrap(), 15);
}
