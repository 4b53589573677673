//! End-to-end booking workflow: session through store, inventory,
//! checkpoint, and loyalty ledger on real files.

use farelog_core::{
    build_schedule, popular_destinations, total_revenue, BookingSession, RouteChoice,
    SystemConfig, TicketIdGenerator,
};
use farelog_inventory::RouteInventory;
use farelog_store::{BookingStore, CheckpointFile, LoyaltyLedger};
use farelog_types::{BookingStage, SeatNumber, TicketCategory, TransportMode};
use tempfile::TempDir;

fn seat(n: u8) -> SeatNumber {
    SeatNumber::new(n).expect("valid seat")
}

fn mumbai_delhi(travelers: u8, category: TicketCategory) -> RouteChoice {
    RouteChoice {
        origin: "Mumbai".to_owned(),
        destination: "Delhi".to_owned(),
        travelers,
        mode: TransportMode::Train,
        category,
        return_ticket: false,
    }
}

#[test]
fn booking_persists_and_rebuilds_inventory() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    let config = SystemConfig::default();
    let mut inventory = RouteInventory::default();
    let mut ids = TicketIdGenerator::new();

    let mut session = BookingSession::new();
    session.identify(&mut ids).unwrap();
    session.set_name("Asha").unwrap();
    session
        .select_route(&config, &mut inventory, &mumbai_delhi(2, TicketCategory::Standard))
        .unwrap();
    session.assign_seat(&mut inventory, seat(3)).unwrap();
    session.assign_seat(&mut inventory, seat(7)).unwrap();
    let price = session.price(&config, None).unwrap();
    assert_eq!(price, 1500);
    session.commit(&store).unwrap();

    // A fresh inventory seeded from the store sees the same seats
    // taken.
    let records = store.scan().unwrap();
    let mut rebuilt = RouteInventory::default();
    rebuilt.seed(&records).unwrap();
    assert!(!rebuilt.is_seat_available("Mumbai", "Delhi", seat(3)));
    assert!(!rebuilt.is_seat_available("Mumbai", "Delhi", seat(7)));
    assert!(rebuilt.is_seat_available("Mumbai", "Delhi", seat(4)));
}

#[test]
fn qualifying_fare_earns_loyalty_points() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    let ledger = LoyaltyLedger::new(dir.path().join("loyalty.dat"));
    let config = SystemConfig::default();
    let mut inventory = RouteInventory::default();

    let mut session = BookingSession::new();
    session.identify(&mut TicketIdGenerator::new()).unwrap();
    session.set_name("Ravi Kumar").unwrap();
    session
        .select_route(&config, &mut inventory, &mumbai_delhi(1, TicketCategory::Vip))
        .unwrap();
    session.assign_seat(&mut inventory, seat(1)).unwrap();
    let price = session.price(&config, None).unwrap();
    assert_eq!(price, 2500);
    let committed = session.commit(&store).unwrap();

    if let Some(points) = config.loyalty.points_earned(committed.price) {
        ledger.credit(&committed.name, points).unwrap();
    }
    assert_eq!(ledger.points_for("Ravi Kumar").unwrap(), 10);

    // Redeeming 5 points is a Rs. 500 discount.
    let balance = ledger.debit("Ravi Kumar", 5).unwrap();
    assert_eq!(balance, 5);
    assert_eq!(config.loyalty.redemption_value(5), 500);
}

#[test]
fn below_threshold_fare_earns_nothing() {
    let config = SystemConfig::default();
    assert_eq!(config.loyalty.points_earned(1500), None);
    assert_eq!(config.loyalty.points_earned(1800), None);
    assert_eq!(config.loyalty.points_earned(1801), Some(10));
}

#[test]
fn paused_booking_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let checkpoint_file = CheckpointFile::new(dir.path().join("progress.dat"));
    let config = SystemConfig::default();
    let mut inventory = RouteInventory::default();

    let mut session = BookingSession::new();
    session.identify(&mut TicketIdGenerator::new()).unwrap();
    session.set_name("Meera").unwrap();
    session
        .select_route(&config, &mut inventory, &mumbai_delhi(1, TicketCategory::Standard))
        .unwrap();
    checkpoint_file.save(&session.pause()).unwrap();

    // Simulated restart: new process, new in-memory state.
    let loaded = checkpoint_file.load().unwrap().expect("checkpoint present");
    let mut resumed = BookingSession::resume(loaded);
    assert_eq!(resumed.stage(), BookingStage::RouteSelected);
    assert_eq!(resumed.booking().name, "Meera");

    let mut inventory = RouteInventory::default();
    inventory.ensure_route("Mumbai", "Delhi").unwrap();
    resumed.assign_seat(&mut inventory, seat(12)).unwrap();
    resumed.price(&config, None).unwrap();

    let store = BookingStore::new(dir.path().join("bookings.dat"));
    resumed.commit(&store).unwrap();
    assert!(checkpoint_file.clear().unwrap());
    assert!(checkpoint_file.load().unwrap().is_none());
}

#[test]
fn cancel_frees_seats_for_rebooking() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    let config = SystemConfig::default();
    let mut inventory = RouteInventory::default();
    let mut ids = TicketIdGenerator::new();

    let mut first = BookingSession::new();
    let first_id = first.identify(&mut ids).unwrap();
    first.set_name("Asha").unwrap();
    first
        .select_route(&config, &mut inventory, &mumbai_delhi(1, TicketCategory::Standard))
        .unwrap();
    first.assign_seat(&mut inventory, seat(5)).unwrap();
    first.price(&config, None).unwrap();
    first.commit(&store).unwrap();

    assert!(store.cancel(first_id).unwrap());

    // Rebuilding from the now-empty store leaves no routes at all;
    // re-opening the route shows every seat free again.
    let mut rebuilt = RouteInventory::default();
    rebuilt.seed(&store.scan().unwrap()).unwrap();
    assert!(rebuilt.available_seats("Mumbai", "Delhi").is_none());
    rebuilt.ensure_route("Mumbai", "Delhi").unwrap();
    assert!(rebuilt.is_seat_available("Mumbai", "Delhi", seat(5)));

    let mut second = BookingSession::new();
    second.identify(&mut ids).unwrap();
    second.set_name("Ravi").unwrap();
    second
        .select_route(&config, &mut rebuilt, &mumbai_delhi(1, TicketCategory::Standard))
        .unwrap();
    second.assign_seat(&mut rebuilt, seat(5)).unwrap();
}

#[test]
fn reports_reflect_committed_bookings() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::new(dir.path().join("bookings.dat"));
    let config = SystemConfig::default();
    let mut inventory = RouteInventory::default();
    let mut ids = TicketIdGenerator::new();

    for (name, destination) in [("Asha", "Delhi"), ("Ravi", "Delhi"), ("Meera", "Pune")] {
        let mut session = BookingSession::new();
        session.identify(&mut ids).unwrap();
        session.set_name(name).unwrap();
        let mut choice = mumbai_delhi(1, TicketCategory::Standard);
        choice.destination = destination.to_owned();
        session.select_route(&config, &mut inventory, &choice).unwrap();
        let free = inventory
            .available_seats("Mumbai", destination)
            .unwrap()
            .available_seats()
            .next()
            .unwrap();
        session.assign_seat(&mut inventory, free).unwrap();
        session.price(&config, None).unwrap();
        session.commit(&store).unwrap();
    }

    let records = store.scan().unwrap();
    let counts = popular_destinations(&records, &config.cities);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].city, "Delhi");
    assert_eq!(counts[0].bookings, 2);
    assert_eq!(counts[1].city, "Pune");
    assert_eq!(counts[1].bookings, 1);
    assert_eq!(total_revenue(&records), 1500 * 3);
}

#[test]
fn schedule_rows_use_configured_cities() {
    let config = SystemConfig::default();
    let schedule = build_schedule(&config);
    assert_eq!(schedule.len(), 30);
    for row in &schedule {
        assert!(config.cities.contains(&row.origin));
        assert!(config.cities.contains(&row.destination));
        assert_ne!(row.origin, row.destination);
    }
}
