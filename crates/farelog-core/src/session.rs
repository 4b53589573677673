//! The staged booking transaction.
//!
//! A [`BookingSession`] walks the stage machine
//! `Empty -> Identified -> NamedTraveler -> RouteSelected -> Priced ->
//! Committed`. Each transition fires only on successfully validated
//! input; calling an operation at the wrong stage is a
//! [`FareError::StageViolation`]. Any stage may pause, serializing
//! the in-progress record plus the stage marker to a checkpoint, and
//! a resumed session re-enters at the saved stage.

use farelog_error::{FareError, Result};
use farelog_inventory::RouteInventory;
use farelog_store::BookingStore;
use farelog_types::limits::MAX_SEATS;
use farelog_types::{
    BookingRecord, BookingStage, Checkpoint, SeatNumber, TicketCategory, TicketId, TransportMode,
};
use tracing::{debug, info};

use crate::config::SystemConfig;
use crate::idgen::TicketIdGenerator;
use crate::validate;

/// Validated route-and-party input for the `RouteSelected` transition.
#[derive(Debug, Clone)]
pub struct RouteChoice {
    pub origin: String,
    pub destination: String,
    pub travelers: u8,
    pub mode: TransportMode,
    pub category: TicketCategory,
    pub return_ticket: bool,
}

/// One interactive booking transaction.
#[derive(Debug, Clone, Default)]
pub struct BookingSession {
    stage: BookingStage,
    booking: BookingRecord,
}

impl BookingSession {
    /// Start a fresh transaction at the `Empty` stage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-enter a paused transaction at its saved stage.
    #[must_use]
    pub fn resume(checkpoint: Checkpoint) -> Self {
        debug!(stage = %checkpoint.stage, "resuming paused booking");
        Self {
            stage: checkpoint.stage,
            booking: checkpoint.booking,
        }
    }

    /// Current stage.
    #[must_use]
    pub const fn stage(&self) -> BookingStage {
        self.stage
    }

    /// The in-progress record.
    #[must_use]
    pub const fn booking(&self) -> &BookingRecord {
        &self.booking
    }

    /// Serialize current progress for a pause.
    #[must_use]
    pub fn pause(&self) -> Checkpoint {
        Checkpoint {
            stage: self.stage,
            booking: self.booking.clone(),
        }
    }

    fn expect_stage(&self, want: BookingStage, operation: &'static str) -> Result<()> {
        if self.stage == want {
            Ok(())
        } else {
            Err(FareError::StageViolation {
                operation,
                stage: self.stage.as_str(),
            })
        }
    }

    /// `Empty -> Identified`: assign the ticket id.
    pub fn identify(&mut self, ids: &mut TicketIdGenerator) -> Result<TicketId> {
        self.expect_stage(BookingStage::Empty, "assign ticket id")?;
        self.booking.ticket_id = ids.next_id();
        self.stage = BookingStage::Identified;
        Ok(self.booking.ticket_id)
    }

    /// `Identified -> NamedTraveler`: record the validated passenger
    /// name.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.expect_stage(BookingStage::Identified, "set passenger name")?;
        let name = validate::validate_name(name)?;
        self.booking.name = name.to_owned();
        self.stage = BookingStage::NamedTraveler;
        Ok(())
    }

    /// `NamedTraveler -> RouteSelected`: record route, party size,
    /// mode, and category, and make sure the inventory tracks the
    /// route.
    ///
    /// Origin and destination must be distinct members of the
    /// configured city table; they are stored in canonical table
    /// spelling so route identity stays exact.
    pub fn select_route(
        &mut self,
        config: &SystemConfig,
        inventory: &mut RouteInventory,
        choice: &RouteChoice,
    ) -> Result<()> {
        self.expect_stage(BookingStage::NamedTraveler, "select route")?;

        let origin = config.resolve_city(&choice.origin)?.to_owned();
        let destination = config.resolve_city(&choice.destination)?.to_owned();
        if origin == destination {
            return Err(FareError::SameCity { city: origin });
        }
        if choice.travelers == 0 || choice.travelers > MAX_SEATS {
            return Err(FareError::InvalidTravelerCount {
                count: u32::from(choice.travelers),
                max: u32::from(MAX_SEATS),
            });
        }

        inventory.ensure_route(&origin, &destination)?;

        self.booking.origin = origin;
        self.booking.destination = destination;
        self.booking.travelers = choice.travelers;
        self.booking.mode = choice.mode;
        self.booking.category = choice.category;
        self.booking.return_ticket = choice.return_ticket;
        self.stage = BookingStage::RouteSelected;
        Ok(())
    }

    /// Claim one seat for the next traveler (stays in
    /// `RouteSelected`). The seat must be free on the route; it is
    /// booked in the inventory immediately so later travelers see it
    /// taken.
    pub fn assign_seat(&mut self, inventory: &mut RouteInventory, seat: SeatNumber) -> Result<()> {
        self.expect_stage(BookingStage::RouteSelected, "assign seat")?;
        if self.booking.seat_count() >= self.booking.travelers {
            return Err(FareError::InvalidTravelerCount {
                count: u32::from(self.booking.travelers) + 1,
                max: u32::from(self.booking.travelers),
            });
        }
        if !inventory.is_seat_available(&self.booking.origin, &self.booking.destination, seat) {
            return Err(FareError::SeatUnavailable {
                seat: seat.get(),
                origin: self.booking.origin.clone(),
                destination: self.booking.destination.clone(),
            });
        }
        inventory.book_seat(&self.booking.origin, &self.booking.destination, seat);
        self.booking.assign_seat(seat);
        Ok(())
    }

    /// Return every claimed seat to the inventory (the abort path
    /// when the passenger declines the summary).
    pub fn release_seats(&mut self, inventory: &mut RouteInventory) {
        let seats: Vec<SeatNumber> = self.booking.assigned_seats().collect();
        for seat in seats {
            inventory.free_seat(&self.booking.origin, &self.booking.destination, seat);
        }
        self.booking.seats = [0; MAX_SEATS as usize];
    }

    /// `RouteSelected -> Priced`: compute the fare from the
    /// configured tables (doubled for return tickets), applying an
    /// optional promo code. Every traveler must have a seat first.
    pub fn price(&mut self, config: &SystemConfig, promo: Option<&str>) -> Result<u32> {
        self.expect_stage(BookingStage::RouteSelected, "price booking")?;
        if self.booking.seat_count() != self.booking.travelers {
            return Err(FareError::InvalidTravelerCount {
                count: u32::from(self.booking.seat_count()),
                max: u32::from(self.booking.travelers),
            });
        }

        let base = config.base_fare(self.booking.mode, &self.booking.origin, self.booking.category)?;
        let mut price = if self.booking.return_ticket { base * 2 } else { base };
        if let Some(code) = promo {
            let discount = config.promo_discount(code)?;
            price -= price * discount / 100;
        }

        self.booking.price = price;
        self.stage = BookingStage::Priced;
        Ok(price)
    }

    /// Knock a redemption discount off a priced booking (stays in
    /// `Priced`). The fare never goes below zero.
    pub fn apply_discount(&mut self, rupees: u32) -> Result<u32> {
        self.expect_stage(BookingStage::Priced, "apply discount")?;
        self.booking.price = self.booking.price.saturating_sub(rupees);
        Ok(self.booking.price)
    }

    /// `Priced -> Committed`: append the finalized record to the
    /// store.
    pub fn commit(&mut self, store: &BookingStore) -> Result<&BookingRecord> {
        self.expect_stage(BookingStage::Priced, "commit booking")?;
        store.append(&self.booking)?;
        self.stage = BookingStage::Committed;
        info!(
            ticket = self.booking.ticket_id.get(),
            price = self.booking.price,
            "booking committed"
        );
        Ok(&self.booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn choice() -> RouteChoice {
        RouteChoice {
            origin: "Mumbai".to_owned(),
            destination: "Delhi".to_owned(),
            travelers: 2,
            mode: TransportMode::Train,
            category: TicketCategory::Standard,
            return_ticket: false,
        }
    }

    fn seat(n: u8) -> SeatNumber {
        SeatNumber::new(n).expect("valid seat")
    }

    fn advance_to_route(
        config: &SystemConfig,
        inventory: &mut RouteInventory,
    ) -> BookingSession {
        let mut session = BookingSession::new();
        session.identify(&mut TicketIdGenerator::new()).unwrap();
        session.set_name("Asha").unwrap();
        session.select_route(config, inventory, &choice()).unwrap();
        session
    }

    #[test]
    fn happy_path_reaches_committed() {
        let dir = TempDir::new().unwrap();
        let store = BookingStore::new(dir.path().join("bookings.dat"));
        let config = SystemConfig::default();
        let mut inventory = RouteInventory::default();

        let mut session = advance_to_route(&config, &mut inventory);
        session.assign_seat(&mut inventory, seat(3)).unwrap();
        session.assign_seat(&mut inventory, seat(7)).unwrap();
        let price = session.price(&config, None).unwrap();
        assert_eq!(price, 1500);
        session.commit(&store).unwrap();
        assert_eq!(session.stage(), BookingStage::Committed);

        let records = store.scan().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Asha");
        assert_eq!(records[0].seats[..2], [3, 7]);
    }

    #[test]
    fn operations_out_of_order_are_stage_violations() {
        let config = SystemConfig::default();
        let mut inventory = RouteInventory::default();
        let mut session = BookingSession::new();

        let err = session.set_name("Asha").unwrap_err();
        assert!(matches!(err, FareError::StageViolation { .. }));
        let err = session
            .select_route(&config, &mut inventory, &choice())
            .unwrap_err();
        assert!(matches!(err, FareError::StageViolation { .. }));
        let err = session.price(&config, None).unwrap_err();
        assert!(matches!(err, FareError::StageViolation { .. }));
    }

    #[test]
    fn same_city_is_rejected() {
        let config = SystemConfig::default();
        let mut inventory = RouteInventory::default();
        let mut session = BookingSession::new();
        session.identify(&mut TicketIdGenerator::new()).unwrap();
        session.set_name("Asha").unwrap();

        let mut bad = choice();
        bad.destination = "mumbai".to_owned(); // case-insensitive match
        let err = session.select_route(&config, &mut inventory, &bad).unwrap_err();
        assert!(matches!(err, FareError::SameCity { .. }));
        assert_eq!(session.stage(), BookingStage::NamedTraveler);
    }

    #[test]
    fn taken_seat_is_rejected_and_inventory_updated() {
        let config = SystemConfig::default();
        let mut inventory = RouteInventory::default();
        let mut session = advance_to_route(&config, &mut inventory);

        session.assign_seat(&mut inventory, seat(3)).unwrap();
        let err = session.assign_seat(&mut inventory, seat(3)).unwrap_err();
        assert!(matches!(err, FareError::SeatUnavailable { seat: 3, .. }));
        assert!(!inventory.is_seat_available("Mumbai", "Delhi", seat(3)));
    }

    #[test]
    fn pricing_requires_all_travelers_seated() {
        let config = SystemConfig::default();
        let mut inventory = RouteInventory::default();
        let mut session = advance_to_route(&config, &mut inventory);
        session.assign_seat(&mut inventory, seat(1)).unwrap();

        let err = session.price(&config, None).unwrap_err();
        assert!(err.is_user_error());
    }

    #[test]
    fn return_ticket_doubles_and_promo_discounts() {
        let config = SystemConfig::default();
        let mut inventory = RouteInventory::default();
        let mut session = BookingSession::new();
        session.identify(&mut TicketIdGenerator::new()).unwrap();
        session.set_name("Ravi").unwrap();
        let mut c = choice();
        c.travelers = 1;
        c.return_ticket = true;
        c.category = TicketCategory::Vip;
        session.select_route(&config, &mut inventory, &c).unwrap();
        session.assign_seat(&mut inventory, seat(10)).unwrap();

        // VIP Mumbai train 2500, doubled to 5000, minus 20%.
        let price = session.price(&config, Some("CLUBGAMMA")).unwrap();
        assert_eq!(price, 4000);
    }

    #[test]
    fn unknown_promo_leaves_stage_unchanged() {
        let config = SystemConfig::default();
        let mut inventory = RouteInventory::default();
        let mut session = advance_to_route(&config, &mut inventory);
        session.assign_seat(&mut inventory, seat(1)).unwrap();
        session.assign_seat(&mut inventory, seat(2)).unwrap();

        let err = session.price(&config, Some("NOPE")).unwrap_err();
        assert!(matches!(err, FareError::InvalidPromoCode { .. }));
        assert_eq!(session.stage(), BookingStage::RouteSelected);
    }

    #[test]
    fn release_returns_seats_to_inventory() {
        let config = SystemConfig::default();
        let mut inventory = RouteInventory::default();
        let mut session = advance_to_route(&config, &mut inventory);
        session.assign_seat(&mut inventory, seat(4)).unwrap();
        session.assign_seat(&mut inventory, seat(5)).unwrap();

        session.release_seats(&mut inventory);
        assert!(inventory.is_seat_available("Mumbai", "Delhi", seat(4)));
        assert!(inventory.is_seat_available("Mumbai", "Delhi", seat(5)));
        assert_eq!(session.booking().seat_count(), 0);
    }

    #[test]
    fn pause_and_resume_round_trip() {
        let config = SystemConfig::default();
        let mut inventory = RouteInventory::default();
        let session = advance_to_route(&config, &mut inventory);

        let checkpoint = session.pause();
        assert_eq!(checkpoint.stage, BookingStage::RouteSelected);

        let resumed = BookingSession::resume(checkpoint);
        assert_eq!(resumed.stage(), BookingStage::RouteSelected);
        assert_eq!(resumed.booking().origin, "Mumbai");
        assert_eq!(resumed.booking().destination, "Delhi");
        assert_eq!(resumed.booking().name, "Asha");
    }

    #[test]
    fn discount_saturates_at_zero() {
        let config = SystemConfig::default();
        let mut inventory = RouteInventory::default();
        let mut session = advance_to_route(&config, &mut inventory);
        session.assign_seat(&mut inventory, seat(1)).unwrap();
        session.assign_seat(&mut inventory, seat(2)).unwrap();
        session.price(&config, None).unwrap();

        assert_eq!(session.apply_discount(1_000_000).unwrap(), 0);
    }
}
